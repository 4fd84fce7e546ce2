use sprintloop_core::{Config, HoldMode, HoldTimer, Result};

use super::session::{self, Key};

pub fn run(seconds: u32, side_plank: bool, silent: bool) -> Result<()> {
    let config = Config::load_or_default();
    let mode = if side_plank {
        HoldMode::SidePlank
    } else {
        HoldMode::Simple
    };

    let mut timer = HoldTimer::new(seconds, mode, session::cues(&config, silent));
    println!("keys: p pause/resume | r reset | q quit");
    if let Some(event) = timer.start() {
        session::announce(&event)?;
    }

    session::block_on(session::drive(&mut timer, |timer, key| {
        if key == Key::Reset {
            timer.set_time(seconds, mode);
        }
        None
    }))??;
    Ok(())
}
