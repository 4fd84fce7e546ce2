use sprintloop_core::{Config, LoopConfig, LoopEngine, Result};

use super::session::{self, Key, KEY_HELP};

/// Flags override the `[loop]` config section; unparsable flag values fall
/// back to the built-in defaults.
pub fn run(
    work: Option<&str>,
    rest: Option<&str>,
    silent: bool,
) -> Result<()> {
    let config = Config::load_or_default();
    let mut loop_config = config.loop_config();
    if work.is_some() || rest.is_some() {
        let work = work.map_or_else(|| loop_config.work_secs().to_string(), str::to_string);
        let rest = rest.map_or_else(|| loop_config.rest_secs().to_string(), str::to_string);
        loop_config = LoopConfig::from_text(&work, &rest);
    }

    let mut engine = LoopEngine::new(loop_config, session::cues(&config, silent));
    println!("LOOP TIMER");
    println!("{KEY_HELP}");
    if let Some(event) = engine.start() {
        session::announce(&event)?;
    }

    session::block_on(session::drive(&mut engine, |engine, key| match key {
        Key::Next => engine.skip(),
        Key::Reset => engine.stop(),
        Key::Work(text) => {
            engine.set_work_text(text);
            None
        }
        Key::Rest(text) => {
            engine.set_rest_text(text);
            None
        }
        _ => None,
    }))??;
    Ok(())
}
