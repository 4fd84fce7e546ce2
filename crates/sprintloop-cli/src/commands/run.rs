use sprintloop_core::{Config, IntervalEngine, Result, RoutineId};

use super::session::{self, Key, KEY_HELP};

pub fn run(id: Option<&str>, silent: bool) -> Result<()> {
    let config = Config::load_or_default();
    let id = match id {
        Some(raw) => raw.parse::<RoutineId>()?,
        None => config.default_routine,
    };

    let mut engine = IntervalEngine::new(id.build(), session::cues(&config, silent));
    println!("{}", id.title());
    println!("{KEY_HELP}");
    if let Some(event) = engine.start() {
        session::announce(&event)?;
    }

    session::block_on(session::drive(&mut engine, |engine, key| match key {
        Key::Next => engine.next(),
        Key::Prev => engine.prev(),
        Key::Reset => engine.reset(),
        _ => None,
    }))??;
    Ok(())
}
