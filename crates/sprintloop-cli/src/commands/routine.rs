use std::sync::Arc;

use clap::Subcommand;
use sprintloop_core::timer::format_remaining;
use sprintloop_core::{Event, IntervalEngine, PhaseKind, Result, RoutineId, SilentCues};

#[derive(Subcommand)]
pub enum RoutineAction {
    /// List built-in routines
    List,
    /// Print every phase of a routine
    Show {
        /// Routine ID ("7-4-2-1-1" or "20-minute")
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a routine instantly and print its events as JSON lines
    Simulate {
        /// Routine ID
        id: String,
    },
}

pub fn run(action: RoutineAction) -> Result<()> {
    match action {
        RoutineAction::List => {
            for id in RoutineId::ALL {
                let routine = id.build();
                println!(
                    "{:<10} {:<30} {:>2} phases  {}",
                    id,
                    id.title(),
                    routine.len(),
                    format_remaining(routine.total_secs() as i64)
                );
            }
        }
        RoutineAction::Show { id, json } => {
            let id: RoutineId = id.parse()?;
            let routine = id.build();
            if json {
                println!("{}", serde_json::to_string_pretty(&routine)?);
                return Ok(());
            }
            println!("{}", id.title());
            for (index, phase) in routine.phases().iter().enumerate() {
                println!(
                    "{index:>3}  {:<7} {:>4}s  {}",
                    phase.kind, phase.duration_secs, phase.label
                );
            }
            println!("total {}", format_remaining(routine.total_secs() as i64));
            for kind in PhaseKind::ALL {
                let secs = routine.secs_in(kind);
                if secs > 0 {
                    println!("  {kind:<7} {}", format_remaining(secs as i64));
                }
            }
        }
        RoutineAction::Simulate { id } => {
            let id: RoutineId = id.parse()?;
            let mut engine = IntervalEngine::new(id.build(), Arc::new(SilentCues));
            if let Some(event) = engine.start() {
                emit(&event)?;
            }
            while engine.is_running() {
                if let Some(event) = engine.tick() {
                    emit(&event)?;
                }
            }
        }
    }
    Ok(())
}

fn emit(event: &Event) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
