//! Rehab profile commands.
//!
//! Every edit is written back to `profile.json` immediately.

use clap::Subcommand;
use sprintloop_core::{Profile, Result};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the current week and working weights
    Show,
    /// Change the programme week
    Week {
        #[command(subcommand)]
        action: WeekAction,
    },
    /// Set the one-rep max of an exercise
    Max {
        /// Exercise name, e.g. "Hack Squat"
        name: String,
        /// New max in lbs
        value: f64,
    },
}

#[derive(Subcommand)]
pub enum WeekAction {
    /// Advance one week (6 wraps to 1)
    Next,
    /// Go back one week (1 wraps to 6)
    Prev,
    /// Jump to a week between 1 and 6
    Set {
        #[arg(allow_hyphen_values = true)]
        week: i64,
    },
}

pub fn run(action: ProfileAction) -> Result<()> {
    let path = Profile::path()?;
    let mut profile = Profile::load_from(&path);

    match action {
        ProfileAction::Show => {
            show(&profile);
            return Ok(());
        }
        ProfileAction::Week { action } => {
            match action {
                WeekAction::Next => {
                    profile.next_week();
                }
                WeekAction::Prev => {
                    profile.prev_week();
                }
                WeekAction::Set { week } => profile.set_week(week)?,
            }
            println!("week {}", profile.week());
        }
        ProfileAction::Max { name, value } => {
            profile.set_max(&name, value)?;
            println!("{name}: max {value} lbs, working {}", profile.weight_label(&name));
        }
    }

    profile.save_to(&path)?;
    Ok(())
}

fn show(profile: &Profile) {
    println!("WEEK {}", profile.week());
    println!();
    for (name, max) in profile.maxes() {
        println!("  {name:<24} max {max:>6.1}  {}", profile.weight_label(name));
    }
}
