use chrono::{Datelike, Local, Weekday};
use sprintloop_core::{workout_for, HoldMode, PlanLine, Profile, Result, TimerHint, ValidationError};

pub fn run(day: Option<&str>, json: bool) -> Result<()> {
    let day = match day {
        Some(raw) => raw
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ValidationError::InvalidValue {
                field: "day".to_string(),
                message: format!("unknown weekday '{raw}'"),
            })?,
        None => Local::now().weekday(),
    };
    let profile = Profile::load_or_default();
    let plan = workout_for(day, &profile);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("{} (week {})", weekday_name(day), profile.week());
    for line in &plan {
        match line {
            PlanLine::Section { title } => println!("\n{title}"),
            PlanLine::Item { text, timer, .. } => match timer {
                Some(hint) => println!("  - {text}  [{}]", timer_label(hint)),
                None => println!("  - {text}"),
            },
        }
    }
    Ok(())
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// The command that starts the hinted timer.
fn timer_label(hint: &TimerHint) -> String {
    match hint.hold() {
        None => "sprintloop run 20-minute".to_string(),
        Some((secs, HoldMode::SidePlank)) => format!("sprintloop hold {secs} --side-plank"),
        Some((secs, HoldMode::Simple)) => format!("sprintloop hold {secs}"),
    }
}
