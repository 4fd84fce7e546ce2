use sprintloop_core::rehab::exercises;
use sprintloop_core::{ProfileError, Result};

pub fn run(name: &str) -> Result<()> {
    let exercise = exercises::find(name)
        .or_else(|| exercises::mentioned_in(name))
        .ok_or_else(|| ProfileError::UnknownExercise(name.to_string()))?;

    println!("{}", exercise.name.to_uppercase());
    println!();
    println!("{}", exercise.description);
    println!();
    println!("COACHING CUE: {}", exercise.cue);
    Ok(())
}
