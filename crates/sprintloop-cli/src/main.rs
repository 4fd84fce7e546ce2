use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sprintloop", version, about = "Sprintloop interval workout timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Built-in interval routines
    Routine {
        #[command(subcommand)]
        action: commands::routine::RoutineAction,
    },
    /// Run an interval routine interactively
    Run {
        /// Routine ID ("7-4-2-1-1", "20-minute"); defaults to the configured one
        id: Option<String>,
        /// Play no cues
        #[arg(long)]
        silent: bool,
    },
    /// Endless work/rest loop
    Loop {
        /// Work length in seconds
        #[arg(long)]
        work: Option<String>,
        /// Rest length in seconds
        #[arg(long)]
        rest: Option<String>,
        #[arg(long)]
        silent: bool,
    },
    /// Countdown for a timed exercise
    Hold {
        seconds: u32,
        /// Side 1, a 10 second break, then side 2
        #[arg(long)]
        side_plank: bool,
        #[arg(long)]
        silent: bool,
    },
    /// Rehab plan for a day (today when omitted)
    Plan {
        /// Weekday name, e.g. "mon" or "Friday"
        day: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Describe an exercise
    Exercise {
        /// Exercise name, e.g. "Bird Dog"
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Rehab profile: programme week and maxes
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SPRINTLOOP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Routine { action } => commands::routine::run(action),
        Commands::Run { id, silent } => commands::run::run(id.as_deref(), silent),
        Commands::Loop { work, rest, silent } => {
            commands::loop_cmd::run(work.as_deref(), rest.as_deref(), silent)
        }
        Commands::Hold {
            seconds,
            side_plank,
            silent,
        } => commands::hold::run(seconds, side_plank, silent),
        Commands::Plan { day, json } => commands::plan::run(day.as_deref(), json),
        Commands::Exercise { name } => commands::exercise::run(&name.join(" ")),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
