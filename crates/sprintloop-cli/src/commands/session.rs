//! Interactive driver shared by `run`, `loop` and `hold`.
//!
//! Ticks once per second while the timer runs and reads one command per
//! stdin line. The status line is redrawn in place; events get their own
//! line above it.

use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use sprintloop_core::cue::{self, CueEmitter, SilentCues};
use sprintloop_core::{Config, Countdown, Event, TimerView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);

pub const KEY_HELP: &str =
    "keys: p pause/resume | n next | b back | r reset | w N work | rest N rest | q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Toggle,
    Next,
    Prev,
    Reset,
    Work(&'a str),
    Rest(&'a str),
    Quit,
    Unknown(&'a str),
}

/// An empty line toggles pause, so Enter alone works as a pause button.
pub fn parse_key(line: &str) -> Key<'_> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next().unwrap_or("");
    match cmd.to_ascii_lowercase().as_str() {
        "" | "p" | "pause" | "resume" => Key::Toggle,
        "n" | "next" | "skip" => Key::Next,
        "b" | "back" | "prev" => Key::Prev,
        "r" | "reset" => Key::Reset,
        "w" | "work" => Key::Work(arg),
        "rest" => Key::Rest(arg),
        "q" | "quit" | "exit" => Key::Quit,
        _ => Key::Unknown(line),
    }
}

pub fn block_on<F: Future>(fut: F) -> io::Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(fut))
}

/// Cue output for an interactive session; `--silent` overrides the config.
pub fn cues(config: &Config, silent: bool) -> Arc<dyn CueEmitter> {
    if silent {
        Arc::new(SilentCues)
    } else {
        cue::from_config(&config.cues)
    }
}

/// First tick one full second from now.
fn new_ticker() -> Interval {
    let mut ticker = interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Run `timer` until it finishes, the user quits, or it is paused with
/// stdin closed. Pause/resume and quit are handled here; every other key
/// goes to `handle`.
pub async fn drive<T, F>(timer: &mut T, mut handle: F) -> io::Result<()>
where
    T: Countdown,
    F: FnMut(&mut T, Key<'_>) -> Option<Event>,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = new_ticker();
    let mut stdin_open = true;
    render(&timer.view())?;

    loop {
        tokio::select! {
            _ = ticker.tick(), if timer.is_running() => {
                if let Some(event) = timer.tick() {
                    announce(&event)?;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    stdin_open = false;
                    continue;
                };
                let was_running = timer.is_running();
                let event = match parse_key(&line) {
                    Key::Quit => {
                        println!();
                        return Ok(());
                    }
                    Key::Toggle => timer.toggle(),
                    Key::Unknown(text) => {
                        note(&format!("unknown command '{text}' ({KEY_HELP})"))?;
                        None
                    }
                    key => handle(timer, key),
                };
                if let Some(event) = event {
                    announce(&event)?;
                }
                // Ticking restarts a full second after a resume.
                if !was_running && timer.is_running() {
                    ticker = new_ticker();
                }
            }
            else => {
                println!();
                return Ok(());
            }
        }

        let view = timer.view();
        render(&view)?;
        if view.is_finished && !timer.is_running() {
            println!();
            return Ok(());
        }
    }
}

fn render(view: &TimerView) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let state = if view.is_running { "" } else { "  [paused]" };
    write!(
        out,
        "\r\x1b[2K{:<32} {}{state}",
        view.headline, view.remaining_formatted
    )?;
    out.flush()
}

fn note(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "\r\x1b[2K{text}")?;
    out.flush()
}

pub fn announce(event: &Event) -> io::Result<()> {
    tracing::debug!(?event, cue = ?event.cue(), "timer event");
    match describe(event) {
        Some(text) => note(&text),
        None => Ok(()),
    }
}

/// One human-readable line per event.
pub fn describe(event: &Event) -> Option<String> {
    let text = match event {
        Event::WorkoutStarted {
            phases,
            label,
            duration_secs,
            ..
        } => format!("START  {label} ({duration_secs}s), {phases} phases"),
        Event::PhaseStarted {
            index,
            kind,
            label,
            duration_secs,
            ..
        } => format!("{index:>3}    {}  {label}", kind.headline(*duration_secs)),
        Event::TimerPaused { remaining_secs, .. } => {
            format!("PAUSED ({remaining_secs}s left)")
        }
        Event::TimerResumed { .. } => return None,
        Event::WorkoutFinished { label, .. } => format!("DONE   {label}"),
        Event::TimerReset { .. } => "RESET  press p to start again".to_string(),
        Event::LoopStarted {
            work_secs,
            rest_secs,
            ..
        } => format!("LOOP   work {work_secs}s / rest {rest_secs}s"),
        Event::LoopFlipped {
            phase,
            duration_secs,
            forced,
            ..
        } => {
            let skipped = if *forced { " (skipped)" } else { "" };
            format!("{:<6} {duration_secs}s{skipped}", phase.kind())
        }
        Event::LoopStopped { .. } => "STOPPED".to_string(),
        Event::HoldStageStarted {
            stage,
            duration_secs,
            ..
        } => format!("{}  {duration_secs}s", stage.label()),
        Event::HoldFinished { .. } => "DONE".to_string(),
    };
    Some(text)
}
