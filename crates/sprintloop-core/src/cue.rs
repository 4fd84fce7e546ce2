//! Audio cues fired at phase boundaries.
//!
//! Engines hold an `Arc<dyn CueEmitter>` and call [`CueEmitter::play`], which
//! never fails: emitters report problems through [`CueEmitter::try_play`] and
//! the provided `play` logs and drops them.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::CueConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Beep,
    Buzzer,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Beep => "beep",
            Cue::Buzzer => "buzzer",
        }
    }

    /// File name looked up in the sound directories.
    pub fn file_name(&self) -> &'static str {
        match self {
            Cue::Beep => "beep.wav",
            Cue::Buzzer => "buzzer.wav",
        }
    }
}

#[derive(Error, Debug)]
pub enum CueError {
    #[error("no sound file for '{0}'")]
    Missing(&'static str),

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait CueEmitter: Send + Sync {
    /// Start `cue`, stopping whatever cue is still playing.
    fn try_play(&self, cue: Cue) -> Result<(), CueError>;

    /// Fire-and-forget wrapper around [`try_play`](Self::try_play).
    fn play(&self, cue: Cue) {
        if let Err(e) = self.try_play(cue) {
            tracing::warn!(cue = cue.as_str(), error = %e, "cue dropped");
        }
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCues;

impl CueEmitter for SilentCues {
    fn try_play(&self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Rings the terminal bell on stderr: once for a beep, twice for the buzzer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl CueEmitter for TerminalBell {
    fn try_play(&self, cue: Cue) -> Result<(), CueError> {
        let bell: &[u8] = match cue {
            Cue::Beep => b"\x07",
            Cue::Buzzer => b"\x07\x07",
        };
        let mut err = std::io::stderr().lock();
        err.write_all(bell)?;
        err.flush()?;
        Ok(())
    }
}

/// Keeps every cue it was asked to play.
#[derive(Debug, Default)]
pub struct RecordingCues {
    played: Mutex<Vec<Cue>>,
}

impl RecordingCues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Cue> {
        self.played
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played().iter().filter(|&&c| c == cue).count()
    }

    pub fn clear(&self) {
        if let Ok(mut p) = self.played.lock() {
            p.clear();
        }
    }
}

impl CueEmitter for RecordingCues {
    fn try_play(&self, cue: Cue) -> Result<(), CueError> {
        self.played
            .lock()
            .map_err(|e| CueError::Output(e.to_string()))?
            .push(cue);
        Ok(())
    }
}

/// Find `cue`'s file in the first directory that has it.
pub fn locate(dirs: &[PathBuf], cue: Cue) -> Option<PathBuf> {
    dirs.iter()
        .map(|d| d.join(cue.file_name()))
        .find(|p| p.is_file())
}

/// Build the emitter selected by the `[cues]` config section.
pub fn from_config(cfg: &CueConfig) -> Arc<dyn CueEmitter> {
    if !cfg.enabled {
        return Arc::new(SilentCues);
    }
    #[cfg(feature = "audio")]
    {
        let dirs: Vec<PathBuf> = cfg.sound_dirs.iter().map(PathBuf::from).collect();
        if Cue::ALL_FILES.iter().any(|&c| locate(&dirs, c).is_some()) {
            return Arc::new(audio::SoundFileCues::new(dirs, cfg.volume));
        }
        tracing::info!("no cue sound files found, falling back to terminal bell");
    }
    if cfg.bell {
        Arc::new(TerminalBell)
    } else {
        Arc::new(SilentCues)
    }
}

#[cfg(feature = "audio")]
impl Cue {
    const ALL_FILES: [Cue; 2] = [Cue::Beep, Cue::Buzzer];
}

#[cfg(feature = "audio")]
pub mod audio {
    //! `rodio` playback on a dedicated thread. The output stream is not
    //! `Send`, so the emitter talks to it over a channel.

    use std::fs::File;
    use std::io::BufReader;
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Sender};
    use std::sync::Mutex;
    use std::thread;

    use rodio::{Decoder, OutputStream, Sink};

    use super::{locate, Cue, CueEmitter, CueError};

    pub struct SoundFileCues {
        dirs: Vec<PathBuf>,
        tx: Mutex<Option<Sender<PathBuf>>>,
        volume: f32,
    }

    impl SoundFileCues {
        pub fn new(dirs: Vec<PathBuf>, volume: u32) -> Self {
            Self {
                dirs,
                tx: Mutex::new(None),
                volume: (volume.min(100) as f32) / 100.0,
            }
        }

        fn sender(&self) -> Result<Sender<PathBuf>, CueError> {
            let mut guard = self.tx.lock().map_err(|e| CueError::Output(e.to_string()))?;
            if let Some(tx) = guard.as_ref() {
                return Ok(tx.clone());
            }

            let (tx, rx) = mpsc::channel::<PathBuf>();
            let volume = self.volume;
            thread::Builder::new()
                .name("cue-audio".to_string())
                .spawn(move || {
                    let Ok((_stream, handle)) = OutputStream::try_default() else {
                        tracing::warn!("no default audio output; cues disabled");
                        return;
                    };
                    let mut current: Option<Sink> = None;
                    while let Ok(path) = rx.recv() {
                        if let Some(old) = current.take() {
                            old.stop();
                        }
                        let source = File::open(&path)
                            .map_err(|e| e.to_string())
                            .and_then(|f| Decoder::new(BufReader::new(f)).map_err(|e| e.to_string()));
                        let sink = Sink::try_new(&handle).map_err(|e| e.to_string());
                        match (source, sink) {
                            (Ok(source), Ok(sink)) => {
                                sink.set_volume(volume);
                                sink.append(source);
                                current = Some(sink);
                            }
                            (Err(e), _) | (_, Err(e)) => {
                                tracing::warn!(path = %path.display(), error = %e, "cue playback failed");
                            }
                        }
                    }
                })?;
            *guard = Some(tx.clone());
            Ok(tx)
        }
    }

    impl CueEmitter for SoundFileCues {
        fn try_play(&self, cue: Cue) -> Result<(), CueError> {
            let path = locate(&self.dirs, cue).ok_or(CueError::Missing(cue.as_str()))?;
            self.sender()?
                .send(path)
                .map_err(|e| CueError::Output(e.to_string()))
        }
    }
}
