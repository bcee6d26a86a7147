//! Background music for the retrowave demo.
//!
//! One process-wide [`MusicPlayer`] loops a single track through rodio. The
//! GUI restarts it, stops it while a new track is picked with the
//! [`MusicBrowser`], and starts the picked track.

mod browser;
mod player;

use std::path::PathBuf;

pub use browser::{AUDIO_EXTENSIONS, BrowserEntry, EntryKind, MusicBrowser, is_audio_file};
pub use player::{MusicPlayer, Playback, RodioPlayback};

/// Errors from audio operations.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("could not open audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("could not create playback sink: {0}")]
    Play(#[from] rodio::PlayError),
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

pub fn crate_info() -> &'static str {
    "retrowave-audio v0.1.0"
}
