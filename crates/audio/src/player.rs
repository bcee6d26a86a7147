use crate::AudioError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Something that can loop one track at a time.
pub trait Playback {
    /// Stop whatever is playing and loop `path` until told otherwise.
    fn play_looped(&mut self, path: &Path) -> Result<(), AudioError>;

    /// Silence all playback.
    fn stop_all(&mut self);
}

/// rodio output device with a single sink.
///
/// The output stream must outlive the sink, so both are kept together.
pub struct RodioPlayback {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl RodioPlayback {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }
}

impl Playback for RodioPlayback {
    fn play_looped(&mut self, path: &Path) -> Result<(), AudioError> {
        self.stop_all();

        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new_looped(BufReader::new(file))?;
        let sink = Sink::try_new(&self.handle)?;
        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }

    fn stop_all(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

/// Music state driven by the GUI: which track is current and what to call it.
pub struct MusicPlayer<P: Playback = RodioPlayback> {
    backend: P,
    current: PathBuf,
    chosen_name: Option<String>,
}

impl<P: Playback> MusicPlayer<P> {
    pub fn new(backend: P, default_track: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            current: default_track.into(),
            chosen_name: None,
        }
    }

    /// Start looping the current track.
    pub fn play(&mut self) -> Result<(), AudioError> {
        tracing::info!("playing {}", self.current.display());
        self.backend.play_looped(&self.current)
    }

    /// Stop everything, then loop the current track from the beginning.
    pub fn restart(&mut self) -> Result<(), AudioError> {
        self.backend.stop_all();
        self.play()
    }

    pub fn stop_all(&mut self) {
        self.backend.stop_all();
    }

    /// Make `path` the current track and start it.
    pub fn choose(&mut self, path: impl Into<PathBuf>) -> Result<(), AudioError> {
        self.current = path.into();
        self.chosen_name = self
            .current
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.restart()
    }

    /// A track choice was abandoned: resume the current track.
    pub fn cancel_choice(&mut self) -> Result<(), AudioError> {
        self.restart()
    }

    pub fn current_track(&self) -> &Path {
        &self.current
    }

    /// File name of the chosen track, or `"Default"` before any choice.
    pub fn current_label(&self) -> &str {
        self.chosen_name.as_deref().unwrap_or("Default")
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        log: Vec<String>,
        fail: bool,
    }

    impl Playback for Recorder {
        fn play_looped(&mut self, path: &Path) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::Open {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            self.log.push(format!("play {}", path.display()));
            Ok(())
        }

        fn stop_all(&mut self) {
            self.log.push("stop".into());
        }
    }

    #[test]
    fn default_label_until_choice() {
        let mut player = MusicPlayer::new(Recorder::default(), "music/Invincible.mp3");
        assert_eq!(player.current_label(), "Default");
        player.play().unwrap();
        player.choose("music/other/Night Drive.mp3").unwrap();
        assert_eq!(player.current_label(), "Night Drive.mp3");
        assert_eq!(player.current_track(), Path::new("music/other/Night Drive.mp3"));
        assert_eq!(
            player.backend().log,
            vec![
                "play music/Invincible.mp3",
                "stop",
                "play music/other/Night Drive.mp3"
            ]
        );
    }

    #[test]
    fn restart_replays_current_track() {
        let mut player = MusicPlayer::new(Recorder::default(), "a.mp3");
        player.restart().unwrap();
        assert_eq!(player.backend().log, vec!["stop", "play a.mp3"]);
    }

    #[test]
    fn cancel_resumes_previous_track() {
        let mut player = MusicPlayer::new(Recorder::default(), "a.mp3");
        player.choose("b.ogg").unwrap();
        player.stop_all();
        player.cancel_choice().unwrap();
        assert_eq!(player.current_track(), Path::new("b.ogg"));
        assert_eq!(player.backend().log.last().unwrap(), "play b.ogg");
    }

    #[test]
    fn playback_errors_propagate() {
        let mut player = MusicPlayer::new(
            Recorder {
                fail: true,
                ..Recorder::default()
            },
            "missing.mp3",
        );
        let err = player.play().unwrap_err();
        assert!(err.to_string().contains("missing.mp3"));
    }
}
