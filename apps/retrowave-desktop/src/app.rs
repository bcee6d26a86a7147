use retrowave_audio::{MusicBrowser, MusicPlayer, Playback, RodioPlayback};
use retrowave_config::AppConfig;
use retrowave_input::{InputState, Movement};
use retrowave_render::{FrameInputs, FramePlan};
use retrowave_scene::{FlyCamera, FrameClock, FrameTime, SceneParams};
use retrowave_tools::FrameStats;
use std::path::{Path, PathBuf};

/// State of the "Choose Music File" window while it is open.
pub struct MusicDialog {
    pub browser: Result<MusicBrowser, String>,
}

impl MusicDialog {
    pub fn open(dir: &Path) -> Self {
        let browser = MusicBrowser::open(dir).map_err(|e| {
            tracing::warn!("cannot open music directory {}: {e}", dir.display());
            format!("cannot open {}: {e}", dir.display())
        });
        Self { browser }
    }
}

/// Everything the frame loop mutates that is not a GPU resource.
pub struct AppState<P: Playback = RodioPlayback> {
    pub camera: FlyCamera,
    pub params: SceneParams,
    pub input: InputState,
    pub clock: FrameClock,
    pub stats: FrameStats,
    pub music: MusicPlayer<P>,
    pub music_dialog: Option<MusicDialog>,
    music_dir: PathBuf,
}

impl<P: Playback> AppState<P> {
    pub fn new(config: &AppConfig, music: MusicPlayer<P>) -> Self {
        Self {
            camera: FlyCamera::default(),
            params: config.scene.clamped(),
            input: InputState::new(),
            clock: FrameClock::new(),
            stats: FrameStats::new(),
            music,
            music_dialog: None,
            music_dir: config.music_path(),
        }
    }

    /// Advance the clock and move the camera by the held keys.
    pub fn update(&mut self) -> FrameTime {
        let frame = self.clock.tick();
        self.record_frame(frame);
        frame
    }

    /// Feed one frame's timing to the stats and the camera. Stats see the
    /// real frame time, movement the clamped one.
    pub fn record_frame(&mut self, frame: FrameTime) {
        self.stats.record(frame.raw_delta);
        self.apply_movement(frame.delta);
    }

    pub fn apply_movement(&mut self, dt: f32) {
        let moves: Vec<Movement> = self.input.held_movements().collect();
        for movement in moves {
            match movement {
                Movement::Forward => self.camera.move_forward(dt),
                Movement::Backward => self.camera.move_backward(dt),
                Movement::Left => self.camera.move_left(dt),
                Movement::Right => self.camera.move_right(dt),
            }
        }
    }

    pub fn frame_plan(&self, elapsed: f32) -> FramePlan {
        FramePlan::build(&FrameInputs {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            params: self.params,
            elapsed,
            wireframe: self.input.wireframe(),
        })
    }

    pub fn restart_music(&mut self) {
        if let Err(e) = self.music.restart() {
            tracing::error!("failed to restart music: {e}");
        }
    }

    /// Silence playback and show the file picker.
    pub fn open_music_dialog(&mut self) {
        self.music.stop_all();
        self.music_dialog = Some(MusicDialog::open(&self.music_dir));
    }

    /// Close the picker. `Some` plays the picked track, `None` resumes the
    /// current one.
    pub fn finish_music_dialog(&mut self, choice: Option<PathBuf>) {
        self.music_dialog = None;
        let result = match choice {
            Some(path) => self.music.choose(path),
            None => self.music.cancel_choice(),
        };
        if let Err(e) = result {
            tracing::error!("failed to play music: {e}");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use retrowave_audio::AudioError;
    use winit::keyboard::KeyCode;

    #[derive(Debug, Default)]
    pub(crate) struct FakePlayback {
        pub played: Vec<PathBuf>,
        pub stops: usize,
    }

    impl Playback for FakePlayback {
        fn play_looped(&mut self, path: &Path) -> Result<(), AudioError> {
            self.played.push(path.to_path_buf());
            Ok(())
        }

        fn stop_all(&mut self) {
            self.stops += 1;
        }
    }

    pub(crate) fn state_with(config: &AppConfig) -> AppState<FakePlayback> {
        let player = MusicPlayer::new(FakePlayback::default(), config.default_music_path());
        AppState::new(config, player)
    }

    #[test]
    fn held_keys_move_camera() {
        let mut state = state_with(&AppConfig::default());
        let start = state.camera.position;
        state.input.handle_key(KeyCode::KeyW, true);
        state.apply_movement(1.0);
        assert!(state.camera.position.z < start.z);
        assert_eq!(state.camera.position.y, start.y);

        state.input.handle_key(KeyCode::KeyW, false);
        let here = state.camera.position;
        state.apply_movement(1.0);
        assert_eq!(state.camera.position, here);
    }

    #[test]
    fn slow_frames_are_reported_unclamped() {
        let mut state = state_with(&AppConfig::default());
        state.input.handle_key(KeyCode::KeyW, true);
        let start = state.camera.position;
        state.record_frame(FrameTime {
            elapsed: 0.25,
            delta: 0.1,
            raw_delta: 0.25,
        });

        let summary = state.stats.summary();
        assert!((summary.frame_ms - 250.0).abs() < 1e-3);
        assert!((summary.fps - 4.0).abs() < 1e-3);
        let moved = start.z - state.camera.position.z;
        assert!((moved - state.camera.speed * 0.1).abs() < 1e-4);
    }

    #[test]
    fn plan_reflects_sliders_and_wireframe() {
        let mut state = state_with(&AppConfig::default());
        state.params.sun_speed = 3.0;
        state.input.handle_key(KeyCode::KeyL, true);
        let plan = state.frame_plan(2.0);
        assert!(plan.wireframe);
        assert_eq!(plan.draws.last().unwrap().time, 6.0);
    }

    #[test]
    fn choosing_music_plays_the_pick() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("song.ogg"), b"").unwrap();
        let config = AppConfig {
            assets_dir: dir.path().to_path_buf(),
            music_dir: PathBuf::from("."),
            ..AppConfig::default()
        };
        let mut state = state_with(&config);

        state.open_music_dialog();
        assert_eq!(state.music.backend().stops, 1);
        let dialog = state.music_dialog.as_ref().unwrap();
        assert_eq!(dialog.browser.as_ref().unwrap().entries().len(), 1);

        let pick = dir.path().join("song.ogg");
        state.finish_music_dialog(Some(pick.clone()));
        assert!(state.music_dialog.is_none());
        assert_eq!(state.music.current_label(), "song.ogg");
        assert_eq!(state.music.backend().played, vec![pick]);
    }

    #[test]
    fn cancelling_resumes_current_track() {
        let config = AppConfig::default();
        let mut state = state_with(&config);
        state.open_music_dialog();
        assert!(state.music_dialog.as_ref().unwrap().browser.is_err());

        state.finish_music_dialog(None);
        assert_eq!(state.music.current_label(), "Default");
        assert_eq!(
            state.music.backend().played,
            vec![config.default_music_path()]
        );
    }
}
