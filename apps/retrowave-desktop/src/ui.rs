use crate::app::{AppState, MusicDialog};
use egui::Context as EguiContext;
use retrowave_audio::{EntryKind, MusicBrowser, Playback};
use retrowave_scene::{GRID_SIZE_RANGE, SUN_DEPTH_RANGE, SUN_SIZE_RANGE, SUN_SPEED_RANGE};
use std::path::PathBuf;

/// How the music picker was closed this frame.
enum DialogOutcome {
    Chosen(PathBuf),
    Cancelled,
}

impl<P: Playback> AppState<P> {
    /// Build the overlay windows for this frame.
    pub fn draw_ui(&mut self, ctx: &EguiContext) {
        let mut restart = false;
        let mut change = false;
        egui::Window::new("GeneralUI")
            .default_pos([10.0, 10.0])
            .show(ctx, |ui| {
                ui.label(self.stats.summary().to_string());
                ui.label(format!("Current Music: {}", self.music.current_label()));
                ui.horizontal(|ui| {
                    restart = ui.button("Restart Music").clicked();
                    let idle = self.music_dialog.is_none();
                    change = ui
                        .add_enabled(idle, egui::Button::new("Change Music"))
                        .clicked();
                });
                ui.small("WASD: Move | L: Wireframe | Alt: Free Cursor | Esc: Quit");
            });
        if restart {
            self.restart_music();
        }
        if change {
            self.open_music_dialog();
        }

        let outcome = self.music_dialog.as_mut().and_then(|d| music_dialog(ctx, d));
        if let Some(outcome) = outcome {
            match outcome {
                DialogOutcome::Chosen(path) => self.finish_music_dialog(Some(path)),
                DialogOutcome::Cancelled => self.finish_music_dialog(None),
            }
        }

        egui::Window::new("Grid Parameters")
            .default_pos([10.0, 160.0])
            .show(ctx, |ui| {
                ui.add(
                    egui::Slider::new(&mut self.params.grid_size, GRID_SIZE_RANGE).text("GridSize"),
                );
            });

        egui::Window::new("RetroSun Parameters")
            .default_pos([10.0, 240.0])
            .show(ctx, |ui| {
                ui.add(
                    egui::Slider::new(&mut self.params.sun_speed, SUN_SPEED_RANGE)
                        .text("AnimationSpeed"),
                );
                ui.add(
                    egui::Slider::new(&mut self.params.sun_depth, SUN_DEPTH_RANGE).text("SunDepth"),
                );
                ui.add(egui::Slider::new(&mut self.params.sun_size, SUN_SIZE_RANGE).text("Size"));
            });
    }
}

#[derive(Debug, Clone, Copy)]
enum Navigation {
    Up,
    Activate(usize),
}

/// Move the picker. A failed step is logged and leaves the listing as it was.
fn navigate(browser: &mut MusicBrowser, step: Navigation) -> bool {
    let result = match step {
        Navigation::Up => browser.up(),
        Navigation::Activate(index) => browser.activate(index),
    };
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("cannot navigate from {}: {e}", browser.dir().display());
            false
        }
    }
}

fn music_dialog(ctx: &EguiContext, dialog: &mut MusicDialog) -> Option<DialogOutcome> {
    let mut outcome = None;
    let mut open = true;

    egui::Window::new("Choose Music File")
        .open(&mut open)
        .collapsible(false)
        .default_size([420.0, 360.0])
        .show(ctx, |ui| {
            let browser = match &mut dialog.browser {
                Ok(browser) => browser,
                Err(message) => {
                    ui.colored_label(egui::Color32::LIGHT_RED, message.as_str());
                    if ui.button("Cancel").clicked() {
                        outcome = Some(DialogOutcome::Cancelled);
                    }
                    return;
                }
            };

            ui.horizontal(|ui| {
                if ui.button("Up").clicked() {
                    navigate(browser, Navigation::Up);
                }
                ui.label(browser.dir().display().to_string());
            });
            ui.separator();

            let mut activated = None;
            egui::ScrollArea::vertical()
                .max_height(260.0)
                .show(ui, |ui| {
                    for (index, entry) in browser.entries().iter().enumerate() {
                        let label = match entry.kind {
                            EntryKind::Directory => format!("[{}]", entry.name),
                            EntryKind::Track => entry.name.clone(),
                        };
                        let selected = browser.selected_index() == Some(index);
                        if ui.selectable_label(selected, label).clicked() {
                            activated = Some(index);
                        }
                    }
                });
            if let Some(index) = activated {
                navigate(browser, Navigation::Activate(index));
            }

            ui.separator();
            ui.horizontal(|ui| {
                let pick = browser.selected_track().map(|p| p.to_path_buf());
                if ui
                    .add_enabled(pick.is_some(), egui::Button::new("OK"))
                    .clicked()
                {
                    outcome = pick.map(DialogOutcome::Chosen);
                }
                if ui.button("Cancel").clicked() {
                    outcome = Some(DialogOutcome::Cancelled);
                }
            });
        });

    if !open && outcome.is_none() {
        outcome = Some(DialogOutcome::Cancelled);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::{Navigation, navigate};
    use crate::app::tests::state_with;
    use retrowave_audio::MusicBrowser;
    use retrowave_config::AppConfig;

    fn run_frame<P: retrowave_audio::Playback>(state: &mut crate::app::AppState<P>) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| state.draw_ui(ctx));
    }

    #[test]
    fn overlay_builds_without_touching_state() {
        let mut state = state_with(&AppConfig::default());
        let params = state.params;
        run_frame(&mut state);
        assert_eq!(state.params, params);
        assert!(state.music.backend().played.is_empty());
        assert!(state.music_dialog.is_none());
    }

    #[test]
    fn overlay_builds_with_dialog_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("album")).unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        let config = AppConfig {
            assets_dir: dir.path().to_path_buf(),
            music_dir: ".".into(),
            ..AppConfig::default()
        };
        let mut state = state_with(&config);
        state.open_music_dialog();
        run_frame(&mut state);
        assert!(state.music_dialog.is_some());
    }

    #[test]
    fn failed_navigation_keeps_listing() {
        let dir = tempfile::tempdir().unwrap();
        let album = dir.path().join("album");
        std::fs::create_dir(&album).unwrap();
        let mut browser = MusicBrowser::open(dir.path()).unwrap();
        std::fs::remove_dir(&album).unwrap();

        assert!(!navigate(&mut browser, Navigation::Activate(0)));
        assert_eq!(browser.dir(), dir.path());
        assert_eq!(browser.entries().len(), 1);
    }

    #[test]
    fn up_from_removed_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let album = dir.path().join("album");
        std::fs::create_dir(&album).unwrap();
        let mut browser = MusicBrowser::open(&album).unwrap();
        std::fs::remove_dir(&album).unwrap();

        assert!(!navigate(&mut browser, Navigation::Up));
        assert_eq!(browser.dir(), album.as_path());
    }

    #[test]
    fn navigation_enters_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("album")).unwrap();
        let mut browser = MusicBrowser::open(dir.path()).unwrap();

        assert!(navigate(&mut browser, Navigation::Activate(0)));
        assert_eq!(browser.dir(), dir.path().join("album").as_path());
        assert!(navigate(&mut browser, Navigation::Up));
    }
}
