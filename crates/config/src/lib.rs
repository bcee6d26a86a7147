//! Configuration shared by the retrowave desktop app and CLI.
//!
//! An optional YAML file is layered under command-line overrides. Asset
//! paths are stored relative to `assets_dir` and resolved on demand.

use anyhow::{Context, Result};
use retrowave_scene::SceneParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional OBJ overrides for the built-in meshes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPaths {
    pub grid: Option<PathBuf>,
    pub skybox: Option<PathBuf>,
    pub quad: Option<PathBuf>,
}

/// Application configuration, read from an optional YAML file.
///
/// Relative paths other than `assets_dir` itself are resolved against
/// `assets_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub assets_dir: PathBuf,
    /// Directory holding `posx.jpg` .. `negz.jpg`.
    pub cubemap_dir: PathBuf,
    /// Where the music picker starts.
    pub music_dir: PathBuf,
    /// Track looped at startup.
    pub default_music: PathBuf,
    pub models: ModelPaths,
    pub fullscreen: bool,
    pub msaa_samples: u32,
    /// Initial slider values.
    pub scene: SceneParams,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            cubemap_dir: PathBuf::from("textures/cube/Purple"),
            music_dir: PathBuf::from("music"),
            default_music: PathBuf::from("music/Invincible.mp3"),
            models: ModelPaths::default(),
            fullscreen: true,
            msaa_samples: 4,
            scene: SceneParams::default(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub assets_dir: Option<PathBuf>,
    pub music: Option<PathBuf>,
    pub windowed: bool,
}

impl AppConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text).context("invalid config")?;
        Ok(config.normalized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Build the effective configuration: file (if any), then overrides.
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.assets_dir {
            self.assets_dir = dir.clone();
        }
        if let Some(music) = &overrides.music {
            self.default_music = music.clone();
        }
        if overrides.windowed {
            self.fullscreen = false;
        }
    }

    fn normalized(mut self) -> Self {
        self.scene = self.scene.clamped();
        self.msaa_samples = self.msaa_samples.max(1);
        self
    }

    /// Resolve `path` against the assets directory unless it is absolute.
    pub fn asset_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.assets_dir.join(path)
        }
    }

    pub fn cubemap_path(&self) -> PathBuf {
        self.asset_path(&self.cubemap_dir)
    }

    pub fn music_path(&self) -> PathBuf {
        self.asset_path(&self.music_dir)
    }

    pub fn default_music_path(&self) -> PathBuf {
        self.asset_path(&self.default_music)
    }

    pub fn model_path(&self, model: &Option<PathBuf>) -> Option<PathBuf> {
        model.as_deref().map(|p| self.asset_path(p))
    }
}

pub fn crate_info() -> &'static str {
    "retrowave-config v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert!(config.fullscreen);
        assert_eq!(config.msaa_samples, 4);
        assert_eq!(
            config.cubemap_path(),
            PathBuf::from("assets/textures/cube/Purple")
        );
        assert_eq!(
            config.default_music_path(),
            PathBuf::from("assets/music/Invincible.mp3")
        );
        assert_eq!(config.model_path(&config.models.grid), None);
    }

    #[test]
    fn partial_yaml_is_clamped() {
        let config = AppConfig::from_yaml(
            "fullscreen: false\n\
             msaa_samples: 0\n\
             scene:\n  grid_size: 9.0\n\
             models:\n  skybox: models/flippedCube.obj\n",
        )
        .unwrap();
        assert!(!config.fullscreen);
        assert_eq!(config.msaa_samples, 1);
        assert_eq!(config.scene.grid_size, 5.0);
        assert_eq!(config.scene.sun_size, 2.0);
        assert_eq!(
            config.model_path(&config.models.skybox),
            Some(PathBuf::from("assets/models/flippedCube.obj"))
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = AppConfig {
            default_music: PathBuf::from("/srv/music/track.mp3"),
            ..AppConfig::default()
        };
        assert_eq!(
            config.default_music_path(),
            PathBuf::from("/srv/music/track.mp3")
        );
    }

    #[test]
    fn overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "assets_dir: data\nfullscreen: true").unwrap();
        let config = AppConfig::resolve(
            Some(file.path()),
            &Overrides {
                assets_dir: Some(PathBuf::from("other")),
                music: Some(PathBuf::from("song.ogg")),
                windowed: true,
            },
        )
        .unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("other"));
        assert!(!config.fullscreen);
        assert_eq!(config.default_music_path(), PathBuf::from("other/song.ogg"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let path = Path::new("/nonexistent/retrowave.yaml");
        let err = AppConfig::resolve(Some(path), &Overrides::default()).unwrap_err();
        assert!(format!("{err:#}").contains("retrowave.yaml"));
    }
}
