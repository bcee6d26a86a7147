use clap::{Parser, Subcommand};
use retrowave_assets::face_paths;
use retrowave_config::{AppConfig, Overrides};
use retrowave_render::{DebugTextRenderer, FrameInputs, FramePlan, Renderer};
use retrowave_scene::{FlyCamera, SceneParams};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retrowave-cli", about = "Headless helper for retrowave")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Report which asset files the desktop app will find
    CheckAssets {
        /// Optional YAML configuration file, as given to the desktop app
        #[arg(long)]
        config: Option<PathBuf>,
        /// Assets directory (overrides the config file)
        #[arg(long)]
        assets: Option<PathBuf>,
    },
    /// Print the frame plan for the default camera and parameters
    Plan {
        /// Seconds since startup
        #[arg(short, long, default_value = "0")]
        time: f32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Where one scene mesh comes from.
#[derive(Debug, PartialEq)]
enum ModelSource {
    Builtin,
    File { path: PathBuf, found: bool },
}

/// Presence of the files the desktop app reads.
#[derive(Debug)]
struct AssetReport {
    faces: Vec<(PathBuf, bool)>,
    models: Vec<(&'static str, ModelSource)>,
    track: PathBuf,
    track_found: bool,
}

impl AssetReport {
    fn cubemap_complete(&self) -> bool {
        self.faces.iter().all(|(_, found)| *found)
    }
}

fn check_assets(config: &AppConfig) -> AssetReport {
    let faces = face_paths(config.cubemap_path())
        .into_iter()
        .map(|path| {
            let found = path.is_file();
            (path, found)
        })
        .collect();

    let models = [
        ("grid", &config.models.grid),
        ("skybox", &config.models.skybox),
        ("quad", &config.models.quad),
    ]
    .into_iter()
    .map(|(name, model)| {
        let source = match config.model_path(model) {
            Some(path) => {
                let found = path.is_file();
                ModelSource::File { path, found }
            }
            None => ModelSource::Builtin,
        };
        (name, source)
    })
    .collect();

    let track = config.default_music_path();
    let track_found = track.is_file();
    AssetReport {
        faces,
        models,
        track,
        track_found,
    }
}

fn default_plan(time: f32) -> FramePlan {
    let mut camera = FlyCamera::default();
    camera.set_viewport(1920, 1080);
    FramePlan::build(&FrameInputs {
        view: camera.view_matrix(),
        projection: camera.projection_matrix(),
        params: SceneParams::default(),
        elapsed: time,
        wireframe: false,
    })
}

fn status(found: bool) -> &'static str {
    if found { "ok" } else { "MISSING" }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("retrowave-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: {}", retrowave_scene::crate_info());
            println!("input: {}", retrowave_input::crate_info());
            println!("assets: {}", retrowave_assets::crate_info());
            println!("audio: {}", retrowave_audio::crate_info());
            println!("render: {}", retrowave_render::crate_info());
            println!("tools: {}", retrowave_tools::crate_info());
            println!("config: {}", retrowave_config::crate_info());
        }
        Commands::CheckAssets { config, assets } => {
            let overrides = Overrides {
                assets_dir: assets,
                ..Overrides::default()
            };
            let config = AppConfig::resolve(config.as_deref(), &overrides)?;
            tracing::debug!("checking assets under {}", config.assets_dir.display());
            let report = check_assets(&config);

            println!("Cubemap faces:");
            for (path, found) in &report.faces {
                println!("  {:<8} {}", status(*found), path.display());
            }
            println!("Models:");
            for (name, source) in &report.models {
                match source {
                    ModelSource::Builtin => println!("  {:<8} {name}: built-in", "ok"),
                    ModelSource::File { path, found } => {
                        let note = if *found { "" } else { " (built-in fallback)" };
                        println!(
                            "  {:<8} {name}: {}{note}",
                            status(*found),
                            path.display()
                        );
                    }
                }
            }
            println!("Default track:");
            println!("  {:<8} {}", status(report.track_found), report.track.display());

            if !report.cubemap_complete() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Plan { time, json } => {
            let plan = default_plan(time);
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&plan));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrowave_assets::FACE_FILES;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            assets_dir: dir.to_path_buf(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn empty_assets_dir_is_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let report = check_assets(&config_in(dir.path()));
        assert_eq!(report.faces.len(), 6);
        assert!(!report.cubemap_complete());
        assert!(report.models.iter().all(|(_, s)| *s == ModelSource::Builtin));
        assert!(!report.track_found);
        assert_eq!(report.track, dir.path().join("music/Invincible.mp3"));
    }

    #[test]
    fn follows_configured_paths() {
        let dir = tempfile::tempdir().unwrap();
        let cube = dir.path().join("sky");
        std::fs::create_dir(&cube).unwrap();
        for name in FACE_FILES {
            std::fs::write(cube.join(name), b"").unwrap();
        }
        std::fs::write(dir.path().join("plane.obj"), b"").unwrap();
        std::fs::write(dir.path().join("song.ogg"), b"").unwrap();

        let yaml = dir.path().join("retrowave.yaml");
        std::fs::write(
            &yaml,
            "cubemap_dir: sky\n\
             default_music: song.ogg\n\
             models:\n  quad: plane.obj\n  skybox: missing.obj\n",
        )
        .unwrap();
        let overrides = Overrides {
            assets_dir: Some(dir.path().to_path_buf()),
            ..Overrides::default()
        };
        let config = AppConfig::resolve(Some(yaml.as_path()), &overrides).unwrap();
        let report = check_assets(&config);

        assert!(report.cubemap_complete());
        assert!(report.track_found);
        assert_eq!(report.models[0], ("grid", ModelSource::Builtin));
        assert_eq!(
            report.models[1],
            (
                "skybox",
                ModelSource::File {
                    path: dir.path().join("missing.obj"),
                    found: false
                }
            )
        );
        assert_eq!(
            report.models[2],
            (
                "quad",
                ModelSource::File {
                    path: dir.path().join("plane.obj"),
                    found: true
                }
            )
        );
    }

    #[test]
    fn plan_dump_lists_three_draws() {
        let text = DebugTextRenderer::new().render(&default_plan(1.0));
        assert!(text.starts_with("=== Frame (draws=3"));
        assert!(text.contains("Skybox"));
        assert!(text.contains("time=2.000"));
    }
}
