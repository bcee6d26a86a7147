mod app;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::Parser;
use egui::Context as EguiContext;
use retrowave_assets::{CubemapFaces, SceneMeshes};
use retrowave_audio::{MusicPlayer, RodioPlayback};
use retrowave_config::{AppConfig, Overrides};
use retrowave_input::Action;
use retrowave_render_wgpu::{GpuContext, RetrowaveRenderer};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowId};

const WINDOWED_SIZE: PhysicalSize<u32> = PhysicalSize::new(1920, 1080);
/// Exit status when the window or GPU context cannot be created.
const GPU_FAILURE_EXIT: u8 = 255;

#[derive(Parser)]
#[command(name = "retrowave", about = "Neon grid, retro sun and skybox with looping music")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Optional YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Assets directory (overrides the config file)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Track to loop at startup
    #[arg(long)]
    music: Option<PathBuf>,

    /// Open a 1920x1080 window instead of going fullscreen
    #[arg(long)]
    windowed: bool,
}

/// GPU resources tied to the window; created in `resumed`.
struct GpuState {
    window: Arc<Window>,
    ctx: GpuContext,
    renderer: RetrowaveRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    config: AppConfig,
    state: AppState,
    gpu: Option<GpuState>,
    egui_ctx: EguiContext,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: AppConfig, music: MusicPlayer) -> Self {
        Self {
            state: AppState::new(&config, music),
            config,
            gpu: None,
            egui_ctx: EguiContext::default(),
            fatal: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<GpuState> {
        let attrs = Window::default_attributes()
            .with_title("Retrowave")
            .with_resizable(false);
        let attrs = if self.config.fullscreen {
            attrs.with_fullscreen(Some(Fullscreen::Borderless(event_loop.primary_monitor())))
        } else {
            attrs.with_inner_size(WINDOWED_SIZE)
        };
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let ctx = GpuContext::new(window.clone(), self.config.msaa_samples)
            .context("failed to create GPU context")?;
        let (width, height) = ctx.size();
        self.state.camera.set_viewport(width, height);

        let models = &self.config.models;
        let meshes = SceneMeshes::load(
            self.config.model_path(&models.grid).as_deref(),
            self.config.model_path(&models.skybox).as_deref(),
            self.config.model_path(&models.quad).as_deref(),
        );
        let cubemap = CubemapFaces::load(self.config.cubemap_path());
        let renderer = RetrowaveRenderer::new(&ctx, &meshes, &cubemap);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.format(), None, 1, false);

        set_cursor_free(&window, self.state.input.cursor_free());

        Ok(GpuState {
            window,
            ctx,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn apply_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        match action {
            Action::Quit => event_loop.exit(),
            Action::SetWireframe(on) => {
                let supported = self
                    .gpu
                    .as_ref()
                    .is_some_and(|gpu| gpu.renderer.wireframe_supported());
                if on && !supported {
                    tracing::warn!("wireframe requested but not supported by this GPU");
                } else {
                    tracing::debug!("wireframe {}", if on { "on" } else { "off" });
                }
            }
            Action::SetCursorFree(free) => {
                if let Some(gpu) = &self.gpu {
                    set_cursor_free(&gpu.window, free);
                }
            }
        }
    }

    fn redraw(&mut self) {
        let frame = self.state.update();

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let output = match gpu.ctx.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.ctx.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let plan = self.state.frame_plan(frame.elapsed);
        gpu.renderer
            .render(&gpu.ctx.device, &gpu.ctx.queue, &view, &plan);

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let (width, height) = gpu.ctx.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = &gpu.ctx.device;
        let queue = &gpu.ctx.queue;
        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        gpu.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                if let Err(e) = self.state.music.play() {
                    tracing::error!("failed to play music: {e}");
                }
            }
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let gui_consumed = match &mut self.gpu {
            Some(gpu) => gpu.egui_winit.on_window_event(&gpu.window, &event).consumed,
            None => false,
        };
        if gui_consumed && !matches!(event, WindowEvent::KeyboardInput { .. }) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.ctx.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.ctx.size();
                    gpu.renderer.resize(&gpu.ctx.device, width, height);
                    self.state.camera.set_viewport(width, height);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.input.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                let action = self.state.input.handle_gui_key(key, pressed, gui_consumed);
                if let Some(action) = action {
                    self.apply_action(event_loop, action);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some((dx, dy)) = self.state.input.look_delta(delta.0, delta.1) {
                self.state.camera.rotate(dx, dy);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

/// Locked (or confined) hidden cursor for mouse look; visible and free for
/// the GUI.
fn set_cursor_free(window: &Window, free: bool) {
    if free {
        if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            tracing::debug!("cannot release cursor: {e}");
        }
        window.set_cursor_visible(true);
    } else {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cannot grab cursor: {e}");
        }
        window.set_cursor_visible(false);
    }
}

/// Why the app stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Window closed or Escape pressed.
    Finished,
    /// No audio output device; nothing to show without music.
    NoAudio,
    /// Configuration could not be read.
    BadConfig,
    /// Event loop, window or GPU context could not be created.
    NoWindow,
}

impl Outcome {
    fn exit_status(self) -> u8 {
        match self {
            Outcome::Finished | Outcome::NoAudio => 0,
            Outcome::BadConfig => 1,
            Outcome::NoWindow => GPU_FAILURE_EXIT,
        }
    }
}

fn run(cli: Cli) -> Outcome {
    let overrides = Overrides {
        assets_dir: cli.assets,
        music: cli.music,
        windowed: cli.windowed,
    };
    let config = match AppConfig::resolve(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return Outcome::BadConfig;
        }
    };
    tracing::debug!(?config, "configuration");

    let playback = match RodioPlayback::open_default() {
        Ok(playback) => playback,
        Err(e) => {
            tracing::error!("could not start up audio engine: {e}");
            return Outcome::NoAudio;
        }
    };
    let music = MusicPlayer::new(playback, config.default_music_path());

    let mut app = GpuApp::new(config, music);
    if let Err(e) = run_event_loop(&mut app) {
        tracing::error!("{e:#}");
        return Outcome::NoWindow;
    }
    if let Some(e) = app.fatal {
        tracing::error!("{e:#}");
        return Outcome::NoWindow;
    }
    Outcome::Finished
}

fn run_event_loop(app: &mut GpuApp) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(app).context("event loop failed")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("retrowave starting");

    ExitCode::from(run(cli).exit_status())
}
