//! Particle Field
//!
//! Decorative field of drifting points joined by proximity lines, rendered on
//! the CPU and presented in a window.

mod config;
mod error;
mod host;

use config::AppConfig;
use error::AppError;
use field_renderer::{Canvas, Presenter};
use field_simulation::{Animator, FieldParams, Surface};
use host::WinitHost;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    presenter: Presenter,

    frames_since_report: u32,
    last_report: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, AppError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // The canvas is uploaded as sRGB bytes; an sRGB target keeps them unchanged.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(AppError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let presenter = Presenter::new(&device, config.format);
        log::info!("✓ Presenter initialized ({:?})", config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            presenter,
            frames_since_report: 0,
            last_report: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn render(&mut self, canvas: &Canvas) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.presenter.render(&self.device, &self.queue, &view, canvas);
        output.present();

        self.frames_since_report += 1;
        Ok(())
    }

    /// Frames per second since the previous report, at most once a second
    fn take_fps(&mut self) -> Option<f32> {
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed < 1.0 {
            return None;
        }
        let fps = self.frames_since_report as f32 / elapsed;
        self.frames_since_report = 0;
        self.last_report = Instant::now();
        Some(fps)
    }
}

struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    animator: Animator<Canvas>,
    host: WinitHost,
    // Paused by the user; a resize must not restart the field
    paused: bool,
    error: Option<AppError>,
}

impl App {
    fn new(config: AppConfig, params: FieldParams) -> Self {
        let animator = match config.field.seed {
            Some(seed) => Animator::with_seed(params, seed),
            None => Animator::new(params),
        };
        Self {
            config,
            window: None,
            gpu_state: None,
            animator,
            host: WinitHost::default(),
            paused: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error = Some(error);
        self.animator.stop(&mut self.host);
        event_loop.exit();
    }

    /// Size the held canvas to the window and start if not already running
    fn resume_field(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let size = window.inner_size();
        if let Some(canvas) = self.animator.surface_mut() {
            canvas.set_size(size.width, size.height);
        }
        self.animator.resume(&mut self.host);
    }

    fn update_title(&mut self) {
        if !self.config.debug.show_fps {
            return;
        }
        let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) else {
            return;
        };
        if let Some(fps) = gpu_state.take_fps() {
            window.set_title(&format!(
                "{} - {:.0} FPS - {} particles",
                self.config.window.title,
                fps,
                self.animator.particles().len()
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match pollster::block_on(GpuState::new(window.clone(), self.config.window.vsync)) {
            Ok(gpu_state) => self.gpu_state = Some(gpu_state),
            Err(e) => return self.fail(event_loop, e),
        }

        self.host.attach(window.clone());
        let size = window.inner_size();
        self.window = Some(window);
        self.animator
            .start(Canvas::new(size.width, size.height), &mut self.host);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.animator.stop(&mut self.host);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if self.animator.is_running() {
                    self.paused = true;
                    self.animator.stop(&mut self.host);
                } else {
                    self.paused = false;
                    self.resume_field();
                }
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if self.host.wants_resize() {
                    self.animator.resize(physical_size.width, physical_size.height);
                } else if !self.paused {
                    // A zero-sized window skips start; retry once it has area.
                    self.resume_field();
                }
            }

            WindowEvent::RedrawRequested => {
                if self.host.take_due_frame().is_some() {
                    self.animator.frame(&mut self.host);
                }

                let mut out_of_memory = false;
                if let (Some(window), Some(gpu_state), Some(canvas)) = (
                    &self.window,
                    &mut self.gpu_state,
                    self.animator.surface(),
                ) {
                    match gpu_state.render(canvas) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
                if out_of_memory {
                    log::error!("Out of GPU memory");
                    self.animator.stop(&mut self.host);
                    event_loop.exit();
                    return;
                }

                self.update_title();
            }

            _ => {}
        }
    }
}

fn run(config: AppConfig) -> Result<(), AppError> {
    let params = config.field.params()?;
    log::info!("Starting particle field ({:?} preset)...", config.field.preset);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, params);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    let config = AppConfig::load();

    // Initialize logger (RUST_LOG=debug for verbose output)
    let level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match config.map_err(AppError::from).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
