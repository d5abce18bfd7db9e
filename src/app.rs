//! Window lifecycle, event dispatch, and the per-frame tick.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::clock::{FrameClock, RIPPLE_TIME_SCALE};
use crate::composer::FrameComposer;
use crate::gallery::Gallery;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::orbit::OrbitController;
use crate::plane_pass::PlanePass;
use crate::pointer::PointerSignal;
use crate::ripple_pass::RipplePass;
use crate::viewport::Viewport;

/// The ten images shown, in row order.
pub const IMAGE_SOURCES: [&str; 10] = [
    "assets/thumb-00.jpg",
    "assets/thumb-01.jpg",
    "assets/thumb-02.jpg",
    "assets/thumb-03.jpg",
    "assets/thumb-04.jpg",
    "assets/thumb-05.jpg",
    "assets/thumb-06.jpg",
    "assets/thumb-07.jpg",
    "assets/thumb-08.jpg",
    "assets/thumb-09.jpg",
];

/// Configuration for the showcase window.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub sources: Vec<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Filmstrip".to_string(),
            width: 1280,
            height: 720,
            sources: IMAGE_SOURCES.iter().map(PathBuf::from).collect(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn sources(mut self, sources: impl IntoIterator<Item = PathBuf>) -> Self {
        self.sources = sources.into_iter().collect();
        self
    }
}

/// Run the showcase until the window closes.
///
/// Startup failures (window creation, texture loading) are returned; GPU
/// adapter or shader failures abort via wgpu's own reporting.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ShowcaseApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        ShowcaseApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

enum ShowcaseApp {
    Pending { config: AppConfig },
    Running(Box<Running>),
    Failed(anyhow::Error),
}

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    viewport: Viewport,
    clock: FrameClock,
    last_frame: Instant,
    input: Input,
    pointer: PointerSignal,
    orbit: OrbitController,
    plane_pass: PlanePass,
    ripple_pass: RipplePass,
    composer: FrameComposer,
    gallery: Gallery,
}

impl ApplicationHandler for ShowcaseApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let ShowcaseApp::Pending { config } = self else {
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                *self = ShowcaseApp::Failed(err.into());
                event_loop.exit();
                return;
            }
        };

        let gpu = GpuContext::new(window.clone());
        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height, window.scale_factor());

        let plane_pass = PlanePass::new(&gpu);
        let ripple_pass = RipplePass::new(&gpu);
        let composer = FrameComposer::new(&gpu);

        let gallery = match Gallery::new(&gpu, &plane_pass, &config.sources) {
            Ok(gallery) => gallery,
            Err(err) => {
                *self = ShowcaseApp::Failed(err.into());
                event_loop.exit();
                return;
            }
        };

        let now = Instant::now();
        let mut running = Running {
            window,
            gpu,
            viewport,
            clock: FrameClock::new(now),
            last_frame: now,
            input: Input::new(),
            pointer: PointerSignal::new(),
            orbit: OrbitController::new(),
            plane_pass,
            ripple_pass,
            composer,
            gallery,
        };

        // Size everything before the first frame, not only on the first
        // resize event.
        running.apply_viewport();
        running.window.request_redraw();

        *self = ShowcaseApp::Running(Box::new(running));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let ShowcaseApp::Running(running) = self else {
            return;
        };

        running.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                log::debug!("resized to {}x{}", size.width, size.height);
                running.viewport.set_size(size.width, size.height);
                running.apply_viewport();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("scale factor changed to {scale_factor}");
                running.viewport.set_scale_factor(scale_factor);
                running.apply_viewport();
            }
            WindowEvent::CursorMoved { position, .. } => {
                running.pointer.on_cursor_moved(
                    position.x,
                    position.y,
                    &running.viewport,
                    Instant::now(),
                );
            }
            WindowEvent::Touch(touch) => {
                running.pointer.on_touch(
                    touch.id,
                    touch.phase,
                    touch.location.x,
                    touch.location.y,
                    &running.viewport,
                    Instant::now(),
                );
            }
            WindowEvent::RedrawRequested => {
                running.tick(event_loop);
            }
            _ => {}
        }
    }
}

impl Running {
    /// Propagate the current viewport to the surface and pass buffers.
    fn apply_viewport(&mut self) {
        let (width, height) = self.viewport.surface_size();
        self.gpu.resize(width, height);
        self.plane_pass.ensure_depth_size(&self.gpu);
    }

    /// One animation frame: advance time, write uniforms, update the
    /// camera, compose, and schedule the next redraw.
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let time = self.clock.elapsed_at(now);
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.pointer.poll(now);

        // Uniform writes and the camera update both precede the draw.
        self.gallery.set_time(time);
        self.gallery.upload(&self.gpu.queue);
        self.orbit.update(&self.input, dt);
        let camera = self.orbit.camera();

        let result = self.composer.render(
            &self.gpu,
            &mut self.plane_pass,
            &self.ripple_pass,
            &self.gallery,
            &camera,
            self.viewport.aspect(),
            time * RIPPLE_TIME_SCALE,
        );

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => {
                log::warn!("skipping frame: {err}");
            }
        }

        self.input.begin_frame();
        self.window.request_redraw();
    }
}
