//! Core GPU context and device management.
//!
//! [`GpuContext`] holds the wgpu resources every pass needs: the surface for
//! presenting to the window, the device for creating resources, the queue for
//! submitting work, and the current surface configuration. It is created once
//! at startup and passed by reference to the passes and the composer.

use std::sync::Arc;

use winit::window::Window;

/// Core GPU context holding wgpu resources.
///
/// All fields are public to allow direct access to wgpu APIs when needed.
pub struct GpuContext {
    /// The surface for presenting rendered frames to the window.
    pub surface: wgpu::Surface<'static>,
    /// The logical GPU device for creating resources and pipelines.
    pub device: wgpu::Device,
    /// The command queue for submitting work to the GPU.
    pub queue: wgpu::Queue,
    /// Current surface configuration (format, size, present mode).
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Create a new GPU context from a winit window.
    ///
    /// Performs instance creation, adapter selection, device/queue creation,
    /// and configures the surface with an sRGB format and Fifo present mode.
    ///
    /// # Panics
    ///
    /// Panics if no suitable GPU adapter is found or device creation fails;
    /// there is no rendering fallback to degrade to.
    pub fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .expect("Failed to create rendering surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to find a suitable GPU adapter");

        log::info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Filmstrip Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))
        .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("surface format: {surface_format:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Self {
            surface,
            device,
            queue,
            config,
        }
    }

    /// Resize the surface to new dimensions.
    ///
    /// Ignores zero-sized dimensions to avoid wgpu validation errors during
    /// window minimize. Reconfiguring with unchanged dimensions is harmless.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size, after a Lost/Outdated frame.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Returns the current surface width in pixels.
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Returns the current surface height in pixels.
    pub fn height(&self) -> u32 {
        self.config.height
    }
}
