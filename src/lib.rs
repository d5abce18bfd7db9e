//! # Filmstrip
//!
//! A ten-plane image gallery rendered through a time-animated ripple.
//!
//! Ten textured planes stand in a horizontal row, each spun a quarter turn,
//! viewed through a damped orbit camera. Every frame is composed in two
//! stages: the planes render into an offscreen target, then a full-screen
//! ripple pass warps that target onto the surface. A normalized pointer
//! signal is tracked alongside and decays to neutral after a second of
//! stillness.
//!
//! ```no_run
//! use filmstrip::AppConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     env_logger::init();
//!     filmstrip::run(AppConfig::default())
//! }
//! ```
//!
//! Each component is its own module so its contracts stay testable without a
//! GPU: the [`Viewport`] sizing rules, the [`PointerSignal`] decay, the
//! [`FrameClock`] and the gallery's row layout are all plain state machines.

mod app;
mod camera;
mod clock;
mod composer;
mod gallery;
mod gpu;
mod input;
mod orbit;
mod plane_pass;
mod pointer;
mod quad;
mod ripple_pass;
mod texture;
mod viewport;

pub use app::{AppConfig, IMAGE_SOURCES, run};
pub use camera::Camera;
pub use clock::{FrameClock, RIPPLE_TIME_SCALE};
pub use composer::{FrameComposer, RenderTarget};
pub use gallery::{Gallery, PlaneState, PlaneUniforms, layout_row};
pub use gpu::GpuContext;
pub use input::Input;
pub use orbit::OrbitController;
pub use plane_pass::PlanePass;
pub use pointer::{DECAY_TIMEOUT, PointerSignal};
pub use quad::{PLANE_HEIGHT, PLANE_WIDTH, Quad, Vertex};
pub use ripple_pass::RipplePass;
pub use texture::{Texture, TextureError};
pub use viewport::{MAX_SCALE_FACTOR, Viewport};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
