//! Platform layer for the Wallcaster engine.
//!
//! Owns the OS window, drives GPU device bootstrap when a window opens,
//! polls OS events once per frame and dispatches them to input handlers
//! and key binds, and measures frame delta time.
//!
//! The OS windowing layer sits behind [`PlatformBackend`] with a winit
//! implementation in [`WinitBackend`]; the graphics API sits behind
//! [`wallcaster_gpu::GpuApi`].

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod window;
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub mod winit_backend;

pub use backend::{PlatformBackend, PlatformEvent};
pub use clock::{Clock, DeltaClock, SystemClock};
pub use config::WindowConfig;
pub use error::{OpenError, PlatformError, Result};
pub use window::WindowSystem;
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use winit_backend::{NativeWindowSystem, WinitBackend};
