//! Platform error types.

use thiserror::Error;
use wallcaster_gpu::GpuError;
use wallcaster_input::InputError;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("OS windowing subsystem failed: {0}")]
    OsSubsystem(String),
    #[error("Window creation failed: {0}")]
    WindowCreation(String),
    #[error("Cursor grab failed: {0}")]
    CursorGrab(String),
    #[error("A window is already open")]
    AlreadyOpen,
    #[error("No window is open")]
    NotOpen,
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Error returned by [`crate::WindowSystem::open`].
pub type OpenError = PlatformError;

pub type Result<T> = std::result::Result<T, PlatformError>;
