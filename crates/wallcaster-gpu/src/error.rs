//! GPU error types.

use ash::vk;
use thiserror::Error;

/// GPU-related errors.
#[derive(Error, Debug)]
pub enum GpuError {
    /// Vulkan error.
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] vk::Result),

    /// Instance creation failed.
    #[error("Instance creation failed: {0}")]
    InstanceCreation(String),

    /// Surface creation failed.
    #[error("Surface creation failed: {0}")]
    SurfaceCreation(String),

    /// No physical device has a queue family that can both draw and present.
    #[error("No suitable GPU found")]
    NoSuitableDevice,

    /// Logical device creation failed.
    #[error("Device creation failed: {0}")]
    DeviceCreation(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, GpuError>;
