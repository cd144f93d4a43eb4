//! Vulkan device bootstrap for the Wallcaster engine.
//!
//! This crate provides:
//! - The [`GpuApi`] seam over the graphics API, with a Vulkan implementation
//! - Physical device and queue family selection
//! - [`DeviceContext`] creation bound to a window surface, with rollback on
//!   failure and ordered teardown

pub mod api;
pub mod context;
pub mod error;
pub mod selection;
pub mod vulkan;

pub use api::{GpuApi, PhysicalDeviceInfo, QueueFamilyInfo};
pub use context::{BootstrapConfig, DeviceContext};
pub use error::{GpuError, Result};
pub use selection::{select_physical_device, DeviceSelection, EnumerationLimits};
pub use vulkan::{VulkanApi, VulkanInstance};
