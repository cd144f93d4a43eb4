//! Graphics API seam.
//!
//! The bootstrap sequence in [`crate::context`] only talks to the GPU through
//! [`GpuApi`]. [`crate::VulkanApi`] is the real implementation; tests plug in a
//! recording mock with a synthetic device matrix.

use std::ffi::CStr;
use std::fmt;

use ash::vk;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::context::BootstrapConfig;
use crate::error::Result;

/// Capabilities of one queue family on a physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFamilyInfo {
    /// Capability flags advertised by the family.
    pub flags: vk::QueueFlags,
    /// Number of queues in the family.
    pub queue_count: u32,
}

impl QueueFamilyInfo {
    /// Create a family description with the given flags and a single queue.
    #[must_use]
    pub const fn new(flags: vk::QueueFlags) -> Self {
        Self {
            flags,
            queue_count: 1,
        }
    }

    /// Returns `true` if the family accepts graphics submissions.
    #[must_use]
    pub fn supports_graphics(&self) -> bool {
        self.flags.contains(vk::QueueFlags::GRAPHICS)
    }
}

/// Human-readable description of a physical device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalDeviceInfo {
    pub name: String,
    pub kind: vk::PhysicalDeviceType,
}

impl fmt::Display for PhysicalDeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            vk::PhysicalDeviceType::CPU => "CPU",
            vk::PhysicalDeviceType::INTEGRATED_GPU => "Integrated GPU",
            vk::PhysicalDeviceType::DISCRETE_GPU => "Discrete GPU",
            vk::PhysicalDeviceType::VIRTUAL_GPU => "Virtual GPU",
            _ => "Unknown",
        };
        write!(f, "{kind} '{}'", self.name)
    }
}

/// Operations the device bootstrap needs from a graphics API.
///
/// Handles returned by one method are only ever passed back to the same
/// implementation. Destroy methods take ownership so a handle cannot be
/// destroyed twice.
pub trait GpuApi {
    type Instance;
    type Surface;
    type PhysicalDevice: Copy + fmt::Debug;
    type Device;
    type Queue: Copy;

    /// Instance extensions needed to present to `window`'s surface.
    fn required_instance_extensions<W>(&self, window: &W) -> Result<Vec<&'static CStr>>
    where
        W: HasDisplayHandle + ?Sized;

    /// Create an API instance with `extensions` enabled.
    fn create_instance(
        &mut self,
        config: &BootstrapConfig,
        extensions: &[&'static CStr],
    ) -> Result<Self::Instance>;

    /// Create a presentable surface bound to `window`.
    fn create_surface<W>(&mut self, instance: &Self::Instance, window: &W) -> Result<Self::Surface>
    where
        W: HasDisplayHandle + HasWindowHandle + ?Sized;

    /// All physical devices visible to `instance`, in enumeration order.
    fn enumerate_physical_devices(
        &self,
        instance: &Self::Instance,
    ) -> Result<Vec<Self::PhysicalDevice>>;

    fn describe_physical_device(
        &self,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> PhysicalDeviceInfo;

    /// Queue families of `device`; the position in the list is the family index.
    fn queue_families(
        &self,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> Vec<QueueFamilyInfo>;

    /// Whether `family` on `device` can present to `surface`.
    fn surface_support(
        &self,
        instance: &Self::Instance,
        surface: &Self::Surface,
        device: Self::PhysicalDevice,
        family: u32,
    ) -> Result<bool>;

    /// Create a logical device with one queue at priority 1.0 from `family`
    /// and the extensions needed for presentation.
    fn create_device(
        &mut self,
        instance: &Self::Instance,
        physical_device: Self::PhysicalDevice,
        family: u32,
    ) -> Result<Self::Device>;

    /// First queue of `family` on `device`.
    fn device_queue(&self, device: &Self::Device, family: u32) -> Self::Queue;

    fn destroy_device(&mut self, device: Self::Device);

    fn destroy_surface(&mut self, instance: &Self::Instance, surface: Self::Surface);

    fn destroy_instance(&mut self, instance: Self::Instance);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphics_flag() {
        let family = QueueFamilyInfo::new(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE);
        assert!(family.supports_graphics());

        let compute_only = QueueFamilyInfo::new(vk::QueueFlags::COMPUTE);
        assert!(!compute_only.supports_graphics());
    }

    #[test]
    fn device_info_display() {
        let info = PhysicalDeviceInfo {
            name: "Test Adapter".to_string(),
            kind: vk::PhysicalDeviceType::DISCRETE_GPU,
        };
        assert_eq!(info.to_string(), "Discrete GPU 'Test Adapter'");
    }
}
