//! Vulkan implementation of [`GpuApi`] on top of ash.

use std::ffi::{c_char, CStr, CString};

use ash::vk;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::api::{GpuApi, PhysicalDeviceInfo, QueueFamilyInfo};
use crate::context::BootstrapConfig;
use crate::error::{GpuError, Result};

/// Validation layers to enable in debug builds.
pub fn validation_layers() -> Vec<&'static CStr> {
    vec![
        // Standard validation layer
        c"VK_LAYER_KHRONOS_validation",
    ]
}

/// Required device extensions.
fn required_device_extensions() -> Vec<&'static CStr> {
    let extensions = vec![
        ash::khr::swapchain::NAME,
        // Required for MoltenVK on macOS
        #[cfg(target_os = "macos")]
        ash::khr::portability_subset::NAME,
    ];

    extensions
}

/// A Vulkan instance plus the surface extension loader bound to it.
pub struct VulkanInstance {
    raw: ash::Instance,
    surface_loader: ash::khr::surface::Instance,
}

impl VulkanInstance {
    /// Get the ash instance.
    pub const fn raw(&self) -> &ash::Instance {
        &self.raw
    }

    /// Get the surface extension loader.
    pub const fn surface_loader(&self) -> &ash::khr::surface::Instance {
        &self.surface_loader
    }
}

/// Vulkan backend.
///
/// The loader library is opened lazily by the first instance creation, so
/// a missing Vulkan runtime surfaces as [`GpuError::InstanceCreation`].
#[derive(Default)]
pub struct VulkanApi {
    entry: Option<ash::Entry>,
}

impl VulkanApi {
    /// Create a backend without loading the Vulkan library yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { entry: None }
    }

    fn entry(&mut self) -> Result<&ash::Entry> {
        if self.entry.is_none() {
            let entry = unsafe { ash::Entry::load() }
                .map_err(|e| GpuError::InstanceCreation(format!("Failed to load Vulkan: {e}")))?;
            self.entry = Some(entry);
        }
        self.entry
            .as_ref()
            .ok_or_else(|| GpuError::InstanceCreation("Vulkan entry unavailable".to_string()))
    }

    /// Keep only the requested layers the loader actually provides.
    fn available_layers(entry: &ash::Entry, requested: Vec<&'static CStr>) -> Vec<&'static CStr> {
        let available = match unsafe { entry.enumerate_instance_layer_properties() } {
            Ok(available) => available,
            Err(e) => {
                tracing::warn!("Failed to enumerate instance layers: {e}");
                return Vec::new();
            }
        };

        requested
            .into_iter()
            .filter(|layer| {
                let found = available.iter().any(|props| {
                    let name = unsafe { CStr::from_ptr(props.layer_name.as_ptr()) };
                    name == *layer
                });
                if !found {
                    tracing::warn!("Validation layer {layer:?} not available");
                }
                found
            })
            .collect()
    }
}

impl GpuApi for VulkanApi {
    type Instance = VulkanInstance;
    type Surface = vk::SurfaceKHR;
    type PhysicalDevice = vk::PhysicalDevice;
    type Device = ash::Device;
    type Queue = vk::Queue;

    fn required_instance_extensions<W>(&self, window: &W) -> Result<Vec<&'static CStr>>
    where
        W: HasDisplayHandle + ?Sized,
    {
        let display = window.display_handle().map_err(|e| {
            GpuError::InstanceCreation(format!("Failed to get display handle: {e}"))
        })?;

        let names = ash_window::enumerate_required_extensions(display.as_raw())
            .map_err(|e| GpuError::InstanceCreation(format!("Unsupported display: {e}")))?;

        // The windowing layer hands out pointers to static extension name strings.
        #[allow(unused_mut)]
        let mut extensions: Vec<&'static CStr> = names
            .iter()
            .map(|&name| unsafe { CStr::from_ptr(name) })
            .collect();

        #[cfg(target_os = "macos")]
        extensions.push(ash::khr::portability_enumeration::NAME);

        Ok(extensions)
    }

    fn create_instance(
        &mut self,
        config: &BootstrapConfig,
        extensions: &[&'static CStr],
    ) -> Result<VulkanInstance> {
        let app_name = CString::new(config.app_name.as_str())
            .map_err(|e| GpuError::InstanceCreation(format!("Invalid application name: {e}")))?;
        let engine_name = CString::new(config.engine_name.as_str())
            .map_err(|e| GpuError::InstanceCreation(format!("Invalid engine name: {e}")))?;

        let entry = self.entry()?;

        let app_info = vk::ApplicationInfo::default()
            .application_name(&app_name)
            .application_version(vk::make_api_version(0, 1, 0, 0))
            .engine_name(&engine_name)
            .engine_version(vk::make_api_version(0, 1, 0, 0))
            .api_version(vk::API_VERSION_1_0);

        let extension_names: Vec<*const c_char> =
            extensions.iter().map(|ext| ext.as_ptr()).collect();

        let layers = if config.validation {
            Self::available_layers(entry, validation_layers())
        } else {
            vec![]
        };
        let layer_names: Vec<*const c_char> = layers.iter().map(|l| l.as_ptr()).collect();

        // Required for MoltenVK on macOS
        #[cfg(target_os = "macos")]
        let create_flags = vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR;
        #[cfg(not(target_os = "macos"))]
        let create_flags = vk::InstanceCreateFlags::empty();

        let create_info = vk::InstanceCreateInfo::default()
            .application_info(&app_info)
            .enabled_extension_names(&extension_names)
            .enabled_layer_names(&layer_names)
            .flags(create_flags);

        let raw = unsafe { entry.create_instance(&create_info, None) }
            .map_err(|e| GpuError::InstanceCreation(e.to_string()))?;
        let surface_loader = ash::khr::surface::Instance::new(entry, &raw);

        Ok(VulkanInstance {
            raw,
            surface_loader,
        })
    }

    fn create_surface<W>(&mut self, instance: &VulkanInstance, window: &W) -> Result<vk::SurfaceKHR>
    where
        W: HasDisplayHandle + HasWindowHandle + ?Sized,
    {
        let entry = self
            .entry
            .as_ref()
            .ok_or_else(|| GpuError::SurfaceCreation("Vulkan is not loaded".to_string()))?;

        let display = window
            .display_handle()
            .map_err(|e| GpuError::SurfaceCreation(format!("Failed to get display handle: {e}")))?;
        let window_handle = window
            .window_handle()
            .map_err(|e| GpuError::SurfaceCreation(format!("Failed to get window handle: {e}")))?;

        unsafe {
            ash_window::create_surface(
                entry,
                &instance.raw,
                display.as_raw(),
                window_handle.as_raw(),
                None,
            )
        }
        .map_err(|e| GpuError::SurfaceCreation(e.to_string()))
    }

    fn enumerate_physical_devices(
        &self,
        instance: &VulkanInstance,
    ) -> Result<Vec<vk::PhysicalDevice>> {
        Ok(unsafe { instance.raw.enumerate_physical_devices() }?)
    }

    fn describe_physical_device(
        &self,
        instance: &VulkanInstance,
        device: vk::PhysicalDevice,
    ) -> PhysicalDeviceInfo {
        let properties = unsafe { instance.raw.get_physical_device_properties(device) };
        let name = unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }
            .to_string_lossy()
            .into_owned();

        PhysicalDeviceInfo {
            name,
            kind: properties.device_type,
        }
    }

    fn queue_families(
        &self,
        instance: &VulkanInstance,
        device: vk::PhysicalDevice,
    ) -> Vec<QueueFamilyInfo> {
        unsafe { instance.raw.get_physical_device_queue_family_properties(device) }
            .iter()
            .map(|family| QueueFamilyInfo {
                flags: family.queue_flags,
                queue_count: family.queue_count,
            })
            .collect()
    }

    fn surface_support(
        &self,
        instance: &VulkanInstance,
        surface: &vk::SurfaceKHR,
        device: vk::PhysicalDevice,
        family: u32,
    ) -> Result<bool> {
        Ok(unsafe {
            instance
                .surface_loader
                .get_physical_device_surface_support(device, family, *surface)
        }?)
    }

    fn create_device(
        &mut self,
        instance: &VulkanInstance,
        physical_device: vk::PhysicalDevice,
        family: u32,
    ) -> Result<ash::Device> {
        let queue_priority = 1.0_f32;
        let queue_create_info = vk::DeviceQueueCreateInfo::default()
            .queue_family_index(family)
            .queue_priorities(std::slice::from_ref(&queue_priority));

        let extensions = required_device_extensions();
        let extension_names: Vec<*const c_char> =
            extensions.iter().map(|ext| ext.as_ptr()).collect();

        let device_create_info = vk::DeviceCreateInfo::default()
            .queue_create_infos(std::slice::from_ref(&queue_create_info))
            .enabled_extension_names(&extension_names);

        unsafe {
            instance
                .raw
                .create_device(physical_device, &device_create_info, None)
        }
        .map_err(|e| GpuError::DeviceCreation(e.to_string()))
    }

    fn device_queue(&self, device: &ash::Device, family: u32) -> vk::Queue {
        unsafe { device.get_device_queue(family, 0) }
    }

    fn destroy_device(&mut self, device: ash::Device) {
        unsafe {
            if let Err(e) = device.device_wait_idle() {
                tracing::warn!("Failed to wait for device idle: {e}");
            }
            device.destroy_device(None);
        }
    }

    fn destroy_surface(&mut self, instance: &VulkanInstance, surface: vk::SurfaceKHR) {
        unsafe { instance.surface_loader.destroy_surface(surface, None) };
    }

    fn destroy_instance(&mut self, instance: VulkanInstance) {
        unsafe { instance.raw.destroy_instance(None) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swapchain_is_a_device_extension() {
        assert!(required_device_extensions().contains(&ash::khr::swapchain::NAME));
    }

    #[test]
    fn backend_starts_unloaded() {
        let api = VulkanApi::new();
        assert!(api.entry.is_none());
    }
}
