//! Device context bootstrap and teardown.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::api::GpuApi;
use crate::error::Result;
use crate::selection::{select_physical_device, DeviceSelection, EnumerationLimits};

/// Settings for [`DeviceContext::bootstrap`].
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub app_name: String,
    pub engine_name: String,
    /// Enable the Khronos validation layer if it is installed.
    pub validation: bool,
    pub limits: EnumerationLimits,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            app_name: "Wallcaster".to_string(),
            engine_name: "Wallcaster".to_string(),
            validation: cfg!(debug_assertions),
            limits: EnumerationLimits::default(),
        }
    }
}

impl BootstrapConfig {
    /// Create a config for the named application.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    /// Enable or disable validation layers.
    #[must_use]
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    /// Set device and queue family enumeration limits.
    #[must_use]
    pub fn with_limits(mut self, limits: EnumerationLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// GPU handles bound to one window.
///
/// The selected queue family supports both graphics and presentation to
/// `surface`. The context must be released with [`destroy`](Self::destroy)
/// using the same [`GpuApi`] that created it.
pub struct DeviceContext<G: GpuApi> {
    instance: G::Instance,
    surface: G::Surface,
    physical_device: G::PhysicalDevice,
    device: G::Device,
    queue: G::Queue,
    queue_family_index: u32,
}

impl<G: GpuApi> DeviceContext<G> {
    /// Run instance → surface → device selection → logical device.
    ///
    /// On failure every resource created so far is destroyed before the
    /// error is returned.
    pub fn bootstrap<W>(api: &mut G, window: &W, config: &BootstrapConfig) -> Result<Self>
    where
        W: HasDisplayHandle + HasWindowHandle + ?Sized,
    {
        let extensions = api.required_instance_extensions(window)?;
        tracing::debug!("Instance extensions: {extensions:?}");

        let instance = api.create_instance(config, &extensions)?;

        let surface = match api.create_surface(&instance, window) {
            Ok(surface) => surface,
            Err(e) => {
                api.destroy_instance(instance);
                return Err(e);
            }
        };

        let (selection, device) = match Self::create_device(api, &instance, &surface, config) {
            Ok(created) => created,
            Err(e) => {
                tracing::debug!("Bootstrap failed, rolling back surface and instance");
                api.destroy_surface(&instance, surface);
                api.destroy_instance(instance);
                return Err(e);
            }
        };

        let queue = api.device_queue(&device, selection.queue_family_index);

        Ok(Self {
            instance,
            surface,
            physical_device: selection.physical_device,
            device,
            queue,
            queue_family_index: selection.queue_family_index,
        })
    }

    fn create_device(
        api: &mut G,
        instance: &G::Instance,
        surface: &G::Surface,
        config: &BootstrapConfig,
    ) -> Result<(DeviceSelection<G::PhysicalDevice>, G::Device)> {
        let devices = api.enumerate_physical_devices(instance)?;
        for &device in devices.iter().take(config.limits.max_physical_devices) {
            tracing::info!("Device: {}", api.describe_physical_device(instance, device));
        }

        let selection = {
            let api = &*api;
            select_physical_device(
                &devices,
                &config.limits,
                |device| api.queue_families(instance, device),
                |device, family| api.surface_support(instance, surface, device, family),
            )?
        };

        tracing::info!(
            "Selected {} (queue family {})",
            api.describe_physical_device(instance, selection.physical_device),
            selection.queue_family_index
        );

        let device = api.create_device(
            instance,
            selection.physical_device,
            selection.queue_family_index,
        )?;

        Ok((selection, device))
    }

    /// Destroy the device, then the surface, then the instance.
    pub fn destroy(self, api: &mut G) {
        tracing::debug!("Destroying logical device");
        api.destroy_device(self.device);
        tracing::debug!("Destroying surface");
        api.destroy_surface(&self.instance, self.surface);
        tracing::debug!("Destroying instance");
        api.destroy_instance(self.instance);
    }

    /// Get the instance handle.
    pub fn instance(&self) -> &G::Instance {
        &self.instance
    }

    /// Get the surface bound to the window.
    pub fn surface(&self) -> &G::Surface {
        &self.surface
    }

    /// Get the selected physical device.
    pub fn physical_device(&self) -> G::PhysicalDevice {
        self.physical_device
    }

    /// Get the logical device.
    pub fn device(&self) -> &G::Device {
        &self.device
    }

    /// Get the graphics/present queue.
    pub fn queue(&self) -> G::Queue {
        self.queue
    }

    /// Get the queue family index of [`queue`](Self::queue).
    pub fn queue_family_index(&self) -> u32 {
        self.queue_family_index
    }
}
