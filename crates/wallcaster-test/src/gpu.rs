//! Recording GPU API with a synthetic device matrix.

use std::cell::RefCell;
use std::ffi::CStr;
use std::rc::Rc;

use ash::vk;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wallcaster_gpu::{
    BootstrapConfig, GpuApi, GpuError, PhysicalDeviceInfo, QueueFamilyInfo, Result,
};

use crate::log::{Call, CallLog};

/// Bootstrap stage at which [`RecordingGpu`] reports failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Extensions,
    Instance,
    Surface,
    Enumerate,
    /// Every presentation support query fails.
    Present,
    Device,
}

/// One fake physical device.
#[derive(Debug, Clone)]
pub struct MockPhysicalDevice {
    pub name: String,
    pub kind: vk::PhysicalDeviceType,
    /// Queue family flags and whether that family can present.
    pub families: Vec<(vk::QueueFlags, bool)>,
}

impl MockPhysicalDevice {
    pub fn new(name: impl Into<String>, families: Vec<(vk::QueueFlags, bool)>) -> Self {
        Self {
            name: name.into(),
            kind: vk::PhysicalDeviceType::DISCRETE_GPU,
            families,
        }
    }

    /// Device with a single family that can draw and present.
    pub fn graphics_present(name: impl Into<String>) -> Self {
        Self::new(name, vec![(vk::QueueFlags::GRAPHICS, true)])
    }

    #[must_use]
    pub fn with_kind(mut self, kind: vk::PhysicalDeviceType) -> Self {
        self.kind = kind;
        self
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MockInstance(u32);

#[derive(Debug, PartialEq, Eq)]
pub struct MockSurface(u32);

#[derive(Debug, PartialEq, Eq)]
pub struct MockDevice {
    pub physical_device: usize,
    pub family: u32,
}

#[derive(Debug, Default)]
struct GpuState {
    devices: Vec<MockPhysicalDevice>,
    fail_at: Option<FailAt>,
    next_id: u32,
    last_extensions: Vec<&'static CStr>,
}

/// [`GpuApi`] double that records resource calls to a [`CallLog`].
#[derive(Debug, Clone)]
pub struct RecordingGpu {
    state: Rc<RefCell<GpuState>>,
    log: CallLog,
}

impl RecordingGpu {
    pub fn new(devices: Vec<MockPhysicalDevice>, log: CallLog) -> Self {
        Self {
            state: Rc::new(RefCell::new(GpuState {
                devices,
                ..Default::default()
            })),
            log,
        }
    }

    /// Make the given stage fail from now on. `None` clears the failure.
    pub fn fail_at(&self, stage: Option<FailAt>) {
        self.state.borrow_mut().fail_at = stage;
    }

    /// Replace the device matrix.
    pub fn set_devices(&self, devices: Vec<MockPhysicalDevice>) {
        self.state.borrow_mut().devices = devices;
    }

    /// Extensions passed to the last instance creation.
    #[must_use]
    pub fn last_extensions(&self) -> Vec<&'static CStr> {
        self.state.borrow().last_extensions.clone()
    }

    pub const fn log(&self) -> &CallLog {
        &self.log
    }

    fn fails(&self, stage: FailAt) -> bool {
        self.state.borrow().fail_at == Some(stage)
    }

    fn next_id(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }
}

impl GpuApi for RecordingGpu {
    type Instance = MockInstance;
    type Surface = MockSurface;
    type PhysicalDevice = usize;
    type Device = MockDevice;
    type Queue = u32;

    fn required_instance_extensions<W>(&self, _window: &W) -> Result<Vec<&'static CStr>>
    where
        W: HasDisplayHandle + ?Sized,
    {
        if self.fails(FailAt::Extensions) {
            return Err(GpuError::InstanceCreation(
                "no surface extensions".to_string(),
            ));
        }
        Ok(vec![ash::khr::surface::NAME])
    }

    fn create_instance(
        &mut self,
        _config: &BootstrapConfig,
        extensions: &[&'static CStr],
    ) -> Result<MockInstance> {
        if self.fails(FailAt::Instance) {
            return Err(GpuError::InstanceCreation(
                vk::Result::ERROR_INITIALIZATION_FAILED.to_string(),
            ));
        }
        self.state.borrow_mut().last_extensions = extensions.to_vec();
        self.log.record(Call::CreateInstance);
        Ok(MockInstance(self.next_id()))
    }

    fn create_surface<W>(&mut self, _instance: &MockInstance, _window: &W) -> Result<MockSurface>
    where
        W: HasDisplayHandle + HasWindowHandle + ?Sized,
    {
        if self.fails(FailAt::Surface) {
            return Err(GpuError::SurfaceCreation(
                "window has no surface".to_string(),
            ));
        }
        self.log.record(Call::CreateSurface);
        Ok(MockSurface(self.next_id()))
    }

    fn enumerate_physical_devices(&self, _instance: &MockInstance) -> Result<Vec<usize>> {
        if self.fails(FailAt::Enumerate) {
            return Err(GpuError::Vulkan(vk::Result::ERROR_INITIALIZATION_FAILED));
        }
        Ok((0..self.state.borrow().devices.len()).collect())
    }

    fn describe_physical_device(&self, _instance: &MockInstance, device: usize) -> PhysicalDeviceInfo {
        let state = self.state.borrow();
        let device = &state.devices[device];
        PhysicalDeviceInfo {
            name: device.name.clone(),
            kind: device.kind,
        }
    }

    fn queue_families(&self, _instance: &MockInstance, device: usize) -> Vec<QueueFamilyInfo> {
        self.state.borrow().devices[device]
            .families
            .iter()
            .map(|&(flags, _)| QueueFamilyInfo::new(flags))
            .collect()
    }

    fn surface_support(
        &self,
        _instance: &MockInstance,
        _surface: &MockSurface,
        device: usize,
        family: u32,
    ) -> Result<bool> {
        if self.fails(FailAt::Present) {
            return Err(GpuError::Vulkan(vk::Result::ERROR_SURFACE_LOST_KHR));
        }
        Ok(self.state.borrow().devices[device].families[family as usize].1)
    }

    fn create_device(
        &mut self,
        _instance: &MockInstance,
        physical_device: usize,
        family: u32,
    ) -> Result<MockDevice> {
        if self.fails(FailAt::Device) {
            return Err(GpuError::DeviceCreation(
                vk::Result::ERROR_DEVICE_LOST.to_string(),
            ));
        }
        self.log.record(Call::CreateDevice {
            physical_device,
            family,
        });
        Ok(MockDevice {
            physical_device,
            family,
        })
    }

    fn device_queue(&self, device: &MockDevice, family: u32) -> u32 {
        assert_eq!(device.family, family, "queue requested from another family");
        family
    }

    fn destroy_device(&mut self, _device: MockDevice) {
        self.log.record(Call::DestroyDevice);
    }

    fn destroy_surface(&mut self, _instance: &MockInstance, _surface: MockSurface) {
        self.log.record(Call::DestroySurface);
    }

    fn destroy_instance(&mut self, _instance: MockInstance) {
        self.log.record(Call::DestroyInstance);
    }
}
