//! Test doubles for the Wallcaster engine.
//!
//! Provides a recording GPU API, a scripted windowing backend and a manual
//! clock so the window system and device bootstrap can be exercised without
//! a display or a Vulkan driver.
//!
//! All doubles are cheap to clone; clones share state, so a test can keep a
//! handle after moving one clone into a [`WindowSystem`].

pub mod clock;
pub mod gpu;
pub mod log;
pub mod platform;

pub use clock::ManualClock;
pub use gpu::{FailAt, MockDevice, MockInstance, MockPhysicalDevice, MockSurface, RecordingGpu};
pub use log::{Call, CallLog};
pub use platform::{MockWindow, ScriptedBackend};

use wallcaster_platform::{WindowConfig, WindowSystem};

/// Window system wired to test doubles.
pub type TestWindowSystem = WindowSystem<ScriptedBackend, RecordingGpu, ManualClock>;

/// A window system plus handles to the doubles inside it.
pub struct TestRig {
    pub system: TestWindowSystem,
    pub backend: ScriptedBackend,
    pub gpu: RecordingGpu,
    pub clock: ManualClock,
    pub log: CallLog,
}

impl TestRig {
    /// Build a rig whose GPU exposes `devices`.
    #[must_use]
    pub fn new(devices: Vec<MockPhysicalDevice>) -> Self {
        Self::with_config(devices, WindowConfig::new().with_validation(false))
    }

    #[must_use]
    pub fn with_config(devices: Vec<MockPhysicalDevice>, config: WindowConfig) -> Self {
        let log = CallLog::default();
        let backend = ScriptedBackend::new(log.clone());
        let gpu = RecordingGpu::new(devices, log.clone());
        let clock = ManualClock::default();
        let system =
            WindowSystem::with_clock(backend.clone(), gpu.clone(), clock.clone(), config);

        Self {
            system,
            backend,
            gpu,
            clock,
            log,
        }
    }

    /// Rig with one GPU whose only queue family can draw and present.
    #[must_use]
    pub fn single_gpu() -> Self {
        Self::new(vec![MockPhysicalDevice::graphics_present("Mock GPU")])
    }
}
