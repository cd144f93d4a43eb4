//! Window system configuration.

use wallcaster_gpu::{BootstrapConfig, EnumerationLimits};

/// Window system configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Engine name reported to the graphics driver.
    pub engine_name: String,
    /// Enable Vulkan validation layers (default: debug builds only).
    pub validation: bool,
    /// Maximum number of key binds.
    pub max_key_binds: usize,
    /// Bounds on device and queue family enumeration.
    pub limits: EnumerationLimits,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            engine_name: "Wallcaster".to_string(),
            validation: cfg!(debug_assertions),
            max_key_binds: 80,
            limits: EnumerationLimits::default(),
        }
    }
}

impl WindowConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable validation layers.
    #[must_use]
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    /// Set the maximum number of key binds.
    #[must_use]
    pub fn with_max_key_binds(mut self, max_key_binds: usize) -> Self {
        self.max_key_binds = max_key_binds;
        self
    }

    /// Set device and queue family enumeration limits.
    #[must_use]
    pub fn with_limits(mut self, limits: EnumerationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Bootstrap settings for a window titled `title`.
    pub(crate) fn bootstrap(&self, title: &str) -> BootstrapConfig {
        BootstrapConfig {
            app_name: title.to_string(),
            engine_name: self.engine_name.clone(),
            validation: self.validation,
            limits: self.limits,
        }
    }
}
