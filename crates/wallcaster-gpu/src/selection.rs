//! Physical device and queue family selection.

use crate::api::QueueFamilyInfo;
use crate::error::{GpuError, Result};

/// Upper bounds on how many devices and queue families are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationLimits {
    pub max_physical_devices: usize,
    pub max_queue_families: usize,
}

impl Default for EnumerationLimits {
    fn default() -> Self {
        Self {
            max_physical_devices: 16,
            max_queue_families: 32,
        }
    }
}

/// A physical device together with the queue family used for drawing and
/// presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSelection<D> {
    pub physical_device: D,
    pub queue_family_index: u32,
}

/// Pick the first (device, queue family) pair that supports graphics and can
/// present to the surface.
///
/// Devices are visited in the order given and families in index order. There
/// is no preference between discrete and integrated GPUs: the first eligible
/// pair wins.
///
/// A failed presentation query counts as "not supported" for that family
/// and the search goes on. If no pair qualifies, the first such failure is
/// returned instead of [`GpuError::NoSuitableDevice`].
pub fn select_physical_device<D, F, P>(
    devices: &[D],
    limits: &EnumerationLimits,
    mut queue_families: F,
    mut supports_present: P,
) -> Result<DeviceSelection<D>>
where
    D: Copy + std::fmt::Debug,
    F: FnMut(D) -> Vec<QueueFamilyInfo>,
    P: FnMut(D, u32) -> Result<bool>,
{
    if devices.len() > limits.max_physical_devices {
        tracing::warn!(
            "Only inspecting {} of {} physical devices",
            limits.max_physical_devices,
            devices.len()
        );
    }

    let mut query_error = None;

    for &device in devices.iter().take(limits.max_physical_devices) {
        let families = queue_families(device);
        if families.len() > limits.max_queue_families {
            tracing::warn!(
                "Only inspecting {} of {} queue families on {device:?}",
                limits.max_queue_families,
                families.len()
            );
        }

        for (index, family) in families.iter().take(limits.max_queue_families).enumerate() {
            if !family.supports_graphics() {
                continue;
            }

            #[allow(clippy::cast_possible_truncation)]
            let index = index as u32;
            let present = match supports_present(device, index) {
                Ok(present) => present,
                Err(e) => {
                    tracing::warn!(
                        "Present support query failed for {device:?} family {index}: {e}"
                    );
                    query_error.get_or_insert(e);
                    false
                }
            };

            if present {
                return Ok(DeviceSelection {
                    physical_device: device,
                    queue_family_index: index,
                });
            }
        }
    }

    Err(query_error.unwrap_or(GpuError::NoSuitableDevice))
}
