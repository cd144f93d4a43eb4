//! Shared call log.

use std::cell::RefCell;
use std::rc::Rc;

/// A resource-affecting call made on a test double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SubsystemInit,
    SubsystemShutdown,
    CreateWindow { title: String, width: u32, height: u32 },
    DestroyWindow,
    RelativeMouse,
    CreateInstance,
    CreateSurface,
    CreateDevice { physical_device: usize, family: u32 },
    DestroyDevice,
    DestroySurface,
    DestroyInstance,
}

impl Call {
    /// +1 for calls that create a resource, -1 for calls that release one.
    const fn resource_delta(&self) -> isize {
        match self {
            Self::SubsystemInit
            | Self::CreateWindow { .. }
            | Self::CreateInstance
            | Self::CreateSurface
            | Self::CreateDevice { .. } => 1,
            Self::SubsystemShutdown
            | Self::DestroyWindow
            | Self::DestroyDevice
            | Self::DestroySurface
            | Self::DestroyInstance => -1,
            Self::RelativeMouse => 0,
        }
    }
}

/// Ordered log of calls, shared between doubles and the test.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl CallLog {
    pub fn record(&self, call: Call) {
        tracing::trace!("{call:?}");
        self.calls.borrow_mut().push(call);
    }

    /// Snapshot of all calls so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of created resources not yet released.
    #[must_use]
    pub fn live_resources(&self) -> isize {
        self.calls.borrow().iter().map(Call::resource_delta).sum()
    }

    /// Only the release calls, in order.
    #[must_use]
    pub fn releases(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.resource_delta() < 0)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}
