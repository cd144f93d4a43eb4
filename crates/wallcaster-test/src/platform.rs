//! Scripted windowing backend.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use wallcaster_platform::{PlatformBackend, PlatformError, PlatformEvent, Result};

use crate::log::{Call, CallLog};

/// Window stand-in without native handles.
#[derive(Debug, PartialEq, Eq)]
pub struct MockWindow {
    pub id: u32,
}

impl HasWindowHandle for MockWindow {
    fn window_handle(&self) -> std::result::Result<WindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HasDisplayHandle for MockWindow {
    fn display_handle(&self) -> std::result::Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

#[derive(Debug, Default)]
struct BackendState {
    /// Events delivered per poll, one entry per frame.
    frames: VecDeque<Vec<PlatformEvent>>,
    fail_init: bool,
    fail_window: bool,
    fail_grab: bool,
    next_window: u32,
}

/// [`PlatformBackend`] double fed with per-frame event batches.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    state: Rc<RefCell<BackendState>>,
    log: CallLog,
}

impl ScriptedBackend {
    pub fn new(log: CallLog) -> Self {
        Self {
            state: Rc::default(),
            log,
        }
    }

    /// Queue the events returned by one future poll.
    pub fn push_frame(&self, events: Vec<PlatformEvent>) {
        self.state.borrow_mut().frames.push_back(events);
    }

    pub fn fail_init(&self, fail: bool) {
        self.state.borrow_mut().fail_init = fail;
    }

    pub fn fail_window(&self, fail: bool) {
        self.state.borrow_mut().fail_window = fail;
    }

    pub fn fail_grab(&self, fail: bool) {
        self.state.borrow_mut().fail_grab = fail;
    }

    /// Frames queued but not yet polled.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }
}

impl PlatformBackend for ScriptedBackend {
    type Window = MockWindow;

    fn init(&mut self) -> Result<()> {
        if self.state.borrow().fail_init {
            return Err(PlatformError::OsSubsystem("no display".to_string()));
        }
        self.log.record(Call::SubsystemInit);
        Ok(())
    }

    fn shutdown(&mut self) {
        self.log.record(Call::SubsystemShutdown);
    }

    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<MockWindow> {
        let mut state = self.state.borrow_mut();
        if state.fail_window {
            return Err(PlatformError::WindowCreation("out of windows".to_string()));
        }
        state.next_window += 1;
        self.log.record(Call::CreateWindow {
            title: title.to_string(),
            width,
            height,
        });
        Ok(MockWindow {
            id: state.next_window,
        })
    }

    fn destroy_window(&mut self, _window: MockWindow) {
        self.log.record(Call::DestroyWindow);
    }

    fn poll_events(&mut self, _window: &MockWindow, events: &mut Vec<PlatformEvent>) {
        if let Some(frame) = self.state.borrow_mut().frames.pop_front() {
            events.extend(frame);
        }
    }

    fn set_relative_mouse_mode(&mut self, _window: &MockWindow) -> Result<()> {
        if self.state.borrow().fail_grab {
            return Err(PlatformError::CursorGrab("grab denied".to_string()));
        }
        self.log.record(Call::RelativeMouse);
        Ok(())
    }
}
