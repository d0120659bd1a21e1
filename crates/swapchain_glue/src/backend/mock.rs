//! Recording backend and fake window for tests
//!
//! The mock hands out fresh fake handles for every native object it
//! "creates" and records each native call in a per-thread log, so each test
//! (one thread per test) sees only its own calls.

use std::cell::{Cell, RefCell};
use std::ffi::c_void;

use raw_window_handle::{RawWindowHandle, WebWindowHandle};

use super::{sync_interval, PlatformBackend};
use crate::config::GlueConfig;
use crate::descriptor::{
    EnvironmentDefaults, EnvironmentDescriptor, NativeEnvironment, NativeHandle,
    NativeRenderTarget, SwapchainDescriptor,
};
use crate::error::{GlueError, GlueResult};
use crate::foundation::Extent;
use crate::window::{WindowId, WindowSource};

/// Native calls observed on the current thread
#[derive(Debug, Clone, Default)]
pub struct MockLog {
    pub inits: usize,
    pub reallocations: Vec<Extent>,
    pub released_views: usize,
    pub presents: Vec<u32>,
    pub shutdowns: usize,
    pub failed_resizes: usize,
    pub fail_next_init: bool,
    pub fail_next_resize: bool,
    next_handle: usize,
}

thread_local! {
    static LOG: RefCell<MockLog> = RefCell::new(MockLog::default());
}

/// Snapshot of this thread's log
pub fn calls() -> MockLog {
    LOG.with(|log| log.borrow().clone())
}

/// Make the next `init` fail like a missing graphics driver
pub fn fail_next_init() {
    LOG.with(|log| log.borrow_mut().fail_next_init = true);
}

/// Make the next non-empty `resize_backbuffer` fail after the old view is released
pub fn fail_next_resize() {
    LOG.with(|log| log.borrow_mut().fail_next_resize = true);
}

fn record<R>(f: impl FnOnce(&mut MockLog) -> R) -> R {
    LOG.with(|log| f(&mut log.borrow_mut()))
}

fn fresh_handle() -> NativeHandle {
    record(|log| {
        log.next_handle += 0x10;
        NativeHandle::from_ptr(log.next_handle as *const c_void)
    })
}

/// Backend that only records what it was asked to do
#[derive(Debug)]
pub struct MockBackend {
    device: NativeHandle,
    device_context: NativeHandle,
    allocated: Extent,
    render_view: Option<NativeHandle>,
}

impl MockBackend {
    pub const fn render_view(&self) -> Option<NativeHandle> {
        self.render_view
    }
}

impl PlatformBackend for MockBackend {
    fn init(window: &dyn WindowSource, _config: &GlueConfig) -> GlueResult<Self> {
        if record(|log| std::mem::take(&mut log.fail_next_init)) {
            return Err(GlueError::DeviceCreation("mock driver refused".to_string()));
        }
        record(|log| log.inits += 1);

        let device = fresh_handle();
        let device_context = fresh_handle();
        let allocated = window.framebuffer_size();
        let render_view = (!allocated.is_empty()).then(fresh_handle);

        Ok(Self {
            device,
            device_context,
            allocated,
            render_view,
        })
    }

    fn environment(&self) -> EnvironmentDescriptor {
        EnvironmentDescriptor {
            defaults: EnvironmentDefaults::default(),
            native: NativeEnvironment::D3d11 {
                device: self.device,
                device_context: self.device_context,
            },
        }
    }

    fn backbuffer_size(&self) -> Extent {
        self.allocated
    }

    fn resize_backbuffer(&mut self, size: Extent) -> GlueResult<()> {
        if self.render_view.take().is_some() {
            record(|log| log.released_views += 1);
        }

        if size.is_empty() {
            return Ok(());
        }

        if record(|log| std::mem::take(&mut log.fail_next_resize)) {
            record(|log| log.failed_resizes += 1);
            self.allocated = Extent::ZERO;
            return Err(GlueError::Resize {
                size,
                reason: "mock view creation failed".to_string(),
            });
        }

        record(|log| log.reallocations.push(size));
        self.allocated = size;
        self.render_view = Some(fresh_handle());
        Ok(())
    }

    fn swapchain(&mut self, window_size: Extent) -> SwapchainDescriptor {
        SwapchainDescriptor::new(
            window_size,
            NativeRenderTarget::D3d11 {
                render_view: self.render_view.unwrap_or_default(),
            },
        )
    }

    fn present(&mut self, vsync_disabled: bool) -> GlueResult<()> {
        record(|log| log.presents.push(sync_interval(vsync_disabled)));
        Ok(())
    }

    fn shutdown(self) {
        record(|log| log.shutdowns += 1);
    }
}

/// Window whose framebuffer size the test controls
#[derive(Debug)]
pub struct FakeWindow {
    id: usize,
    size: Cell<Extent>,
}

impl FakeWindow {
    pub fn new(id: usize, width: u32, height: u32) -> Self {
        Self {
            id,
            size: Cell::new(Extent::new(width, height)),
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.size.set(Extent::new(width, height));
    }
}

impl WindowSource for FakeWindow {
    fn framebuffer_size(&self) -> Extent {
        self.size.get()
    }

    fn window_handle(&self) -> GlueResult<RawWindowHandle> {
        Ok(RawWindowHandle::Web(WebWindowHandle::new(self.id as u32)))
    }

    fn id(&self) -> WindowId {
        WindowId(self.id)
    }
}
