//! Window-system inputs consumed by the glue
//!
//! The session never creates or polls windows; it only asks the window it was
//! bound to for its live framebuffer size and native handle, and asks the
//! window system for the connected monitors when sizing a back-buffer that
//! should cover all of them.
//!
//! GLFW implementations live in [`glfw`] (feature `glfw`, on by default).

#[cfg(feature = "glfw")]
pub mod glfw;

use raw_window_handle::RawWindowHandle;

use crate::error::GlueResult;
use crate::foundation::Extent;

/// Identity of a native window, used to detect rebinding a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub usize);

/// A window a session can render into
///
/// Borrowed by the session from setup until shutdown; the window must
/// outlive it.
pub trait WindowSource {
    /// Current framebuffer size in physical pixels
    ///
    /// Zero while the window is minimized on some platforms.
    fn framebuffer_size(&self) -> Extent;

    /// Native handle the backend attaches its swapchain or layer to
    ///
    /// # Errors
    /// Fails when the window system cannot provide a handle the current
    /// platform's backend understands.
    fn window_handle(&self) -> GlueResult<RawWindowHandle>;

    /// Stable identity of the underlying native window
    fn id(&self) -> WindowId;
}

/// One connected monitor as the window system reports it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorInfo {
    /// Current video mode resolution
    pub video_mode: Extent,
    /// Content scale (x, y) for high-density displays
    pub content_scale: (f32, f32),
}

impl MonitorInfo {
    /// Create monitor info from a resolution and content scale
    #[must_use]
    pub const fn new(width: u32, height: u32, x_scale: f32, y_scale: f32) -> Self {
        Self {
            video_mode: Extent::new(width, height),
            content_scale: (x_scale, y_scale),
        }
    }

    /// Resolution multiplied by content scale, per axis, truncated
    #[must_use]
    pub fn effective_size(&self) -> Extent {
        let (x_scale, y_scale) = self.content_scale;
        Extent::new(
            (x_scale * self.video_mode.width as f32) as u32,
            (y_scale * self.video_mode.height as f32) as u32,
        )
    }
}

/// Anything that can enumerate connected monitors
pub trait MonitorSource {
    /// Snapshot of the connected monitors
    fn monitors(&mut self) -> Vec<MonitorInfo>;
}

impl MonitorSource for [MonitorInfo] {
    fn monitors(&mut self) -> Vec<MonitorInfo> {
        self.to_vec()
    }
}

impl MonitorSource for Vec<MonitorInfo> {
    fn monitors(&mut self) -> Vec<MonitorInfo> {
        self.clone()
    }
}

/// Largest effective width and height over all connected monitors
///
/// Width and height are maximised independently, so the result need not
/// belong to a single monitor. Returns [`Extent::ZERO`] with no monitors.
pub fn max_monitor_size<S>(source: &mut S) -> Extent
where
    S: MonitorSource + ?Sized,
{
    source
        .monitors()
        .iter()
        .map(MonitorInfo::effective_size)
        .fold(Extent::ZERO, Extent::max)
}
