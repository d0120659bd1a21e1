//! # Platform Backend Abstraction
//!
//! One implementation per native graphics API, each owning the native device,
//! its immediate context and the swapchain (or presentation layer). The
//! session drives every backend through [`PlatformBackend`] and never sees
//! native types; the boundary is drawn exactly at producing the environment
//! and swapchain descriptors.
//!
//! | Backend          | Target  | Native objects                                   |
//! |------------------|---------|--------------------------------------------------|
//! | [`D3d11Backend`] | Windows | device + context + flip-discard swapchain + RTV  |
//! | [`MetalBackend`] | macOS   | device + `CAMetalLayer` + per-frame drawable     |
//!
//! Native objects are held in RAII wrappers declared dependents-first, so
//! dropping a backend releases them in dependency order.

#[cfg(target_os = "windows")]
mod d3d11;
#[cfg(target_os = "macos")]
mod metal;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(target_os = "windows")]
pub use d3d11::D3d11Backend;
#[cfg(target_os = "macos")]
pub use metal::MetalBackend;

use crate::config::GlueConfig;
use crate::descriptor::{EnvironmentDescriptor, SwapchainDescriptor};
use crate::error::GlueResult;
use crate::foundation::Extent;
use crate::window::WindowSource;

/// Native backend for the current target
#[cfg(target_os = "windows")]
pub type DefaultBackend = D3d11Backend;

/// Native backend for the current target
#[cfg(target_os = "macos")]
pub type DefaultBackend = MetalBackend;

/// # Platform Backend Trait
///
/// Everything backend-specific about device creation, back-buffer sizing and
/// presentation. Implementations are created once per active session and
/// consumed by [`PlatformBackend::shutdown`].
pub trait PlatformBackend: Sized {
    /// Create the native device, its immediate context and a swapchain
    ///
    /// The swapchain is sized to the window's current framebuffer, double
    /// buffered, BGRA8 with one sample per pixel, and discards buffer
    /// contents after present.
    ///
    /// # Errors
    /// Any native creation call failing. Nothing is left half-initialised:
    /// objects created before the failure are released on return.
    fn init(window: &dyn WindowSource, config: &GlueConfig) -> GlueResult<Self>;

    /// Native device handles plus default pixel-format metadata
    fn environment(&self) -> EnvironmentDescriptor;

    /// Size the swapchain's back-buffer is currently allocated at
    fn backbuffer_size(&self) -> Extent;

    /// Reallocate the back-buffer at `size`
    ///
    /// The current render target is released first. A `size` with no area
    /// stops there, keeping the old allocation; the session never asks for
    /// that, it skips the call instead.
    ///
    /// # Errors
    /// The native resize or render-target creation failing.
    fn resize_backbuffer(&mut self, size: Extent) -> GlueResult<()>;

    /// Descriptor for the current frame's render target
    ///
    /// `window_size` is reported as the descriptor's width and height.
    fn swapchain(&mut self, window_size: Extent) -> SwapchainDescriptor;

    /// Show the rendered frame
    ///
    /// Waits for one vertical blank unless `vsync_disabled` is set.
    ///
    /// # Errors
    /// The native present call failing.
    fn present(&mut self, vsync_disabled: bool) -> GlueResult<()>;

    /// Release every native object this backend owns
    ///
    /// Debug builds with the debug layer enabled report native objects still
    /// alive afterwards.
    fn shutdown(self);
}

/// Vertical-blank interval for a present call
#[must_use]
pub const fn sync_interval(vsync_disabled: bool) -> u32 {
    if vsync_disabled {
        0
    } else {
        1
    }
}
