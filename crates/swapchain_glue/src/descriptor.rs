//! Descriptors handed to the rendering library
//!
//! The renderer binds its own device abstraction to the handles in an
//! [`EnvironmentDescriptor`] once at setup, then renders into the target named
//! by a [`SwapchainDescriptor`] every frame. Handles are borrowed views of
//! objects the session owns; they stay valid until the next resize (render
//! targets) or until shutdown (devices).

use std::ffi::c_void;

use crate::foundation::Extent;

/// Pixel formats the glue can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// No attachment of this kind
    None,
    /// 8 bits per channel, blue-green-red-alpha, unsigned normalized
    Bgra8,
}

/// Fixed color format of every swapchain created by this crate
pub const COLOR_FORMAT: PixelFormat = PixelFormat::Bgra8;

/// Depth format: no depth attachment is ever created
pub const DEPTH_FORMAT: PixelFormat = PixelFormat::None;

/// One sample per pixel
pub const SAMPLE_COUNT: u32 = 1;

/// Non-owning native object pointer
///
/// Compares by address, so two descriptors referring to the same native
/// object compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(*const c_void);

impl NativeHandle {
    /// A handle that refers to nothing
    #[must_use]
    pub const fn null() -> Self {
        Self(std::ptr::null())
    }

    /// Wrap a raw native pointer
    #[must_use]
    pub const fn from_ptr(ptr: *const c_void) -> Self {
        Self(ptr)
    }

    /// The raw native pointer
    #[must_use]
    pub const fn as_ptr(self) -> *const c_void {
        self.0
    }

    /// True when the handle refers to nothing
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for NativeHandle {
    fn default() -> Self {
        Self::null()
    }
}

/// Default attachment metadata the renderer assumes for new passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentDefaults {
    /// Color attachment format
    pub color_format: PixelFormat,
    /// Depth attachment format
    pub depth_format: PixelFormat,
    /// Samples per pixel
    pub sample_count: u32,
}

impl Default for EnvironmentDefaults {
    fn default() -> Self {
        Self {
            color_format: COLOR_FORMAT,
            depth_format: DEPTH_FORMAT,
            sample_count: SAMPLE_COUNT,
        }
    }
}

/// Native device handles, one variant per graphics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEnvironment {
    /// `ID3D11Device` and its immediate `ID3D11DeviceContext`
    D3d11 {
        /// `ID3D11Device*`
        device: NativeHandle,
        /// `ID3D11DeviceContext*`
        device_context: NativeHandle,
    },
    /// `id<MTLDevice>`
    Metal {
        /// `id<MTLDevice>`
        device: NativeHandle,
    },
}

/// Everything the renderer needs to bind to the native device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentDescriptor {
    /// Default pass attachment metadata
    pub defaults: EnvironmentDefaults,
    /// Native device handles
    pub native: NativeEnvironment,
}

/// The frame's render target, one variant per graphics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeRenderTarget {
    /// `ID3D11RenderTargetView*` bound to the current back-buffer
    D3d11 {
        /// `ID3D11RenderTargetView*`, null while the back-buffer has no area
        render_view: NativeHandle,
    },
    /// `id<CAMetalDrawable>` acquired for this frame
    Metal {
        /// `id<CAMetalDrawable>`, null when no drawable was available
        current_drawable: NativeHandle,
    },
}

impl NativeRenderTarget {
    /// The wrapped native pointer, whichever backend produced it
    #[must_use]
    pub const fn handle(&self) -> NativeHandle {
        match *self {
            Self::D3d11 { render_view } => render_view,
            Self::Metal { current_drawable } => current_drawable,
        }
    }
}

/// Per-frame description of where to render
///
/// `width`/`height` are the window's framebuffer size, meant for viewport and
/// scissor setup. The allocated back-buffer may be larger (never-downsize
/// policy) or lag by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapchainDescriptor {
    /// Window framebuffer width in pixels
    pub width: u32,
    /// Window framebuffer height in pixels
    pub height: u32,
    /// Samples per pixel
    pub sample_count: u32,
    /// Color attachment format
    pub color_format: PixelFormat,
    /// Depth attachment format
    pub depth_format: PixelFormat,
    /// Native render target for this frame
    pub render_target: NativeRenderTarget,
}

impl SwapchainDescriptor {
    /// Descriptor with the fixed format metadata
    #[must_use]
    pub const fn new(window_size: Extent, render_target: NativeRenderTarget) -> Self {
        Self {
            width: window_size.width,
            height: window_size.height,
            sample_count: SAMPLE_COUNT,
            color_format: COLOR_FORMAT,
            depth_format: DEPTH_FORMAT,
            render_target,
        }
    }
}
