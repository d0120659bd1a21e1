//! Native failure reporting
//!
//! Caller-side contract violations (using a session before setup, rebinding it
//! to another window) panic. Everything the platform can refuse at runtime is
//! reported through [`GlueError`] so applications can show a diagnostic.

use thiserror::Error;

use crate::foundation::Extent;

/// Native graphics or window-system failures
#[derive(Error, Debug)]
pub enum GlueError {
    /// The native device or its immediate context could not be created
    #[error("Device creation failed: {0}")]
    DeviceCreation(String),

    /// The native swapchain or presentation layer could not be created
    #[error("Swapchain creation failed: {0}")]
    SwapchainCreation(String),

    /// Resizing the back-buffer or recreating its render-target view failed
    #[error("Back-buffer resize to {size} failed: {reason}")]
    Resize {
        /// Requested back-buffer size
        size: Extent,
        /// Native failure description
        reason: String,
    },

    /// The present call was rejected
    #[error("Present failed: {0}")]
    Present(String),

    /// The window system could not provide what was asked of it
    #[error("Window error: {0}")]
    Window(String),

    /// The window handle is not one this backend can render into
    #[error("Unsupported window handle for this backend: {0}")]
    UnsupportedWindowHandle(String),
}

/// Result type for glue operations
pub type GlueResult<T> = Result<T, GlueError>;
