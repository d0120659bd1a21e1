//! # Swapchain Glue
//!
//! Bridges a GLFW window to a low-level renderer by supplying the native
//! device, swapchain and presentation objects the renderer draws with.
//!
//! ## Features
//!
//! - **Direct3D 11** on Windows: flip-discard DXGI swapchain and render-target view
//! - **Metal** on macOS: `CAMetalLayer` attached to the window's content view
//! - **Back-buffer sizing policy**: exact fit, minimum size, or grow-only
//! - **Monitor-sized back-buffers**: smooth live resizing across monitors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(any(target_os = "windows", target_os = "macos"))]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use swapchain_glue::prelude::*;
//!
//! let mut glfw = glfw::init(glfw::fail_on_errors)?;
//! glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
//! let (window, _events) = glfw
//!     .create_window(640, 480, "glue", glfw::WindowMode::Windowed)
//!     .ok_or("window creation failed")?;
//!
//! let monitors = max_monitor_size(&mut glfw);
//! let config = GlueConfig::new().with_backbuffer(BackbufferPolicy::covering_monitors(monitors));
//!
//! let mut session: Session<'_, DefaultBackend> = Session::new();
//! let _environment = session.environment_setup(&window, config)?;
//!
//! while !window.should_close() {
//!     glfw.poll_events();
//!     let _swapchain = session.swapchain()?;
//!     session.present()?;
//! }
//!
//! session.shutdown();
//! # Ok(())
//! # }
//! # #[cfg(not(any(target_os = "windows", target_os = "macos")))]
//! # fn main() {}
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod backend;
pub mod config;
pub mod descriptor;
pub mod foundation;
pub mod resolve;
pub mod session;
pub mod window;

mod error;

pub use error::{GlueError, GlueResult};
pub use session::Session;

/// Common imports for glue users
pub mod prelude {
    #[cfg(any(target_os = "windows", target_os = "macos"))]
    pub use crate::backend::DefaultBackend;
    pub use crate::{
        backend::PlatformBackend,
        config::{BackbufferPolicy, Config, ConfigError, ConfigFormat, GlueConfig},
        descriptor::{
            EnvironmentDescriptor, NativeEnvironment, NativeHandle, NativeRenderTarget,
            PixelFormat, SwapchainDescriptor,
        },
        foundation::Extent,
        window::{max_monitor_size, MonitorInfo, MonitorSource, WindowSource},
        GlueError, GlueResult, Session,
    };
}
