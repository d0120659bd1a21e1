//! Glue session
//!
//! A [`Session`] binds one window to one native backend and walks through a
//! two-state lifecycle:
//!
//! ```text
//!  Uninitialized ──environment_setup──▶ Active ──shutdown──▶ Uninitialized
//!                                        │  ▲
//!                                        └──┘ swapchain / present / toggle_vsync
//! ```
//!
//! The session is owned by the caller and passed into the render loop; it is
//! not thread-safe and holds no global state, so independent sessions can
//! coexist (tests rely on this).
//!
//! Calling any frame operation before setup, or setting up again with a
//! different window while active, is a caller bug and panics. Native failures
//! are returned as [`GlueError`](crate::GlueError).


use crate::backend::PlatformBackend;
use crate::config::GlueConfig;
use crate::descriptor::{EnvironmentDescriptor, SwapchainDescriptor};
use crate::error::GlueResult;
use crate::foundation::Extent;
use crate::window::{self, MonitorSource, WindowSource};

/// Lifecycle state of a [`Session`]
enum SessionState<'w, B> {
    Uninitialized,
    Active(ActiveSession<'w, B>),
}

/// Everything that only exists between setup and shutdown
struct ActiveSession<'w, B> {
    window: &'w dyn WindowSource,
    config: GlueConfig,
    backend: B,
}

/// Window-to-renderer glue for a single window
///
/// ```rust,no_run
/// # #[cfg(any(target_os = "windows", target_os = "macos"))]
/// # fn run(window: &glfw::Window) -> Result<(), swapchain_glue::GlueError> {
/// use swapchain_glue::prelude::*;
///
/// let mut session: Session<'_, DefaultBackend> = Session::new();
/// let environment = session.environment_setup(window, GlueConfig::default())?;
/// // ...set up the renderer with `environment`...
/// loop {
///     let swapchain = session.swapchain()?;
///     // ...render a pass into `swapchain`...
///     session.present()?;
/// #   break;
/// }
/// session.shutdown();
/// # Ok(())
/// # }
/// ```
pub struct Session<'w, B: PlatformBackend> {
    state: SessionState<'w, B>,
}

impl<'w, B: PlatformBackend> Session<'w, B> {
    /// Create an uninitialized session
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
        }
    }

    /// True between a successful setup and shutdown
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// The configuration the session was set up with
    #[must_use]
    pub const fn config(&self) -> Option<&GlueConfig> {
        match &self.state {
            SessionState::Active(active) => Some(&active.config),
            SessionState::Uninitialized => None,
        }
    }

    /// Size the back-buffer is currently allocated at
    ///
    /// # Panics
    /// If the session is not active.
    #[must_use]
    pub fn backbuffer_size(&self) -> Extent {
        self.active("backbuffer_size").backend.backbuffer_size()
    }

    /// Bind the session to `window` and create the native device
    ///
    /// The first call creates the device and swapchain. Later calls with the
    /// same window return a fresh descriptor for the same device without
    /// touching native state; their `config` is ignored.
    ///
    /// # Errors
    /// Native device or swapchain creation failing. The session stays
    /// uninitialized and setup may be retried.
    ///
    /// # Panics
    /// If the session is already active for a different window.
    pub fn environment_setup(
        &mut self,
        window: &'w dyn WindowSource,
        config: GlueConfig,
    ) -> GlueResult<EnvironmentDescriptor> {
        if let SessionState::Active(active) = &self.state {
            assert_eq!(
                active.window.id(),
                window.id(),
                "environment_setup: session is already bound to another window; call shutdown() first"
            );
            if active.config != config {
                log::warn!("environment_setup: session already active, ignoring new configuration");
            }
            return Ok(active.backend.environment());
        }

        log::debug!("Initializing glue session: {config:?}");
        let backend = B::init(window, &config).inspect_err(|e| {
            log::error!("Native backend initialization failed: {e}");
        })?;
        log::info!(
            "Glue session active, back-buffer {}",
            backend.backbuffer_size()
        );

        let environment = backend.environment();
        self.state = SessionState::Active(ActiveSession {
            window,
            config,
            backend,
        });
        Ok(environment)
    }

    /// Descriptor for this frame's render target
    ///
    /// Resolves the back-buffer size against the window's live framebuffer
    /// size and the sizing policy, reallocating when it changed. A resolved
    /// size with no area skips reallocation and keeps the previous render
    /// target. The descriptor reports the window's size, not the allocation.
    ///
    /// # Errors
    /// The native resize failing.
    ///
    /// # Panics
    /// If the session is not active.
    pub fn swapchain(&mut self) -> GlueResult<SwapchainDescriptor> {
        let active = self.active_mut("swapchain");

        let window_size = active.window.framebuffer_size();
        let current = active.backend.backbuffer_size();
        let resolved = active.config.backbuffer.resolve(current, window_size);

        if resolved != current {
            if resolved.is_empty() {
                log::trace!("Skipping back-buffer reallocation to {resolved}");
            } else {
                #[cfg(debug_assertions)]
                log::info!("Drawable resized: {resolved}");

                active.backend.resize_backbuffer(resolved).inspect_err(|e| {
                    log::error!("{e}");
                })?;
            }
        }

        Ok(active.backend.swapchain(window_size))
    }

    /// Show the rendered frame
    ///
    /// # Errors
    /// The native present call failing.
    ///
    /// # Panics
    /// If the session is not active.
    pub fn present(&mut self) -> GlueResult<()> {
        let active = self.active_mut("present");
        let vsync_disabled = active.config.vsync_disabled;
        active.backend.present(vsync_disabled)
    }

    /// Flip vsync; takes effect at the next [`Session::present`]
    ///
    /// Returns whether vsync is now disabled.
    ///
    /// # Panics
    /// If the session is not active.
    pub fn toggle_vsync(&mut self) -> bool {
        let active = self.active_mut("toggle_vsync");
        active.config.vsync_disabled = !active.config.vsync_disabled;
        log::debug!(
            "Vsync {}",
            if active.config.vsync_disabled { "disabled" } else { "enabled" }
        );
        active.config.vsync_disabled
    }

    /// Release every native object and return to the uninitialized state
    ///
    /// Call after the renderer has shut down and before destroying the
    /// window. The session can then be set up again, for any window.
    ///
    /// # Panics
    /// If the session is not active.
    pub fn shutdown(&mut self) {
        match std::mem::replace(&mut self.state, SessionState::Uninitialized) {
            SessionState::Active(active) => {
                active.backend.shutdown();
                log::info!("Glue session shut down");
            }
            SessionState::Uninitialized => {
                panic!("shutdown: glue session is not initialized; call environment_setup() first")
            }
        }
    }

    /// Largest effective monitor size, usable in any state
    ///
    /// See [`window::max_monitor_size`].
    pub fn max_monitor_size<S>(monitors: &mut S) -> Extent
    where
        S: MonitorSource + ?Sized,
    {
        window::max_monitor_size(monitors)
    }

    #[cfg(test)]
    pub(crate) const fn backend(&self) -> Option<&B> {
        match &self.state {
            SessionState::Active(active) => Some(&active.backend),
            SessionState::Uninitialized => None,
        }
    }

    fn active(&self, operation: &str) -> &ActiveSession<'w, B> {
        match &self.state {
            SessionState::Active(active) => active,
            SessionState::Uninitialized => {
                panic!("{operation}: glue session is not initialized; call environment_setup() first")
            }
        }
    }

    fn active_mut(&mut self, operation: &str) -> &mut ActiveSession<'w, B> {
        match &mut self.state {
            SessionState::Active(active) => active,
            SessionState::Uninitialized => {
                panic!("{operation}: glue session is not initialized; call environment_setup() first")
            }
        }
    }
}

impl<B: PlatformBackend> Default for Session<'_, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PlatformBackend> Drop for Session<'_, B> {
    fn drop(&mut self) {
        if self.is_active() {
            log::warn!("Glue session dropped while active; shutting down");
            self.shutdown();
        }
    }
}
