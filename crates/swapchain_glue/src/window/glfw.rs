//! GLFW adapters
//!
//! `glfw::Window` (and the boxed `glfw::PWindow` returned by
//! `Glfw::create_window`) is a [`WindowSource`] and `glfw::Glfw` is a
//! [`MonitorSource`]. Create the window with
//! `WindowHint::ClientApi(ClientApiHint::NoApi)`: the backends attach their
//! own swapchain or layer to it.

use glfw::Context;
use raw_window_handle::RawWindowHandle;

use super::{MonitorInfo, MonitorSource, WindowId, WindowSource};
use crate::error::{GlueError, GlueResult};
use crate::foundation::Extent;

impl WindowSource for glfw::Window {
    fn framebuffer_size(&self) -> Extent {
        let (width, height) = self.get_framebuffer_size();
        Extent::from_signed(width, height)
    }

    fn window_handle(&self) -> GlueResult<RawWindowHandle> {
        native_handle(self)
    }

    fn id(&self) -> WindowId {
        WindowId(self.window_ptr() as usize)
    }
}

impl WindowSource for glfw::PWindow {
    fn framebuffer_size(&self) -> Extent {
        (**self).framebuffer_size()
    }

    fn window_handle(&self) -> GlueResult<RawWindowHandle> {
        (**self).window_handle()
    }

    fn id(&self) -> WindowId {
        (**self).id()
    }
}

impl MonitorSource for glfw::Glfw {
    fn monitors(&mut self) -> Vec<MonitorInfo> {
        self.with_connected_monitors(|_, monitors| {
            monitors
                .iter()
                .filter_map(|monitor| {
                    let Some(mode) = monitor.get_video_mode() else {
                        log::warn!("Skipping monitor without a video mode");
                        return None;
                    };
                    let (x_scale, y_scale) = monitor.get_content_scale();
                    Some(MonitorInfo::new(mode.width, mode.height, x_scale, y_scale))
                })
                .collect()
        })
    }
}

#[cfg(target_os = "windows")]
fn native_handle(window: &glfw::Window) -> GlueResult<RawWindowHandle> {
    use std::num::NonZeroIsize;

    let hwnd = NonZeroIsize::new(window.get_win32_window() as isize)
        .ok_or_else(|| GlueError::Window("GLFW returned a null HWND".to_string()))?;

    Ok(RawWindowHandle::Win32(raw_window_handle::Win32WindowHandle::new(hwnd)))
}

#[cfg(target_os = "macos")]
fn native_handle(window: &glfw::Window) -> GlueResult<RawWindowHandle> {
    use objc2::msg_send;
    use objc2::runtime::AnyObject;
    use std::ptr::NonNull;

    let ns_window = window.get_cocoa_window().cast::<AnyObject>();
    // SAFETY: GLFW keeps the NSWindow alive for as long as `window` exists.
    let ns_window = unsafe { ns_window.as_ref() }
        .ok_or_else(|| GlueError::Window("GLFW returned a null NSWindow".to_string()))?;

    // SAFETY: `contentView` is a plain NSWindow getter returning a borrowed NSView.
    let ns_view: *mut AnyObject = unsafe { msg_send![ns_window, contentView] };
    let ns_view = NonNull::new(ns_view.cast())
        .ok_or_else(|| GlueError::Window("NSWindow has no content view".to_string()))?;

    Ok(RawWindowHandle::AppKit(raw_window_handle::AppKitWindowHandle::new(ns_view)))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn native_handle(_window: &glfw::Window) -> GlueResult<RawWindowHandle> {
    Err(GlueError::UnsupportedWindowHandle(format!(
        "no native graphics backend for {}",
        std::env::consts::OS
    )))
}
