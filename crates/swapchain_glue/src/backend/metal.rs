//! Metal backend
//!
//! The compositor owns the swapchain here: a `CAMetalLayer` is attached to the
//! window's content view and hands out one drawable per frame. Resizing sets
//! the layer's drawable size; the renderer presents the drawable itself when
//! it commits its command buffer.

use std::ffi::c_void;

use objc2::msg_send;
use objc2::rc::{autoreleasepool, Retained};
use objc2::runtime::{AnyObject, ProtocolObject};
use objc2_core_foundation::CGSize;
use objc2_metal::{MTLCreateSystemDefaultDevice, MTLDevice, MTLPixelFormat};
use objc2_quartz_core::{CAMetalDrawable, CAMetalLayer};
use raw_window_handle::RawWindowHandle;

use super::PlatformBackend;
use crate::config::GlueConfig;
use crate::descriptor::{
    EnvironmentDefaults, EnvironmentDescriptor, NativeEnvironment, NativeHandle,
    NativeRenderTarget, SwapchainDescriptor,
};
use crate::error::{GlueError, GlueResult};
use crate::foundation::Extent;
use crate::window::WindowSource;

// MTLCreateSystemDefaultDevice returns nil unless CoreGraphics is linked.
#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {}

const MAX_DRAWABLES: usize = 2;

/// Metal device and the `CAMetalLayer` presenting into the window
///
/// Fields are declared dependents-first: the frame's drawable, then the
/// layer, then the device.
pub struct MetalBackend {
    drawable: Option<Retained<ProtocolObject<dyn CAMetalDrawable>>>,
    layer: Retained<CAMetalLayer>,
    device: Retained<ProtocolObject<dyn MTLDevice>>,
}

impl PlatformBackend for MetalBackend {
    fn init(window: &dyn WindowSource, config: &GlueConfig) -> GlueResult<Self> {
        let ns_view = match window.window_handle()? {
            RawWindowHandle::AppKit(handle) => handle.ns_view,
            other => return Err(GlueError::UnsupportedWindowHandle(format!("{other:?}"))),
        };

        let device = unsafe { MTLCreateSystemDefaultDevice() }
            .ok_or_else(|| GlueError::DeviceCreation("no Metal device available".to_string()))?;
        log::debug!("Created Metal device");

        let size = window.framebuffer_size();
        let layer = unsafe { CAMetalLayer::new() };
        unsafe {
            layer.setDevice(Some(&*device));
            layer.setPixelFormat(MTLPixelFormat::BGRA8Unorm);
            layer.setFramebufferOnly(true);
            layer.setMaximumDrawableCount(MAX_DRAWABLES);
            layer.setDisplaySyncEnabled(!config.vsync_disabled);
            layer.setDrawableSize(to_cg_size(size));
        }

        // SAFETY: the view belongs to the bound window, which outlives the session.
        let view = unsafe { ns_view.cast::<AnyObject>().as_ref() };
        unsafe {
            let _: () = msg_send![view, setLayer: &*layer];
            let _: () = msg_send![view, setWantsLayer: true];
        }
        log::debug!("Attached CAMetalLayer: {size}");

        Ok(Self {
            drawable: None,
            layer,
            device,
        })
    }

    fn environment(&self) -> EnvironmentDescriptor {
        EnvironmentDescriptor {
            defaults: EnvironmentDefaults::default(),
            native: NativeEnvironment::Metal {
                device: object_handle(&self.device),
            },
        }
    }

    fn backbuffer_size(&self) -> Extent {
        let size = unsafe { self.layer.drawableSize() };
        Extent::new(size.width as u32, size.height as u32)
    }

    fn resize_backbuffer(&mut self, size: Extent) -> GlueResult<()> {
        self.drawable = None;

        if size.is_empty() {
            return Ok(());
        }

        unsafe { self.layer.setDrawableSize(to_cg_size(size)) };
        Ok(())
    }

    fn swapchain(&mut self, window_size: Extent) -> SwapchainDescriptor {
        // Drawables come back autoreleased; keep our own reference past the pool.
        self.drawable = autoreleasepool(|_| unsafe { self.layer.nextDrawable() });

        let current_drawable = match &self.drawable {
            Some(drawable) => object_handle(drawable),
            None => {
                log::warn!("CAMetalLayer had no drawable available");
                NativeHandle::null()
            }
        };

        SwapchainDescriptor::new(window_size, NativeRenderTarget::Metal { current_drawable })
    }

    fn present(&mut self, vsync_disabled: bool) -> GlueResult<()> {
        unsafe { self.layer.setDisplaySyncEnabled(!vsync_disabled) };
        self.drawable = None;
        Ok(())
    }

    fn shutdown(self) {
        drop(self);
        // Metal has no live-object report comparable to DXGI's debug layer.
        log::debug!("Released Metal device and layer");
    }
}

fn to_cg_size(size: Extent) -> CGSize {
    CGSize {
        width: f64::from(size.width),
        height: f64::from(size.height),
    }
}

fn object_handle<T: ?Sized>(object: &Retained<T>) -> NativeHandle {
    NativeHandle::from_ptr(Retained::as_ptr(object).cast::<c_void>())
}
