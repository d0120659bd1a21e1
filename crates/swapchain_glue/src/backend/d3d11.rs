//! Direct3D 11 backend
//!
//! Hardware device at feature level 11.1 with a DXGI flip-discard swapchain
//! bound to the window's `HWND`. Exactly one render-target view exists per
//! live swapchain; it is recreated after every back-buffer resize.

use std::ffi::c_void;

use raw_window_handle::RawWindowHandle;
use windows::core::Interface;
use windows::Win32::Foundation::{HMODULE, HWND};
use windows::Win32::Graphics::Direct3D::{D3D_DRIVER_TYPE_HARDWARE, D3D_FEATURE_LEVEL_11_1};
use windows::Win32::Graphics::Direct3D11::{
    D3D11CreateDevice, ID3D11Device, ID3D11DeviceContext, ID3D11RenderTargetView,
    ID3D11Texture2D, D3D11_CREATE_DEVICE_BGRA_SUPPORT, D3D11_CREATE_DEVICE_DEBUG,
    D3D11_CREATE_DEVICE_SINGLETHREADED, D3D11_SDK_VERSION,
};
use windows::Win32::Graphics::Dxgi::Common::{DXGI_FORMAT_B8G8R8A8_UNORM, DXGI_SAMPLE_DESC};
use windows::Win32::Graphics::Dxgi::{
    IDXGIAdapter, IDXGIDevice1, IDXGIFactory2, IDXGISwapChain1, DXGI_PRESENT,
    DXGI_SCALING_NONE, DXGI_SWAP_CHAIN_DESC1, DXGI_SWAP_CHAIN_FLAG,
    DXGI_SWAP_EFFECT_FLIP_DISCARD, DXGI_USAGE_RENDER_TARGET_OUTPUT,
};

use super::{sync_interval, PlatformBackend};
use crate::config::GlueConfig;
use crate::descriptor::{
    EnvironmentDefaults, EnvironmentDescriptor, NativeEnvironment, NativeHandle,
    NativeRenderTarget, SwapchainDescriptor, SAMPLE_COUNT,
};
use crate::error::{GlueError, GlueResult};
use crate::foundation::Extent;
use crate::window::WindowSource;

const BUFFER_COUNT: u32 = 2;

/// Direct3D 11 device, immediate context and swapchain
///
/// Fields are declared dependents-first so dropping releases the view, then
/// the swapchain, then the context and device.
pub struct D3d11Backend {
    render_target_view: Option<ID3D11RenderTargetView>,
    swap_chain: IDXGISwapChain1,
    swap_chain_desc: DXGI_SWAP_CHAIN_DESC1,
    device_context: ID3D11DeviceContext,
    device: ID3D11Device,
    debug_layer: bool,
}

impl PlatformBackend for D3d11Backend {
    fn init(window: &dyn WindowSource, config: &GlueConfig) -> GlueResult<Self> {
        let hwnd = match window.window_handle()? {
            RawWindowHandle::Win32(handle) => HWND(handle.hwnd.get() as *mut c_void),
            other => return Err(GlueError::UnsupportedWindowHandle(format!("{other:?}"))),
        };

        let debug_layer = config.debug_layer_enabled();
        let (device, device_context) = create_device(debug_layer)?;
        log::debug!("Created D3D11 device (debug layer: {debug_layer})");

        let swap_chain = create_swap_chain(&device, hwnd, window.framebuffer_size())?;

        // Zero-sized requests are resolved against the window by DXGI; read back
        // what was actually allocated.
        let swap_chain_desc = unsafe { swap_chain.GetDesc1() }
            .map_err(|e| GlueError::SwapchainCreation(e.to_string()))?;
        log::debug!(
            "Created DXGI swapchain: {}",
            Extent::new(swap_chain_desc.Width, swap_chain_desc.Height)
        );

        let mut backend = Self {
            render_target_view: None,
            swap_chain,
            swap_chain_desc,
            device_context,
            device,
            debug_layer,
        };

        if !backend.backbuffer_size().is_empty() {
            backend.render_target_view = Some(
                backend
                    .create_render_target_view()
                    .map_err(|e| GlueError::SwapchainCreation(e.to_string()))?,
            );
        }

        Ok(backend)
    }

    fn environment(&self) -> EnvironmentDescriptor {
        EnvironmentDescriptor {
            defaults: EnvironmentDefaults::default(),
            native: NativeEnvironment::D3d11 {
                device: NativeHandle::from_ptr(self.device.as_raw()),
                device_context: NativeHandle::from_ptr(self.device_context.as_raw()),
            },
        }
    }

    fn backbuffer_size(&self) -> Extent {
        Extent::new(self.swap_chain_desc.Width, self.swap_chain_desc.Height)
    }

    fn resize_backbuffer(&mut self, size: Extent) -> GlueResult<()> {
        if let Some(view) = self.render_target_view.take() {
            // Unbind before release; ResizeBuffers fails while the pipeline
            // still references a back-buffer.
            unsafe { self.device_context.ClearState() };
            drop(view);
        }

        if size.is_empty() {
            return Ok(());
        }

        match self.reallocate(size) {
            Ok(view) => {
                self.swap_chain_desc.Width = size.width;
                self.swap_chain_desc.Height = size.height;
                self.render_target_view = Some(view);
                Ok(())
            }
            Err(e) => {
                // Nothing usable is allocated; a zero size makes the next frame retry.
                self.swap_chain_desc.Width = 0;
                self.swap_chain_desc.Height = 0;
                Err(GlueError::Resize {
                    size,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn swapchain(&mut self, window_size: Extent) -> SwapchainDescriptor {
        let render_view = match &self.render_target_view {
            Some(view) => NativeHandle::from_ptr(view.as_raw()),
            None if window_size.is_empty() => {
                log::trace!("No render-target view while the window has no area");
                NativeHandle::null()
            }
            None => {
                log::warn!("D3D11 swapchain has no render-target view");
                NativeHandle::null()
            }
        };

        SwapchainDescriptor::new(window_size, NativeRenderTarget::D3d11 { render_view })
    }

    fn present(&mut self, vsync_disabled: bool) -> GlueResult<()> {
        unsafe { self.swap_chain.Present(sync_interval(vsync_disabled), DXGI_PRESENT(0)) }
            .ok()
            .map_err(|e| GlueError::Present(e.to_string()))
    }

    fn shutdown(self) {
        let debug_layer = self.debug_layer;
        drop(self);
        log::debug!("Released D3D11 device and swapchain");

        if cfg!(debug_assertions) && debug_layer {
            report_live_objects();
        }
    }
}

impl D3d11Backend {
    fn reallocate(&self, size: Extent) -> windows::core::Result<ID3D11RenderTargetView> {
        unsafe {
            self.swap_chain.ResizeBuffers(
                0,
                size.width,
                size.height,
                DXGI_FORMAT_B8G8R8A8_UNORM,
                DXGI_SWAP_CHAIN_FLAG(0),
            )
        }?;
        self.create_render_target_view()
    }

    fn create_render_target_view(&self) -> windows::core::Result<ID3D11RenderTargetView> {
        let backbuffer: ID3D11Texture2D = unsafe { self.swap_chain.GetBuffer(0) }?;

        let mut view = None;
        unsafe { self.device.CreateRenderTargetView(&backbuffer, None, Some(&mut view)) }?;
        view.ok_or_else(|| windows::core::Error::from(windows::Win32::Foundation::E_POINTER))
    }
}

fn create_device(debug_layer: bool) -> GlueResult<(ID3D11Device, ID3D11DeviceContext)> {
    let mut flags = D3D11_CREATE_DEVICE_SINGLETHREADED | D3D11_CREATE_DEVICE_BGRA_SUPPORT;
    if debug_layer {
        flags |= D3D11_CREATE_DEVICE_DEBUG;
    }

    let feature_levels = [D3D_FEATURE_LEVEL_11_1];
    let mut device = None;
    let mut device_context = None;
    unsafe {
        D3D11CreateDevice(
            None,
            D3D_DRIVER_TYPE_HARDWARE,
            HMODULE::default(),
            flags,
            Some(feature_levels.as_slice()),
            D3D11_SDK_VERSION,
            Some(&mut device),
            None,
            Some(&mut device_context),
        )
    }
    .map_err(|e| GlueError::DeviceCreation(e.to_string()))?;

    match (device, device_context) {
        (Some(device), Some(device_context)) => Ok((device, device_context)),
        _ => Err(GlueError::DeviceCreation(
            "D3D11CreateDevice returned no device".to_string(),
        )),
    }
}

fn create_swap_chain(device: &ID3D11Device, hwnd: HWND, size: Extent) -> GlueResult<IDXGISwapChain1> {
    let swapchain_error = |e: windows::core::Error| GlueError::SwapchainCreation(e.to_string());

    let dxgi_device: IDXGIDevice1 = device.cast().map_err(swapchain_error)?;
    let adapter: IDXGIAdapter = unsafe { dxgi_device.GetAdapter() }.map_err(swapchain_error)?;
    let factory: IDXGIFactory2 = unsafe { adapter.GetParent() }.map_err(swapchain_error)?;

    let desc = DXGI_SWAP_CHAIN_DESC1 {
        Width: size.width,
        Height: size.height,
        Format: DXGI_FORMAT_B8G8R8A8_UNORM,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: SAMPLE_COUNT,
            Quality: 0,
        },
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: BUFFER_COUNT,
        Scaling: DXGI_SCALING_NONE,
        SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
        ..Default::default()
    };

    unsafe { factory.CreateSwapChainForHwnd(device, hwnd, &desc, None, None) }
        .map_err(swapchain_error)
}

fn report_live_objects() {
    use windows::Win32::Graphics::Dxgi::{
        DXGIGetDebugInterface1, IDXGIDebug, DXGI_DEBUG_ALL, DXGI_DEBUG_RLO_DETAIL,
    };

    match unsafe { DXGIGetDebugInterface1::<IDXGIDebug>(0) } {
        Ok(debug) => {
            if let Err(e) = unsafe { debug.ReportLiveObjects(DXGI_DEBUG_ALL, DXGI_DEBUG_RLO_DETAIL) } {
                log::warn!("DXGI live object report failed: {e}");
            }
        }
        Err(e) => log::warn!("DXGI debug interface unavailable: {e}"),
    }
}
