//! Glue demo application
//!
//! Opens a resizable GLFW window and drives the glue session's frame loop:
//! setup, per-frame swapchain query, present, shutdown. No renderer is
//! attached, so the window shows whatever the swapchain happens to hold; run
//! with `RUST_LOG=debug` and resize the window to watch the back-buffer policy.
//!
//! ```text
//! glue_demo [CONFIG.toml|CONFIG.ron] [--full-monitor]
//! ```
//!
//! Keys: `V` toggles vsync, `Escape` quits.

use swapchain_glue::config::{Config, GlueConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    swapchain_glue::foundation::logging::init();

    let mut config = GlueConfig::default();
    let mut full_monitor = false;
    for arg in std::env::args().skip(1) {
        if arg == "--full-monitor" {
            full_monitor = true;
        } else {
            log::info!("Loading glue configuration from {arg}");
            config = GlueConfig::load_from_file(&arg)?;
        }
    }

    run(config, full_monitor)
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
fn run(config: GlueConfig, full_monitor: bool) -> Result<(), Box<dyn std::error::Error>> {
    use glfw::{Action, ClientApiHint, Key, WindowEvent, WindowHint, WindowMode};
    use swapchain_glue::prelude::*;

    let mut glfw = glfw::init(glfw::fail_on_errors)?;
    glfw.default_window_hints();
    glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
    glfw.window_hint(WindowHint::ScaleToMonitor(true));

    let (mut window, events) = glfw
        .create_window(320, 240, "Swapchain Glue Demo", WindowMode::Windowed)
        .ok_or("Failed to create window")?;
    window.set_key_polling(true);

    let config = if full_monitor {
        let monitor_size = max_monitor_size(&mut glfw);
        log::info!("Sizing back-buffer to cover all monitors: {monitor_size}");
        config.with_backbuffer(BackbufferPolicy::covering_monitors(monitor_size))
    } else {
        config
    };

    let mut session: Session<'_, DefaultBackend> = Session::new();
    let environment = session.environment_setup(&window, config)?;
    log::info!("Environment ready: {:?}", environment.native);

    let mut running = true;
    let mut frame: u64 = 0;
    while running && !window.should_close() {
        glfw.poll_events();
        for (_, event) in glfw::flush_messages(&events) {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => running = false,
                WindowEvent::Key(Key::V, _, Action::Press, _) => {
                    let disabled = session.toggle_vsync();
                    log::info!("Vsync {}", if disabled { "off" } else { "on" });
                }
                _ => {}
            }
        }

        let swapchain = session.swapchain()?;
        if frame % 600 == 0 {
            log::debug!(
                "Frame {frame}: viewport {}x{}, back-buffer {}",
                swapchain.width,
                swapchain.height,
                session.backbuffer_size()
            );
        }

        session.present()?;
        frame += 1;
    }

    session.shutdown();
    log::info!("Glue demo finished after {frame} frames");
    Ok(())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn run(_config: GlueConfig, _full_monitor: bool) -> Result<(), Box<dyn std::error::Error>> {
    Err(format!("no native graphics backend for {}", std::env::consts::OS).into())
}
