// main.rs: window, event loop and the orbit-controlled demo scene

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod overlay;
mod renderer;

use std::sync::Arc;

use orbit_scene::{config, world::World};
use overlay::{UiAction, UiState};
use renderer::Renderer;

use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load_or_default();

    let event_loop = EventLoop::new();
    let window = match WindowBuilder::new()
        .with_title("Orbit Scene")
        .with_inner_size(LogicalSize::new(
            config.scene.window_width,
            config.scene.window_height,
        ))
        .build(&event_loop)
    {
        Ok(window) => Arc::new(window),
        Err(e) => {
            log::error!("Failed to create window: {e}");
            std::process::exit(1);
        }
    };

    let mut renderer = match pollster::block_on(Renderer::new(window.clone())) {
        Ok(renderer) => renderer,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let size = window.inner_size();
    let mut world = World::new(config, size.width, size.height);
    let mut ui_state = UiState::default();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                // egui gets first pick so menus and sliders don't orbit the camera,
                // except for the moves and release of a drag already in flight
                let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
                if response.consumed && !world.captures(&event) {
                    return;
                }

                match &event {
                    WindowEvent::CloseRequested => {
                        world.controls.dispose();
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    WindowEvent::Resized(new_size) => {
                        renderer.resize(*new_size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        let new_size = **new_inner_size;
                        renderer.resize(new_size);
                        world.resize(new_size.width, new_size.height);
                    }
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::R),
                                ..
                            },
                        ..
                    } => {
                        world.reset_view();
                    }
                    _ => {}
                }

                if world.handle_window_event(&event).repaint {
                    window.request_redraw();
                }
            }

            Event::RedrawRequested(_) => {
                world.frame();

                let mut actions = Vec::new();
                let render_result = renderer.render_with_ui(&window, |ctx| {
                    actions = overlay::draw_ui(ctx, &mut world, &mut ui_state);
                });

                for action in actions {
                    match action {
                        UiAction::ResetView => world.reset_view(),
                        UiAction::SetVsync(enabled) => renderer.set_vsync(enabled),
                        UiAction::Exit => {
                            world.controls.dispose();
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                }

                match render_result {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, exiting");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => log::warn!("Render error: {e:?}"),
                }
            }

            Event::MainEventsCleared => {
                window.request_redraw();
            }

            _ => {}
        }
    });
}
