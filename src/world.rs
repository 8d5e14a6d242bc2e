// world.rs: everything the demo loop needs, passed around by reference

use std::sync::mpsc::Receiver;
use std::time::Instant;

use glam::Vec2;
use winit::event::{ElementState, WindowEvent};

use crate::config::SceneConfig;
use crate::controls::{ControlEvent, EventResponse, OrbitCamera, OrbitControls, PerspectiveCamera};
use crate::surface::InputSurface;

/// Frames per second, refreshed once a second.
#[derive(Debug)]
pub struct FpsCounter {
    last_frame_time: Instant,
    frame_count: u32,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }
}

impl FpsCounter {
    pub fn tick(&mut self) -> f32 {
        self.frame_count += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame_time).as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.last_frame_time = now;
        }
        self.fps
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

pub struct World {
    pub controls: OrbitControls<PerspectiveCamera>,
    pub surface: InputSurface,
    pub config: SceneConfig,
    pub fps: FpsCounter,
    events: Receiver<ControlEvent>,
    gesture_active: bool,
    changes: u64,
}

impl World {
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Self {
        let scene = &config.scene;
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let camera = PerspectiveCamera::new(scene.fov, aspect, scene.near, scene.far)
            .with_position(scene.camera_position);

        let mut controls = OrbitControls::with_settings(
            camera,
            scene.target,
            Vec2::new(width as f32, height as f32),
            config.controls.clone(),
        );
        let events = controls.subscribe();

        log::info!(
            "Orbit controls ready: distance {:.1}, polar {:.3}, azimuth {:.3}",
            controls.distance(),
            controls.polar_angle(),
            controls.azimuthal_angle()
        );

        Self {
            controls,
            surface: InputSurface::new(width, height),
            config,
            fps: FpsCounter::default(),
            events,
            gesture_active: false,
            changes: 0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface.resize(width, height);
        self.controls.set_viewport_size(width as f32, height as f32);
        let camera = self.controls.camera_mut();
        camera.set_aspect(width as f32 / height as f32);
        camera.update_projection();
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent<'_>) -> EventResponse {
        if let WindowEvent::Resized(size) = event {
            self.resize(size.width, size.height);
            return EventResponse::default();
        }

        match self.surface.translate(event) {
            Some(input) => self.controls.handle_event(&input),
            None => EventResponse::default(),
        }
    }

    /// Moves and releases that belong to an in-flight mouse gesture. These reach
    /// the controller even when the UI claims the pointer, so a drag released
    /// over a panel still ends.
    pub fn captures(&self, event: &WindowEvent<'_>) -> bool {
        self.controls.pointer_gesture_active()
            && matches!(
                event,
                WindowEvent::CursorMoved { .. }
                    | WindowEvent::MouseInput {
                        state: ElementState::Released,
                        ..
                    }
            )
    }

    /// Per-frame step: advances the controls and drains their notifications.
    pub fn frame(&mut self) -> f32 {
        self.controls.update();
        self.drain_events();
        self.fps.tick()
    }

    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ControlEvent::Start => self.gesture_active = true,
                ControlEvent::End => self.gesture_active = false,
                ControlEvent::Change => self.changes += 1,
            }
        }
    }

    pub fn gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Number of change notifications seen so far.
    pub fn changes(&self) -> u64 {
        self.changes
    }

    pub fn reset_view(&mut self) {
        self.controls.reset();
        self.drain_events();
    }
}
