//! Orbit camera controls.
//!
//! Orbits, dollies (zooms) and pans a camera around a target point while
//! keeping the camera's `up` direction fixed.
//!
//! - Orbit: primary button, or one finger
//! - Zoom: middle button or wheel, or two finger pinch
//! - Pan: secondary button or arrow keys, or three finger swipe
//!
//! The host forwards input through [`OrbitControls::handle_event`] and calls
//! [`OrbitControls::update`] once per frame. Input that changes the camera
//! also runs `update` immediately. The controller is single threaded and not
//! reentrant.

pub mod camera;
pub mod error;
pub mod events;
pub mod input;
pub mod settings;
pub mod spherical;

use glam::{Quat, Vec2, Vec3};
use std::f32::consts::PI;
use std::sync::mpsc::Receiver;

pub use camera::{look_rotation, OrbitCamera, OrthographicCamera, PerspectiveCamera, Projection};
pub use error::{ControlsError, Feature};
pub use events::{ControlEvent, EventDispatcher};
pub use input::{
    EventResponse, InputEvent, InteractionMode, KeyBindings, KeyCode, MouseBindings,
    PointerAction, PointerButton,
};
pub use settings::OrbitSettings;
pub use spherical::{Spherical, POLE_EPS};

use input::Listeners;

/// Minimum squared movement (or rotation) that counts as a change.
const CHANGE_EPS: f32 = 0.000001;

/// Orbital state. Pending fields are filled by input and consumed by `update`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Camera offset from `target` in the up-aligned frame, as of the last update.
    pub spherical: Spherical,
    /// Pending theta/phi increments. `radius` is unused.
    pub spherical_delta: Spherical,
    /// Pending radius multiplier.
    pub scale: f32,
    /// Pending translation of `target`.
    pub pan_offset: Vec3,
    /// Orthographic zoom changed since the last emitted change.
    pub zoom_changed: bool,
}

impl OrbitState {
    fn new(target: Vec3) -> Self {
        Self {
            target,
            spherical: Spherical::default(),
            spherical_delta: Spherical::new(0.0, 0.0, 0.0),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            zoom_changed: false,
        }
    }

    fn clear_pending(&mut self) {
        self.spherical_delta = Spherical::new(0.0, 0.0, 0.0);
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }
}

pub struct OrbitControls<C: OrbitCamera> {
    camera: C,
    pub settings: OrbitSettings,
    state: OrbitState,
    mode: InteractionMode,
    /// Input surface size in pixels.
    viewport: Vec2,

    // for reset
    target0: Vec3,
    position0: Vec3,
    zoom0: f32,

    // camera.up to +Y and back, fixed at construction
    quat: Quat,
    quat_inverse: Quat,

    // pose at the last emitted change
    last_position: Vec3,
    last_rotation: Quat,

    // gesture anchors
    rotate_start: Vec2,
    pan_start: Vec2,
    dolly_start: Vec2,

    listeners: Listeners,
    dispatcher: EventDispatcher,
}

fn clamp_to(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}

fn touch_distance(touches: &[Vec2]) -> f32 {
    touches[0].distance(touches[1])
}

impl<C: OrbitCamera> OrbitControls<C> {
    pub fn new(camera: C, target: Vec3, viewport: Vec2) -> Self {
        Self::with_settings(camera, target, viewport, OrbitSettings::default())
    }

    pub fn with_settings(camera: C, target: Vec3, viewport: Vec2, settings: OrbitSettings) -> Self {
        let up = camera.up().normalize_or(Vec3::Y);
        let quat = Quat::from_rotation_arc(up, Vec3::Y);
        let position0 = camera.position();
        let zoom0 = camera.zoom();

        let mut controls = Self {
            camera,
            settings,
            state: OrbitState::new(target),
            mode: InteractionMode::None,
            viewport: Vec2::ONE,
            target0: target,
            position0,
            zoom0,
            quat,
            quat_inverse: quat.inverse(),
            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            rotate_start: Vec2::ZERO,
            pan_start: Vec2::ZERO,
            dolly_start: Vec2::ZERO,
            listeners: Listeners::attached(),
            dispatcher: EventDispatcher::new(),
        };
        controls.set_viewport_size(viewport.x, viewport.y);

        // force an update at start
        controls.update();
        controls
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Edits made here that move the camera are overwritten by the next update.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn target(&self) -> Vec3 {
        self.state.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.state.target = target;
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// A mouse gesture is in flight; its moves and release belong to the controller.
    pub fn pointer_gesture_active(&self) -> bool {
        self.mode != InteractionMode::None && !self.mode.is_touch()
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn polar_angle(&self) -> f32 {
        self.state.spherical.phi
    }

    pub fn azimuthal_angle(&self) -> f32 {
        self.state.spherical.theta
    }

    pub fn distance(&self) -> f32 {
        self.state.spherical.radius
    }

    pub fn subscribe(&mut self) -> Receiver<ControlEvent> {
        self.dispatcher.subscribe()
    }

    pub fn is_attached(&self) -> bool {
        self.listeners.is_attached()
    }

    /// Capture the current target, position and zoom as the reset pose.
    pub fn save_state(&mut self) {
        self.target0 = self.state.target;
        self.position0 = self.camera.position();
        self.zoom0 = self.camera.zoom();
    }

    pub fn reset(&mut self) {
        self.state.target = self.target0;
        self.camera.set_position(self.position0);
        self.camera.set_zoom(self.zoom0);
        self.state.clear_pending();

        self.camera.update_projection();
        self.dispatcher.dispatch(ControlEvent::Change);

        self.update();

        self.listeners.detach_gesture();
        self.mode = InteractionMode::None;
    }

    /// Stop reacting to input. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.listeners.is_attached() {
            log::debug!("orbit controls detached from input surface");
        }
        self.listeners.detach_all();
    }

    /// Apply pending input to the camera. Returns true when a change was emitted.
    pub fn update(&mut self) -> bool {
        let mut offset = self.camera.position() - self.state.target;

        // rotate offset to "y-axis-is-up" space
        offset = self.quat * offset;

        self.state.spherical = Spherical::from_vec3(offset);

        if self.settings.auto_rotate && self.mode == InteractionMode::None {
            self.rotate_left(self.settings.auto_rotation_angle());
        }

        let s = &self.settings;
        let state = &mut self.state;

        state.spherical.theta += state.spherical_delta.theta;
        state.spherical.phi += state.spherical_delta.phi;

        state.spherical.theta =
            clamp_to(state.spherical.theta, s.min_azimuth_angle, s.max_azimuth_angle);
        state.spherical.phi = clamp_to(state.spherical.phi, s.min_polar_angle, s.max_polar_angle);
        state.spherical.make_safe();

        state.spherical.radius *= state.scale;
        state.spherical.radius = clamp_to(state.spherical.radius, s.min_distance, s.max_distance);

        state.target += state.pan_offset;

        // back to "camera-up-vector-is-up" space
        let offset = self.quat_inverse * state.spherical.to_vec3();
        let position = state.target + offset;

        self.camera.set_position(position);
        self.camera.look_at(state.target);

        if s.enable_damping {
            state.spherical_delta.theta *= 1.0 - s.damping_factor;
            state.spherical_delta.phi *= 1.0 - s.damping_factor;
        } else {
            state.spherical_delta = Spherical::new(0.0, 0.0, 0.0);
        }

        state.scale = 1.0;
        state.pan_offset = Vec3::ZERO;

        // min(displacement, rotation in radians)^2 > eps,
        // using the small-angle approximation cos(x/2) = 1 - x^2 / 8
        let rotation = self.camera.rotation();
        if state.zoom_changed
            || self.last_position.distance_squared(position) > CHANGE_EPS
            || 8.0 * (1.0 - self.last_rotation.dot(rotation)) > CHANGE_EPS
        {
            self.dispatcher.dispatch(ControlEvent::Change);

            self.last_position = position;
            self.last_rotation = rotation;
            state.zoom_changed = false;

            return true;
        }

        false
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        if !self.listeners.is_listening(event.class()) {
            return EventResponse::IGNORED;
        }

        match event {
            InputEvent::PointerDown { button, position } => self.on_pointer_down(*button, *position),
            InputEvent::PointerMove { position } => self.on_pointer_move(*position),
            InputEvent::PointerUp { .. } => self.on_pointer_up(),
            InputEvent::Wheel { delta_y } => self.on_wheel(*delta_y),
            InputEvent::KeyDown { key } => self.on_key_down(*key),
            InputEvent::TouchStart { touches } => self.on_touch_start(touches),
            InputEvent::TouchMove { touches } => self.on_touch_move(touches),
            InputEvent::TouchEnd { .. } => self.on_touch_end(),
            // keep the secondary button usable for panning
            InputEvent::ContextMenu => EventResponse::CONSUMED,
        }
    }

    //
    // state mutations shared by all input sources
    //

    fn rotate_left(&mut self, angle: f32) {
        self.state.spherical_delta.theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.state.spherical_delta.phi -= angle;
    }

    fn rotate_by_pixels(&mut self, delta: Vec2) {
        let speed = self.settings.rotate_speed;

        // a drag across the whole surface is a full turn
        self.rotate_left(2.0 * PI * delta.x / self.viewport.x * speed);

        // vertically too, although phi is limited to half of that
        self.rotate_up(2.0 * PI * delta.y / self.viewport.y * speed);
    }

    fn pan_left(&mut self, distance: f32) {
        let x_axis = self.camera.rotation() * Vec3::X;
        self.state.pan_offset += x_axis * -distance;
    }

    fn pan_up(&mut self, distance: f32) {
        let y_axis = self.camera.rotation() * Vec3::Y;
        self.state.pan_offset += y_axis * distance;
    }

    /// `delta_x` and `delta_y` are in pixels; right and down are positive.
    fn pan(&mut self, delta_x: f32, delta_y: f32) {
        match self.camera.projection() {
            Projection::Perspective { fov_y_degrees } => {
                let offset = self.camera.position() - self.state.target;

                // half of the fov is center to top of screen
                let target_distance =
                    offset.length() * (fov_y_degrees.to_radians() / 2.0).tan();

                // perspective pan follows the surface height on both axes
                let height = self.viewport.y;
                self.pan_left(2.0 * delta_x * target_distance / height);
                self.pan_up(2.0 * delta_y * target_distance / height);
            }
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
            } => {
                let zoom = self.camera.zoom();
                self.pan_left(delta_x * (right - left) / zoom / self.viewport.x);
                self.pan_up(delta_y * (top - bottom) / zoom / self.viewport.y);
            }
            Projection::Unknown => self.disable(Feature::Pan),
        }
    }

    fn dolly_in(&mut self, dolly_scale: f32) {
        match self.camera.projection() {
            Projection::Perspective { .. } => self.state.scale /= dolly_scale,
            Projection::Orthographic { .. } => {
                let zoom = self.camera.zoom() * dolly_scale;
                self.set_ortho_zoom(zoom);
            }
            Projection::Unknown => self.disable(Feature::Zoom),
        }
    }

    fn dolly_out(&mut self, dolly_scale: f32) {
        match self.camera.projection() {
            Projection::Perspective { .. } => self.state.scale *= dolly_scale,
            Projection::Orthographic { .. } => {
                let zoom = self.camera.zoom() / dolly_scale;
                self.set_ortho_zoom(zoom);
            }
            Projection::Unknown => self.disable(Feature::Zoom),
        }
    }

    fn set_ortho_zoom(&mut self, zoom: f32) {
        let zoom = clamp_to(zoom, self.settings.min_zoom, self.settings.max_zoom);
        self.camera.set_zoom(zoom);
        self.camera.update_projection();
        self.state.zoom_changed = true;
    }

    fn disable(&mut self, feature: Feature) {
        log::warn!("{}", ControlsError::UnsupportedProjection(feature));
        match feature {
            Feature::Pan => self.settings.enable_pan = false,
            Feature::Zoom => self.settings.enable_zoom = false,
        }
    }

    fn begin_gesture(&mut self) {
        log::debug!("orbit gesture started: {:?}", self.mode);
        self.dispatcher.dispatch(ControlEvent::Start);
    }

    fn end_gesture(&mut self) {
        log::debug!("orbit gesture ended: {:?}", self.mode);
        self.listeners.detach_gesture();
        self.dispatcher.dispatch(ControlEvent::End);
        self.mode = InteractionMode::None;
    }

    //
    // pointer
    //

    fn on_pointer_down(&mut self, button: PointerButton, position: Vec2) -> EventResponse {
        if !self.settings.enabled {
            return EventResponse::IGNORED;
        }

        // one gesture at a time
        if self.mode != InteractionMode::None {
            return EventResponse::CONSUMED;
        }

        match self.settings.mouse_buttons.action_for(button) {
            Some(PointerAction::Orbit) => {
                if !self.settings.enable_rotate {
                    return EventResponse::IGNORED;
                }
                self.rotate_start = position;
                self.mode = InteractionMode::Rotate;
            }
            Some(PointerAction::Zoom) => {
                if !self.settings.enable_zoom {
                    return EventResponse::IGNORED;
                }
                self.dolly_start = position;
                self.mode = InteractionMode::Dolly;
            }
            Some(PointerAction::Pan) => {
                if !self.settings.enable_pan {
                    return EventResponse::IGNORED;
                }
                self.pan_start = position;
                self.mode = InteractionMode::Pan;
            }
            None => return EventResponse::IGNORED,
        }

        self.listeners.attach_gesture();
        self.begin_gesture();
        EventResponse::CONSUMED
    }

    fn on_pointer_move(&mut self, position: Vec2) -> EventResponse {
        if !self.settings.enabled {
            return EventResponse::IGNORED;
        }

        match self.mode {
            InteractionMode::Rotate => {
                if !self.settings.enable_rotate {
                    return EventResponse::IGNORED;
                }
                let delta = position - self.rotate_start;
                self.rotate_by_pixels(delta);
                self.rotate_start = position;
            }
            InteractionMode::Dolly => {
                if !self.settings.enable_zoom {
                    return EventResponse::IGNORED;
                }
                let delta = position - self.dolly_start;
                let zoom_scale = self.settings.zoom_scale();
                if delta.y > 0.0 {
                    self.dolly_in(zoom_scale);
                } else if delta.y < 0.0 {
                    self.dolly_out(zoom_scale);
                }
                self.dolly_start = position;
            }
            InteractionMode::Pan => {
                if !self.settings.enable_pan {
                    return EventResponse::IGNORED;
                }
                let delta = position - self.pan_start;
                self.pan(delta.x, delta.y);
                self.pan_start = position;
            }
            _ => return EventResponse::IGNORED,
        }

        self.update();
        EventResponse::MOVED
    }

    fn on_pointer_up(&mut self) -> EventResponse {
        if !self.settings.enabled || self.mode == InteractionMode::None {
            return EventResponse::IGNORED;
        }

        self.end_gesture();
        EventResponse::CONSUMED
    }

    fn on_wheel(&mut self, delta_y: f32) -> EventResponse {
        let idle_or_orbiting = matches!(self.mode, InteractionMode::None | InteractionMode::Rotate);
        if !self.settings.enabled || !self.settings.enable_zoom || !idle_or_orbiting {
            return EventResponse::IGNORED;
        }

        let zoom_scale = self.settings.zoom_scale();
        if delta_y < 0.0 {
            self.dolly_out(zoom_scale);
        } else if delta_y > 0.0 {
            self.dolly_in(zoom_scale);
        }

        self.update();

        // a wheel tick is a whole gesture
        self.dispatcher.dispatch(ControlEvent::Start);
        self.dispatcher.dispatch(ControlEvent::End);
        EventResponse::MOVED
    }

    fn on_key_down(&mut self, key: KeyCode) -> EventResponse {
        let s = &self.settings;
        if !s.enabled || !s.enable_keys || !s.enable_pan {
            return EventResponse::IGNORED;
        }

        let speed = s.key_pan_speed;
        let keys = s.keys;
        if key == keys.up {
            self.pan(0.0, speed);
        } else if key == keys.bottom {
            self.pan(0.0, -speed);
        } else if key == keys.left {
            self.pan(speed, 0.0);
        } else if key == keys.right {
            self.pan(-speed, 0.0);
        } else {
            return EventResponse::IGNORED;
        }

        self.update();
        EventResponse::MOVED
    }

    //
    // touch
    //

    fn on_touch_start(&mut self, touches: &[Vec2]) -> EventResponse {
        if !self.settings.enabled {
            return EventResponse::IGNORED;
        }

        // a pointer gesture owns the controller until release
        if self.pointer_gesture_active() {
            return EventResponse::IGNORED;
        }

        match touches.len() {
            1 => {
                if !self.settings.enable_rotate {
                    return EventResponse::IGNORED;
                }
                self.rotate_start = touches[0];
                self.mode = InteractionMode::TouchRotate;
            }
            2 => {
                if !self.settings.enable_zoom {
                    return EventResponse::IGNORED;
                }
                self.dolly_start = Vec2::new(0.0, touch_distance(touches));
                self.mode = InteractionMode::TouchDolly;
            }
            3 => {
                if !self.settings.enable_pan {
                    return EventResponse::IGNORED;
                }
                self.pan_start = touches[0];
                self.mode = InteractionMode::TouchPan;
            }
            _ => self.mode = InteractionMode::None,
        }

        if self.mode == InteractionMode::None {
            return EventResponse::IGNORED;
        }

        self.begin_gesture();
        EventResponse::CONSUMED
    }

    fn on_touch_move(&mut self, touches: &[Vec2]) -> EventResponse {
        if !self.settings.enabled {
            return EventResponse::IGNORED;
        }

        match touches.len() {
            1 => {
                if !self.settings.enable_rotate || self.mode != InteractionMode::TouchRotate {
                    return EventResponse::IGNORED;
                }
                let delta = touches[0] - self.rotate_start;
                self.rotate_by_pixels(delta);
                self.rotate_start = touches[0];
            }
            2 => {
                if !self.settings.enable_zoom || self.mode != InteractionMode::TouchDolly {
                    return EventResponse::IGNORED;
                }
                let dolly_end = Vec2::new(0.0, touch_distance(touches));
                let delta = dolly_end - self.dolly_start;
                let zoom_scale = self.settings.zoom_scale();

                // spreading the fingers brings the camera closer
                if delta.y > 0.0 {
                    self.dolly_out(zoom_scale);
                } else if delta.y < 0.0 {
                    self.dolly_in(zoom_scale);
                }
                self.dolly_start = dolly_end;
            }
            3 => {
                if !self.settings.enable_pan || self.mode != InteractionMode::TouchPan {
                    return EventResponse::IGNORED;
                }
                let delta = touches[0] - self.pan_start;
                self.pan(delta.x, delta.y);
                self.pan_start = touches[0];
            }
            _ => {
                self.mode = InteractionMode::None;
                return EventResponse::IGNORED;
            }
        }

        self.update();
        EventResponse::MOVED
    }

    fn on_touch_end(&mut self) -> EventResponse {
        if !self.settings.enabled {
            return EventResponse::IGNORED;
        }

        self.end_gesture();
        EventResponse::CONSUMED
    }
}
