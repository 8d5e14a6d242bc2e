use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};
use orbit_scene::controls::{
    ControlEvent, InputEvent, InteractionMode, OrbitCamera, OrbitControls, OrbitSettings,
    OrthographicCamera, PerspectiveCamera, PointerButton, POLE_EPS,
};

fn perspective(position: Vec3) -> PerspectiveCamera {
    PerspectiveCamera::new(60.0, 1.0, 0.1, 4000.0).with_position(position)
}

fn orthographic(position: Vec3) -> OrthographicCamera {
    OrthographicCamera::new(-50.0, 50.0, 50.0, -50.0, 0.1, 1000.0).with_position(position)
}

fn orbit<C: OrbitCamera>(camera: C, settings: OrbitSettings) -> OrbitControls<C> {
    OrbitControls::with_settings(camera, Vec3::ZERO, Vec2::new(100.0, 100.0), settings)
}

fn press<C: OrbitCamera>(controls: &mut OrbitControls<C>, button: PointerButton, at: Vec2) {
    controls.handle_event(&InputEvent::PointerDown {
        button,
        position: at,
    });
}

fn move_to<C: OrbitCamera>(controls: &mut OrbitControls<C>, at: Vec2) {
    controls.handle_event(&InputEvent::PointerMove { position: at });
}

fn release<C: OrbitCamera>(controls: &mut OrbitControls<C>, button: PointerButton, at: Vec2) {
    controls.handle_event(&InputEvent::PointerUp {
        button,
        position: at,
    });
}

fn wheel<C: OrbitCamera>(controls: &mut OrbitControls<C>, delta_y: f32) {
    controls.handle_event(&InputEvent::Wheel { delta_y });
}

/// Small deterministic generator for drag offsets.
struct Lcg(u32);

impl Lcg {
    fn next_offset(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 8) as f32 / (1u32 << 24) as f32 * 400.0 - 200.0
    }
}

#[test]
fn angles_stay_within_limits_for_any_drag() {
    let settings = OrbitSettings {
        min_polar_angle: 0.5,
        max_polar_angle: 2.0,
        min_azimuth_angle: -1.0,
        max_azimuth_angle: 1.0,
        ..OrbitSettings::default()
    };
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), settings);
    let mut rng = Lcg(7);

    let mut cursor = Vec2::ZERO;
    press(&mut controls, PointerButton::Primary, cursor);
    for _ in 0..200 {
        cursor += Vec2::new(rng.next_offset(), rng.next_offset());
        move_to(&mut controls, cursor);

        let phi = controls.polar_angle();
        let theta = controls.azimuthal_angle();
        assert!((0.5 - 1e-6..=2.0 + 1e-6).contains(&phi), "phi {phi}");
        assert!((-1.0 - 1e-6..=1.0 + 1e-6).contains(&theta), "theta {theta}");
        assert!((10.0 - controls.distance()).abs() < 1e-3);
    }
    release(&mut controls, PointerButton::Primary, cursor);
}

#[test]
fn unbounded_polar_angle_stops_short_of_the_poles() {
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), OrbitSettings::default());

    press(&mut controls, PointerButton::Primary, Vec2::ZERO);
    move_to(&mut controls, Vec2::new(0.0, 500.0));
    assert!(controls.polar_angle() >= POLE_EPS);

    move_to(&mut controls, Vec2::new(0.0, -500.0));
    assert!(controls.polar_angle() <= PI - POLE_EPS);
    assert!(controls.camera().position.is_finite());
}

#[test]
fn radius_stays_within_distance_limits() {
    let settings = OrbitSettings {
        min_distance: 5.0,
        max_distance: 50.0,
        ..OrbitSettings::default()
    };
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), settings);

    for _ in 0..100 {
        wheel(&mut controls, -100.0);
        assert!((5.0..=50.0).contains(&controls.distance()));
    }
    assert_eq!(controls.distance(), 5.0);

    for _ in 0..100 {
        wheel(&mut controls, 100.0);
        assert!((5.0..=50.0).contains(&controls.distance()));
    }
    assert_eq!(controls.distance(), 50.0);
}

#[test]
fn orthographic_zoom_stays_within_zoom_limits() {
    let settings = OrbitSettings {
        min_zoom: 0.5,
        max_zoom: 4.0,
        ..OrbitSettings::default()
    };
    let mut controls = orbit(orthographic(Vec3::new(0.0, 0.0, 10.0)), settings);

    // scrolling up magnifies
    for _ in 0..100 {
        wheel(&mut controls, -100.0);
        assert!((0.5..=4.0).contains(&controls.camera().zoom));
    }
    assert_eq!(controls.camera().zoom, 4.0);

    for _ in 0..100 {
        wheel(&mut controls, 100.0);
        assert!((0.5..=4.0).contains(&controls.camera().zoom));
    }
    assert_eq!(controls.camera().zoom, 0.5);
    assert!((controls.distance() - 10.0).abs() < 1e-4);
}

#[test]
fn reset_restores_the_constructed_pose() {
    let start = Vec3::new(3.0, 4.0, 12.0);
    let mut controls = orbit(perspective(start), OrbitSettings::default());

    press(&mut controls, PointerButton::Primary, Vec2::ZERO);
    move_to(&mut controls, Vec2::new(30.0, -12.0));
    release(&mut controls, PointerButton::Primary, Vec2::new(30.0, -12.0));
    press(&mut controls, PointerButton::Secondary, Vec2::ZERO);
    move_to(&mut controls, Vec2::new(-20.0, 40.0));
    release(&mut controls, PointerButton::Secondary, Vec2::new(-20.0, 40.0));
    wheel(&mut controls, 100.0);
    assert_ne!(controls.target(), Vec3::ZERO);

    controls.reset();
    controls.update();

    assert_eq!(controls.target(), Vec3::ZERO);
    assert!(controls.camera().position.distance(start) < 1e-4);
    assert_eq!(controls.mode(), InteractionMode::None);

    // a second reset lands on the same pose
    controls.reset();
    controls.update();
    assert!(controls.camera().position.distance(start) < 1e-4);
}

#[test]
fn reset_announces_a_change() {
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), OrbitSettings::default());
    press(&mut controls, PointerButton::Primary, Vec2::ZERO);
    move_to(&mut controls, Vec2::new(20.0, 0.0));
    release(&mut controls, PointerButton::Primary, Vec2::new(20.0, 0.0));

    let events = controls.subscribe();
    controls.reset();

    let received: Vec<_> = events.try_iter().collect();
    assert_eq!(received.first(), Some(&ControlEvent::Change));
    assert!(received.iter().all(|e| *e == ControlEvent::Change));
}

#[test]
fn reset_restores_orthographic_zoom() {
    let mut controls = orbit(orthographic(Vec3::new(0.0, 5.0, 10.0)), OrbitSettings::default());
    wheel(&mut controls, -100.0);
    wheel(&mut controls, -100.0);
    assert_ne!(controls.camera().zoom, 1.0);

    controls.reset();
    controls.update();
    assert_eq!(controls.camera().zoom, 1.0);
}

#[test]
fn one_update_consumes_pending_rotation_without_damping() {
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), OrbitSettings::default());
    press(&mut controls, PointerButton::Primary, Vec2::ZERO);
    move_to(&mut controls, Vec2::new(10.0, 10.0));

    let delta = controls.state().spherical_delta;
    assert_eq!(delta.theta, 0.0);
    assert_eq!(delta.phi, 0.0);
}

#[test]
fn damping_decays_pending_rotation_by_one_minus_factor() {
    let settings = OrbitSettings {
        enable_damping: true,
        damping_factor: 0.25,
        ..OrbitSettings::default()
    };
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), settings);
    press(&mut controls, PointerButton::Primary, Vec2::ZERO);
    move_to(&mut controls, Vec2::new(10.0, 5.0));
    release(&mut controls, PointerButton::Primary, Vec2::new(10.0, 5.0));

    let before = controls.state().spherical_delta;
    assert!(before.theta != 0.0 && before.phi != 0.0);

    controls.update();
    let after = controls.state().spherical_delta;
    assert_eq!(after.theta, before.theta * (1.0 - 0.25));
    assert_eq!(after.phi, before.phi * (1.0 - 0.25));
}

#[test]
fn second_button_does_not_interrupt_a_gesture() {
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), OrbitSettings::default());

    press(&mut controls, PointerButton::Primary, Vec2::ZERO);
    assert_eq!(controls.mode(), InteractionMode::Rotate);

    press(&mut controls, PointerButton::Secondary, Vec2::ZERO);
    press(&mut controls, PointerButton::Middle, Vec2::ZERO);
    assert_eq!(controls.mode(), InteractionMode::Rotate);

    // a touch cannot steal a pointer gesture either
    controls.handle_event(&InputEvent::TouchStart {
        touches: vec![Vec2::ZERO, Vec2::new(10.0, 0.0)],
    });
    assert_eq!(controls.mode(), InteractionMode::Rotate);

    release(&mut controls, PointerButton::Primary, Vec2::ZERO);
    assert_eq!(controls.mode(), InteractionMode::None);

    press(&mut controls, PointerButton::Secondary, Vec2::ZERO);
    assert_eq!(controls.mode(), InteractionMode::Pan);
}

#[test]
fn quarter_width_drag_turns_a_quarter() {
    let settings = OrbitSettings {
        rotate_speed: 1.0,
        ..OrbitSettings::default()
    };
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), settings);
    assert!(controls.azimuthal_angle().abs() < 1e-6);

    press(&mut controls, PointerButton::Primary, Vec2::ZERO);
    move_to(&mut controls, Vec2::new(25.0, 0.0));
    controls.update();

    // dragging right swings the camera towards -x
    assert!((controls.azimuthal_angle() + FRAC_PI_2).abs() < 1e-4);
    assert!((controls.distance() - 10.0).abs() < 1e-4);
    assert!((controls.camera().position - Vec3::new(-10.0, 0.0, 0.0)).length() < 1e-3);
}

#[test]
fn wheel_scales_radius_by_zoom_factor() {
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 100.0)), OrbitSettings::default());

    wheel(&mut controls, -100.0);
    controls.update();
    assert!((controls.distance() - 100.0 * 0.95).abs() < 1e-3);

    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 100.0)), OrbitSettings::default());
    wheel(&mut controls, 100.0);
    controls.update();
    assert!((controls.distance() - 100.0 / 0.95).abs() < 1e-3);
}

#[test]
fn wheel_tick_is_a_complete_gesture() {
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 100.0)), OrbitSettings::default());
    let events = controls.subscribe();

    wheel(&mut controls, 100.0);

    let received: Vec<_> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![ControlEvent::Change, ControlEvent::Start, ControlEvent::End]
    );
}

#[test]
fn touch_move_with_wrong_finger_count_is_ignored() {
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), OrbitSettings::default());

    controls.handle_event(&InputEvent::TouchStart {
        touches: vec![Vec2::new(10.0, 10.0), Vec2::new(60.0, 10.0)],
    });
    assert_eq!(controls.mode(), InteractionMode::TouchDolly);

    let position = controls.camera().position;
    let state = controls.state().clone();
    let response = controls.handle_event(&InputEvent::TouchMove {
        touches: vec![Vec2::new(40.0, 40.0)],
    });

    assert!(!response.consumed);
    assert_eq!(controls.camera().position, position);
    assert_eq!(controls.state(), &state);
    assert_eq!(controls.mode(), InteractionMode::TouchDolly);

    // a fresh touch start picks up the new finger count
    controls.handle_event(&InputEvent::TouchStart {
        touches: vec![Vec2::new(40.0, 40.0)],
    });
    assert_eq!(controls.mode(), InteractionMode::TouchRotate);
    let response = controls.handle_event(&InputEvent::TouchMove {
        touches: vec![Vec2::new(60.0, 40.0)],
    });
    assert!(response.repaint);
    assert_ne!(controls.camera().position, position);
}

#[test]
fn disposed_controls_ignore_input() {
    let mut controls = orbit(perspective(Vec3::new(0.0, 0.0, 10.0)), OrbitSettings::default());
    controls.dispose();
    controls.dispose();
    assert!(!controls.is_attached());

    let position = controls.camera().position;
    press(&mut controls, PointerButton::Primary, Vec2::ZERO);
    move_to(&mut controls, Vec2::new(50.0, 0.0));
    wheel(&mut controls, 100.0);

    assert_eq!(controls.mode(), InteractionMode::None);
    assert_eq!(controls.camera().position, position);
}
