//! winit window as an orbit-controls input surface.
//!
//! Turns `WindowEvent`s into [`InputEvent`]s. winit reports touches one
//! finger at a time, so the surface keeps the set of active touches and
//! reports all of them with every touch event.

use glam::Vec2;
use winit::event::{
    ElementState, KeyboardInput, MouseButton, MouseScrollDelta, TouchPhase, VirtualKeyCode,
    WindowEvent,
};

use crate::controls::{InputEvent, KeyCode, PointerButton};

/// Pixels per wheel line, as browsers report in pixel delta mode.
const LINE_HEIGHT: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct InputSurface {
    size: Vec2,
    cursor: Vec2,
    touches: Vec<(u64, Vec2)>,
}

impl InputSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Vec2::new(width as f32, height as f32),
            cursor: Vec2::ZERO,
            touches: Vec::new(),
        }
    }

    /// Surface size in physical pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Vec2::new(width as f32, height as f32);
    }

    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    pub fn translate(&mut self, event: &WindowEvent<'_>) -> Option<InputEvent> {
        match event {
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::PointerMove {
                    position: self.cursor,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = pointer_button(*button);
                let position = self.cursor;
                Some(match state {
                    ElementState::Pressed => InputEvent::PointerDown { button, position },
                    ElementState::Released => InputEvent::PointerUp { button, position },
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit is positive when scrolling up, the DOM is the other way round
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                (delta_y != 0.0).then_some(InputEvent::Wheel { delta_y })
            }
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(code),
                        ..
                    },
                ..
            } => key_code(*code).map(|key| InputEvent::KeyDown { key }),
            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.touch(touch.id, touch.phase, position)
            }
            _ => None,
        }
    }

    pub fn touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> Option<InputEvent> {
        match phase {
            TouchPhase::Started => {
                self.touches.retain(|(other, _)| *other != id);
                self.touches.push((id, position));
                Some(InputEvent::TouchStart {
                    touches: self.positions(),
                })
            }
            TouchPhase::Moved => {
                let entry = self.touches.iter_mut().find(|(other, _)| *other == id)?;
                entry.1 = position;
                Some(InputEvent::TouchMove {
                    touches: self.positions(),
                })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let before = self.touches.len();
                self.touches.retain(|(other, _)| *other != id);
                if self.touches.len() == before {
                    return None;
                }
                Some(InputEvent::TouchEnd {
                    touches: self.positions(),
                })
            }
        }
    }

    fn positions(&self) -> Vec<Vec2> {
        self.touches.iter().map(|(_, p)| *p).collect()
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

const LETTERS: [VirtualKeyCode; 26] = [
    VirtualKeyCode::A,
    VirtualKeyCode::B,
    VirtualKeyCode::C,
    VirtualKeyCode::D,
    VirtualKeyCode::E,
    VirtualKeyCode::F,
    VirtualKeyCode::G,
    VirtualKeyCode::H,
    VirtualKeyCode::I,
    VirtualKeyCode::J,
    VirtualKeyCode::K,
    VirtualKeyCode::L,
    VirtualKeyCode::M,
    VirtualKeyCode::N,
    VirtualKeyCode::O,
    VirtualKeyCode::P,
    VirtualKeyCode::Q,
    VirtualKeyCode::R,
    VirtualKeyCode::S,
    VirtualKeyCode::T,
    VirtualKeyCode::U,
    VirtualKeyCode::V,
    VirtualKeyCode::W,
    VirtualKeyCode::X,
    VirtualKeyCode::Y,
    VirtualKeyCode::Z,
];

/// DOM key code of a winit key. Only arrows and letters are mapped.
pub fn key_code(code: VirtualKeyCode) -> Option<KeyCode> {
    match code {
        VirtualKeyCode::Left => Some(KeyCode::LEFT),
        VirtualKeyCode::Up => Some(KeyCode::UP),
        VirtualKeyCode::Right => Some(KeyCode::RIGHT),
        VirtualKeyCode::Down => Some(KeyCode::DOWN),
        _ => LETTERS
            .iter()
            .position(|letter| *letter == code)
            .map(|i| KeyCode(65 + i as u32)),
    }
}
