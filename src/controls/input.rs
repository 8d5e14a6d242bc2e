//! Input vocabulary understood by the orbit controller.
//!
//! Hosts translate their native events (see [`crate::surface`] for winit)
//! into [`InputEvent`]s. Coordinates are in physical pixels relative to the
//! input surface.

use glam::Vec2;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

/// Platform-neutral key code. The arrow constants match DOM key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, position: Vec2 },
    PointerMove { position: Vec2 },
    PointerUp { button: PointerButton, position: Vec2 },
    /// DOM wheel convention: negative `delta_y` means scrolling up.
    Wheel { delta_y: f32 },
    KeyDown { key: KeyCode },
    /// All touches active after the change, first touch first.
    TouchStart { touches: Vec<Vec2> },
    TouchMove { touches: Vec<Vec2> },
    TouchEnd { touches: Vec<Vec2> },
    ContextMenu,
}

impl InputEvent {
    pub(crate) fn class(&self) -> ListenerClass {
        match self {
            InputEvent::PointerDown { .. } => ListenerClass::PointerDown,
            InputEvent::PointerMove { .. } => ListenerClass::PointerMove,
            InputEvent::PointerUp { .. } => ListenerClass::PointerUp,
            InputEvent::Wheel { .. } => ListenerClass::Wheel,
            InputEvent::KeyDown { .. } => ListenerClass::KeyDown,
            InputEvent::TouchStart { .. } => ListenerClass::TouchStart,
            InputEvent::TouchMove { .. } => ListenerClass::TouchMove,
            InputEvent::TouchEnd { .. } => ListenerClass::TouchEnd,
            InputEvent::ContextMenu => ListenerClass::ContextMenu,
        }
    }
}

/// What the host should do with an event after the controller saw it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The controller used the event; the host should not act on it.
    pub consumed: bool,
    /// The camera may have moved.
    pub repaint: bool,
}

impl EventResponse {
    pub(crate) const IGNORED: EventResponse = EventResponse {
        consumed: false,
        repaint: false,
    };

    pub(crate) const CONSUMED: EventResponse = EventResponse {
        consumed: true,
        repaint: false,
    };

    pub(crate) const MOVED: EventResponse = EventResponse {
        consumed: true,
        repaint: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    None,
    Rotate,
    Dolly,
    Pan,
    TouchRotate,
    TouchDolly,
    TouchPan,
}

impl InteractionMode {
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            InteractionMode::TouchRotate | InteractionMode::TouchDolly | InteractionMode::TouchPan
        )
    }
}

/// Logical action a pointer button is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Orbit,
    Zoom,
    Pan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MouseBindings {
    pub orbit: PointerButton,
    pub zoom: PointerButton,
    pub pan: PointerButton,
}

impl Default for MouseBindings {
    fn default() -> Self {
        Self {
            orbit: PointerButton::Primary,
            zoom: PointerButton::Middle,
            pan: PointerButton::Secondary,
        }
    }
}

impl MouseBindings {
    pub fn action_for(&self, button: PointerButton) -> Option<PointerAction> {
        if button == self.orbit {
            Some(PointerAction::Orbit)
        } else if button == self.zoom {
            Some(PointerAction::Zoom)
        } else if button == self.pan {
            Some(PointerAction::Pan)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub up: KeyCode,
    pub right: KeyCode,
    pub bottom: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::LEFT,
            up: KeyCode::UP,
            right: KeyCode::RIGHT,
            bottom: KeyCode::DOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerClass {
    PointerDown,
    PointerMove,
    PointerUp,
    Wheel,
    KeyDown,
    TouchStart,
    TouchMove,
    TouchEnd,
    ContextMenu,
}

/// Event classes the controller currently listens to.
///
/// Press, wheel, touch, key and context-menu listeners live for the whole
/// attachment; move and release are only attached while a pointer gesture
/// is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Listeners {
    surface: bool,
    gesture: bool,
}

impl Listeners {
    pub fn attached() -> Self {
        Self {
            surface: true,
            gesture: false,
        }
    }

    pub fn is_listening(&self, class: ListenerClass) -> bool {
        match class {
            ListenerClass::PointerMove | ListenerClass::PointerUp => self.gesture,
            _ => self.surface,
        }
    }

    pub fn attach_gesture(&mut self) {
        if self.surface {
            self.gesture = true;
        }
    }

    pub fn detach_gesture(&mut self) {
        self.gesture = false;
    }

    pub fn detach_all(&mut self) {
        self.surface = false;
        self.gesture = false;
    }

    pub fn is_attached(&self) -> bool {
        self.surface
    }
}
