// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events as delivered by the host.

use kurbo::{Point, Size, Vec2};

/// The primary pointer button.
pub const BUTTON_PRIMARY: u8 = 1;

/// A host key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Tab.
    pub const TAB: Self = Self(9);
    /// Return / Enter.
    pub const ENTER: Self = Self(13);
    /// Escape.
    pub const ESCAPE: Self = Self(27);
    /// Space bar.
    pub const SPACE: Self = Self(32);
    /// Left arrow.
    pub const LEFT: Self = Self(0x4000_0050);
    /// Right arrow.
    pub const RIGHT: Self = Self(0x4000_004f);
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Alt / Option.
        const ALT   = 0b0100;
        /// Super / Command.
        const META  = 0b1000;
    }
}

/// Pointer payload. Positions are in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Current pointer position.
    pub position: Point,
    /// Motion since the previous pointer event.
    pub delta: Vec2,
    /// Button number; `0` for plain motion.
    pub button: u8,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl PointerEvent {
    /// A primary-button event at `position`.
    pub fn at(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            delta: Vec2::ZERO,
            button: BUTTON_PRIMARY,
            timestamp: 0,
        }
    }

    /// Set the motion delta.
    pub fn with_delta(mut self, delta: impl Into<Vec2>) -> Self {
        self.delta = delta.into();
        self
    }

    /// Set the button.
    pub fn with_button(mut self, button: u8) -> Self {
        self.button = button;
        self
    }
}

/// Keyboard payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: KeyCode,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl KeyEvent {
    /// A key event without modifiers.
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            timestamp: 0,
        }
    }
}

/// Committed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEvent {
    /// The text.
    pub text: String,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

/// The window was resized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    /// New window size.
    pub size: Size,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

/// An input event.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A pointer button was pressed.
    PointerDown(PointerEvent),
    /// A pointer button was released.
    PointerUp(PointerEvent),
    /// The pointer moved.
    PointerMove(PointerEvent),
    /// A key was pressed.
    KeyDown(KeyEvent),
    /// A key was released.
    KeyUp(KeyEvent),
    /// Text was entered.
    TextInput(TextEvent),
    /// The window was resized.
    WindowResize(ResizeEvent),
}

/// The discriminant of an [`Event`], used to key action bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`Event::PointerDown`].
    PointerDown,
    /// See [`Event::PointerUp`].
    PointerUp,
    /// See [`Event::PointerMove`].
    PointerMove,
    /// See [`Event::KeyDown`].
    KeyDown,
    /// See [`Event::KeyUp`].
    KeyUp,
    /// See [`Event::TextInput`].
    TextInput,
    /// See [`Event::WindowResize`].
    WindowResize,
}

impl Event {
    /// Primary-button press at `position`.
    pub fn pointer_down(position: impl Into<Point>) -> Self {
        Self::PointerDown(PointerEvent::at(position))
    }

    /// Primary-button release at `position`.
    pub fn pointer_up(position: impl Into<Point>) -> Self {
        Self::PointerUp(PointerEvent::at(position))
    }

    /// Motion to `position` by `delta`.
    pub fn pointer_move(position: impl Into<Point>, delta: impl Into<Vec2>) -> Self {
        Self::PointerMove(PointerEvent::at(position).with_delta(delta).with_button(0))
    }

    /// Key press without modifiers.
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown(KeyEvent::new(key))
    }

    /// The discriminant.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerUp(_) => EventKind::PointerUp,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::TextInput(_) => EventKind::TextInput,
            Self::WindowResize(_) => EventKind::WindowResize,
        }
    }

    /// The pointer payload, for pointer events.
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::PointerDown(p) | Self::PointerUp(p) | Self::PointerMove(p) => Some(p),
            _ => None,
        }
    }

    /// The key payload, for key events.
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Self::KeyDown(k) | Self::KeyUp(k) => Some(k),
            _ => None,
        }
    }

    /// Window position, for pointer events.
    pub fn position(&self) -> Option<Point> {
        self.pointer().map(|p| p.position)
    }

    /// Host timestamp.
    pub fn timestamp(&self) -> u64 {
        match self {
            Self::PointerDown(p) | Self::PointerUp(p) | Self::PointerMove(p) => p.timestamp,
            Self::KeyDown(k) | Self::KeyUp(k) => k.timestamp,
            Self::TextInput(t) => t.timestamp,
            Self::WindowResize(r) => r.timestamp,
        }
    }

    /// Whether this is routed by hit testing.
    pub fn is_pointer(&self) -> bool {
        self.pointer().is_some()
    }

    /// Whether this is routed to the first responder.
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown(_) | Self::KeyUp(_) | Self::TextInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_class_follows_kind() {
        let down = Event::pointer_down((3.0, 4.0));
        assert_eq!(down.kind(), EventKind::PointerDown);
        assert_eq!(down.position(), Some(Point::new(3.0, 4.0)));
        assert!(down.is_pointer() && !down.is_keyboard());

        let text = Event::TextInput(TextEvent {
            text: "a".into(),
            timestamp: 7,
        });
        assert!(text.is_keyboard());
        assert_eq!(text.position(), None);
        assert_eq!(text.timestamp(), 7);

        let resize = Event::WindowResize(ResizeEvent {
            size: Size::new(1.0, 1.0),
            timestamp: 0,
        });
        assert!(!resize.is_pointer() && !resize.is_keyboard());
    }
}
