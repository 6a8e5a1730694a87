// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control state machine.

use crate::action::ActionRegistry;
use crate::event::Event;

bitflags::bitflags! {
    /// Interaction state of a control. Empty is the normal state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ControlState: u8 {
        /// Pressed and tracking the pointer.
        const HIGHLIGHTED = 0b0001;
        /// Toggled on.
        const SELECTED    = 0b0010;
        /// Ignores input.
        const DISABLED    = 0b0100;
    }
}

/// Visual style chosen at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControlStyle {
    /// Apply the theme's default geometry and decoration.
    #[default]
    Default,
    /// Leave geometry and decoration to the caller.
    Custom,
}

/// Interaction state shared by every control, plus its actions.
#[derive(Debug, Default)]
pub struct Control {
    state: ControlState,
    style: ControlStyle,
    /// Callbacks fired after the control consumes an event.
    pub actions: ActionRegistry,
}

impl Control {
    /// An enabled control in the normal state.
    pub fn new(style: ControlStyle) -> Self {
        Self {
            state: ControlState::empty(),
            style,
            actions: ActionRegistry::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Style fixed at construction.
    pub fn style(&self) -> ControlStyle {
        self.style
    }

    /// Whether the control accepts input.
    pub fn is_enabled(&self) -> bool {
        !self.state.contains(ControlState::DISABLED)
    }

    /// Enable or disable. Disabling drops any highlight. Returns whether the state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let before = self.state;
        if enabled {
            self.state.remove(ControlState::DISABLED);
        } else {
            self.state.insert(ControlState::DISABLED);
            self.state.remove(ControlState::HIGHLIGHTED);
        }
        before != self.state
    }

    /// Whether the control is highlighted.
    pub fn is_highlighted(&self) -> bool {
        self.state.contains(ControlState::HIGHLIGHTED)
    }

    /// Whether the control is selected.
    pub fn is_selected(&self) -> bool {
        self.state.contains(ControlState::SELECTED)
    }

    /// Select or deselect. Ignored while disabled. Returns whether the state changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if !self.is_enabled() || self.is_selected() == selected {
            return false;
        }
        self.state.set(ControlState::SELECTED, selected);
        true
    }

    /// Apply the base transition for `event`. Returns whether the event was consumed.
    ///
    /// `inside` is whether the pointer lies in the control's active region.
    /// A press inside highlights; any release clears the highlight and is consumed if there
    /// was one. Disabled controls never transition.
    pub fn transition(&mut self, event: &Event, inside: bool) -> bool {
        if !self.is_enabled() {
            return false;
        }
        match event {
            Event::PointerDown(_) if inside => {
                self.state.insert(ControlState::HIGHLIGHTED);
                true
            }
            Event::PointerUp(_) if self.is_highlighted() => {
                self.state.remove(ControlState::HIGHLIGHTED);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_cycle() {
        let mut control = Control::new(ControlStyle::Default);
        let down = Event::pointer_down((1.0, 1.0));
        let up = Event::pointer_up((1.0, 1.0));

        assert!(!control.transition(&down, false), "press outside is ignored");
        assert!(control.transition(&down, true));
        assert!(control.is_highlighted());
        assert!(control.transition(&up, false), "release is consumed wherever it lands");
        assert_eq!(control.state(), ControlState::empty());
        assert!(!control.transition(&up, true), "release without a press is not consumed");
    }

    #[test]
    fn disabled_control_never_highlights() {
        let mut control = Control::new(ControlStyle::Default);
        let down = Event::pointer_down((1.0, 1.0));
        assert!(control.transition(&down, true));
        assert!(control.set_enabled(false));
        assert!(!control.is_highlighted(), "disabling drops the highlight");
        assert!(!control.transition(&down, true));
        assert!(!control.is_highlighted());
        assert!(!control.set_selected(true));
        assert!(!control.is_selected());

        assert!(control.set_enabled(true));
        assert!(control.set_selected(true));
        assert!(!control.set_selected(true));
    }
}
