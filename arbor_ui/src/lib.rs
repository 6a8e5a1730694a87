// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor UI: controls, actions, and the per-frame window loop.
//!
//! ## Overview
//!
//! This crate joins the [`arbor_view`] tree and the [`arbor_responder`] router into a
//! [`Window`]:
//!
//! - [`Element`]s attach behavior to views: event hooks, layout hooks, and content drawing.
//! - [`Control`] is the highlight/select/disable state machine shared by interactive
//!   elements, with an [`ActionRegistry`] of callbacks bound per event kind.
//! - [`Theme`] carries colors, default widget metrics, and the value tolerance.
//! - [`widgets`] has reference button, checkbox, slider, label and box widgets.
//!
//! ## Example
//!
//! ```
//! use arbor_ui::kurbo::{Point, Size};
//! use arbor_ui::widgets::Checkbox;
//! use arbor_ui::{ControlState, ControlStyle, Event, MonospaceMetrics, Theme, Window};
//!
//! let mut window = Window::new(Theme::default(), Size::new(320.0, 240.0), MonospaceMetrics::default())
//!     .unwrap();
//! let root = window.root();
//! let check = Checkbox::add(&mut window.cx(), root, ControlStyle::Default).unwrap();
//! window.cx().tree.set_origin(check, Point::new(20.0, 20.0));
//!
//! window.handle_event(&Event::pointer_down((25.0, 25.0)));
//! window.handle_event(&Event::pointer_up((25.0, 25.0)));
//! assert_eq!(window.state(check), Some(ControlState::SELECTED));
//! ```

mod action;
mod control;
mod element;
mod error;
mod event;
mod theme;
mod window;

pub mod widgets;

pub use action::{
    ActionCx, ActionError, ActionFilter, ActionFn, ActionId, ActionRegistry, ActionReport,
    BindingInfo,
};
pub use control::{Control, ControlState, ControlStyle};
pub use element::{Element, UiCx};
pub use error::UiError;
pub use event::{
    BUTTON_PRIMARY, Event, EventKind, KeyCode, KeyEvent, Modifiers, PointerEvent, ResizeEvent,
    TextEvent,
};
pub use theme::{Epsilon, MonospaceMetrics, TextMetrics, Theme};
pub use window::{EventReport, Window};

pub use arbor_view;
pub use kurbo;

/// Route `tracing` output through the test harness. `RUST_LOG` selects what is shown.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
