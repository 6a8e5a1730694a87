// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference widgets.
//!
//! Each widget is a plain view (or a few) plus an [`Element`](crate::Element). Build them
//! through a [`UiCx`](crate::UiCx), usually [`Window::cx`](crate::Window::cx).

mod box_view;
mod button;
mod checkbox;
mod image_view;
mod label;
mod slider;

pub use box_view::BoxView;
pub use button::Button;
pub use checkbox::Checkbox;
pub use image_view::ImageView;
pub use label::Label;
pub use slider::{Slider, ValueChanged};
