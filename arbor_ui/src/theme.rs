// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only configuration: colors, default metrics, tolerances, and text measurement.

use arbor_view::{Color, LayoutPolicy, Padding};
use kurbo::Size;

/// How close two values must be to count as equal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Epsilon {
    /// A fixed tolerance.
    Absolute(f64),
    /// A fraction of the value range.
    Relative(f64),
}

impl Default for Epsilon {
    fn default() -> Self {
        Self::Absolute(f64::EPSILON)
    }
}

impl Epsilon {
    /// The tolerance for a value spanning `range`.
    pub fn tolerance(self, range: f64) -> f64 {
        match self {
            Self::Absolute(eps) => eps,
            Self::Relative(fraction) => fraction * range.abs(),
        }
    }

    /// Whether `a` and `b` are equal within the tolerance for `range`.
    pub fn same(self, a: f64, b: f64, range: f64) -> bool {
        (a - b).abs() <= self.tolerance(range)
    }
}

/// Measures single-line text.
pub trait TextMetrics {
    /// Size of `text` when drawn.
    fn measure(&self, text: &str) -> Size;
}

/// Fixed advance per character and a fixed line height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Horizontal advance of every character.
    pub advance: f64,
    /// Line height.
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 8.0,
            line_height: 16.0,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str) -> Size {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Label text is far shorter than 2^52 characters."
        )]
        let chars = text.chars().count() as f64;
        Size::new(chars * self.advance, self.line_height)
    }
}

/// Colors and default geometry for the built-in widgets.
///
/// Build one with struct update syntax over [`Theme::default`] and hand it to the
/// [`Window`](crate::Window); widgets read it through their build context.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Window background.
    pub background: Color,
    /// Text and glyphs.
    pub foreground: Color,
    /// Borders of boxes and inputs.
    pub border: Color,
    /// Fill of a highlighted control.
    pub highlight: Color,
    /// Fill of a selected toggle.
    pub selected: Color,
    /// Bevel light edge.
    pub bevel_light: Color,
    /// Bevel dark edge.
    pub bevel_dark: Color,
    /// Text of disabled controls.
    pub disabled: Color,
    /// Height reserved for a line of text.
    pub text_height: f64,
    /// Slider width when none is given.
    pub slider_width: f64,
    /// Slider handle width.
    pub handle_width: f64,
    /// Slider handle height, also the default slider height.
    pub handle_height: f64,
    /// Gap between a slider bar and its value label.
    pub label_padding: f64,
    /// Padding inside a box.
    pub box_padding: Padding,
    /// Horizontal offset of a box caption.
    pub box_label_x: f64,
    /// Side of a checkbox.
    pub checkbox_size: f64,
    /// Padding around a button's title.
    pub button_padding: Padding,
    /// Geometry tolerances for layout.
    pub layout: LayoutPolicy,
    /// Tolerance for value-bearing controls.
    pub value_epsilon: Epsilon,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb8(40, 40, 40),
            foreground: Color::WHITE,
            border: Color::GRAY,
            highlight: Color::rgba8(255, 255, 255, 48),
            selected: Color::rgb8(80, 120, 200),
            bevel_light: Color::rgba8(255, 255, 255, 96),
            bevel_dark: Color::rgba8(0, 0, 0, 96),
            disabled: Color::DIM_GRAY,
            text_height: 16.0,
            slider_width: 150.0,
            handle_width: 12.0,
            handle_height: 18.0,
            label_padding: 6.0,
            box_padding: Padding::uniform(10.0),
            box_label_x: 10.0,
            checkbox_size: 18.0,
            button_padding: Padding {
                top: 4.0,
                right: 8.0,
                bottom: 4.0,
                left: 8.0,
            },
            layout: LayoutPolicy::default(),
            value_epsilon: Epsilon::default(),
        }
    }
}
