// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cmp::Ordering;
use core::fmt;

use arbor_view::{
    Alignment, Autoresizing, Bevel, Padding, Painter, Tree, ViewFlags, ViewId, ViewProps,
};
use kurbo::{Point, Rect, Size};

use crate::control::{Control, ControlStyle};
use crate::element::{Element, UiCx};
use crate::error::UiError;
use crate::event::{Event, KeyCode};
use crate::theme::{Epsilon, Theme};
use crate::widgets::Label;

/// Called with the slider and its new value after every real change.
pub type ValueChanged = Box<dyn FnMut(ViewId, f64)>;

/// A horizontal slider with a draggable handle and a value label on its right.
///
/// The bar fills the slider minus the label. The handle is centered on the value's
/// fraction of the bar. Dragging converts horizontal pointer motion to value through the bar
/// width; the left and right arrow keys step the value while the slider is first responder.
pub struct Slider {
    control: Control,
    id: ViewId,
    bar: ViewId,
    handle: ViewId,
    label: ViewId,
    min: f64,
    max: f64,
    step: f64,
    value: f64,
    decimals: usize,
    epsilon: Epsilon,
    on_value_changed: Option<ValueChanged>,
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("control", &self.control)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl Slider {
    /// Add a slider over `[0, 1]` as the last child of `parent`.
    ///
    /// With the default style a zero width or height is replaced by the theme's slider
    /// width or handle height.
    pub fn add(
        cx: &mut UiCx<'_>,
        parent: ViewId,
        frame: Rect,
        style: ControlStyle,
    ) -> Result<ViewId, UiError> {
        let theme = cx.theme;
        let mut frame = frame;
        if style == ControlStyle::Default {
            if frame.width() == 0.0 {
                frame = frame.with_size((theme.slider_width, frame.height()));
            }
            if frame.height() == 0.0 {
                frame = frame.with_size((frame.width(), theme.handle_height));
            }
        }
        let id = cx.add_view(parent, ViewProps::with_frame(frame))?;

        // The label is laid out before the bar so the bar's reservation sees its fitted width.
        let label = Label::add(cx, id, "")?;
        cx.tree.set_alignment(label, Alignment::MiddleRight);
        cx.tree.set_padding(
            label,
            Padding {
                left: theme.label_padding,
                ..Default::default()
            },
        );

        let bar = cx.add_view(
            id,
            ViewProps {
                alignment: Alignment::MiddleLeft,
                autoresizing: Autoresizing::FILL,
                flags: ViewFlags::VISIBLE,
                ..Default::default()
            },
        )?;
        let handle_props = match style {
            ControlStyle::Default => ViewProps {
                bevel: Bevel::Outset,
                background: theme.border,
                flags: ViewFlags::VISIBLE,
                ..ViewProps::with_frame(Rect::new(0.0, 0.0, theme.handle_width, theme.handle_height))
            },
            ControlStyle::Custom => ViewProps {
                flags: ViewFlags::VISIBLE,
                ..Default::default()
            },
        };
        let handle = cx.add_view(bar, handle_props)?;

        let slider = Self {
            control: Control::new(style),
            id,
            bar,
            handle,
            label,
            min: 0.0,
            max: 1.0,
            step: 0.1,
            value: 0.0,
            decimals: 1,
            epsilon: theme.value_epsilon,
            on_value_changed: None,
        };
        slider.sync_label(cx);
        cx.attach_element(id, slider)?;
        Ok(id)
    }

    /// The current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Keyboard increment.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The bar, the handle, and the value label.
    pub fn parts(&self) -> (ViewId, ViewId, ViewId) {
        (self.bar, self.handle, self.label)
    }

    /// Set the keyboard increment.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Set the callback fired after each real value change.
    pub fn set_on_value_changed(&mut self, callback: impl FnMut(ViewId, f64) + 'static) {
        self.on_value_changed = Some(Box::new(callback));
    }

    /// Set the number of decimals shown by the label.
    pub fn set_decimals(&mut self, cx: &mut UiCx<'_>, decimals: usize) {
        self.decimals = decimals;
        self.sync_label(cx);
    }

    /// Set the bounds and re-clamp the value.
    ///
    /// An empty or inverted range is kept but logged; the value and handle stay where they
    /// were until the range is valid again.
    pub fn set_range(&mut self, cx: &mut UiCx<'_>, min: f64, max: f64) {
        self.min = min;
        self.max = max;
        if min.partial_cmp(&max) != Some(Ordering::Less) {
            tracing::warn!(slider = ?self.id, min, max, "slider range is empty");
            return;
        }
        if !self.set_value(cx, self.value) {
            cx.tree.mark_needs_layout(self.id);
        }
    }

    /// Clamp `value` into the range and store it.
    ///
    /// Returns whether the value changed by more than the epsilon. Only a real change marks
    /// the slider for layout, updates the label, and notifies the callback.
    pub fn set_value(&mut self, cx: &mut UiCx<'_>, value: f64) -> bool {
        if !value.is_finite() {
            tracing::warn!(slider = ?self.id, value, "ignoring non-finite slider value");
            return false;
        }
        if self.max < self.min {
            tracing::warn!(slider = ?self.id, min = self.min, max = self.max, "slider range is inverted");
            return false;
        }
        let value = value.max(self.min).min(self.max);
        if self.epsilon.same(self.value, value, self.max - self.min) {
            return false;
        }
        self.value = value;
        cx.tree.mark_needs_layout(self.id);
        self.sync_label(cx);
        if let Some(callback) = &mut self.on_value_changed {
            callback(self.id, value);
        }
        true
    }

    fn sync_label(&self, cx: &mut UiCx<'_>) {
        let text = format!("{:.*}", self.decimals, self.value);
        cx.with_element::<Label, _>(self.label, |label, tree| label.set_text(tree, &text));
    }
}

impl Element for Slider {
    fn control(&self) -> Option<&Control> {
        Some(&self.control)
    }

    fn control_mut(&mut self) -> Option<&mut Control> {
        Some(&mut self.control)
    }

    fn handle_event(&mut self, cx: &mut UiCx<'_>, _id: ViewId, event: &Event) -> bool {
        match event {
            Event::PointerMove(pointer) if self.control.is_highlighted() => {
                let width = cx.tree.frame(self.bar).map_or(0.0, |bar| bar.width());
                if pointer.delta.x == 0.0 || width <= 0.0 {
                    return false;
                }
                let scale = (self.max - self.min) / width;
                self.set_value(cx, self.value + scale * pointer.delta.x);
                true
            }
            Event::KeyDown(key) if key.key == KeyCode::LEFT || key.key == KeyCode::RIGHT => {
                let step = if key.key == KeyCode::LEFT {
                    -self.step
                } else {
                    self.step
                };
                self.set_value(cx, self.value + step);
                true
            }
            _ => false,
        }
    }

    fn hit_region(&self, tree: &Tree, _id: ViewId) -> Option<Rect> {
        tree.render_frame(self.handle)
    }

    fn fill_reservation(&self, tree: &Tree, _parent: ViewId, child: ViewId) -> Size {
        if child != self.bar {
            return Size::ZERO;
        }
        match tree.props(self.label) {
            Some(label) if !label.is_hidden() => Size::new(label.frame.width(), 0.0),
            _ => Size::ZERO,
        }
    }

    fn layout_subviews(&mut self, tree: &mut Tree, id: ViewId) {
        if self.min.partial_cmp(&self.max) != Some(Ordering::Less) {
            tracing::warn!(slider = ?id, min = self.min, max = self.max, "slider range is empty; handle not moved");
            return;
        }
        let (Some(bar), Some(handle)) = (tree.frame(self.bar), tree.frame(self.handle)) else {
            return;
        };
        let fraction = ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        let x = bar.width() * fraction - handle.width() * 0.5;
        let y = (bar.height() - handle.height()) * 0.5;
        tree.place(self.handle, handle.with_origin((x, y)));
    }

    fn draw_content(
        &self,
        tree: &Tree,
        _id: ViewId,
        _frame: Rect,
        theme: &Theme,
        painter: &mut dyn Painter,
    ) {
        let Some(bar) = tree.render_frame(self.bar) else {
            return;
        };
        let y = bar.y0 + bar.height() * 0.5;
        let color = if self.control.is_enabled() {
            theme.foreground
        } else {
            theme.disabled
        };
        painter.draw_line(Point::new(bar.x0, y), Point::new(bar.x1, y), color, 1.0);
    }
}
