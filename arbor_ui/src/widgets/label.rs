// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_view::{Autoresizing, Color, Painter, Tree, ViewFlags, ViewId, ViewProps};
use kurbo::{Rect, Size, Vec2};

use crate::element::{Element, UiCx};
use crate::error::UiError;
use crate::theme::{TextMetrics, Theme};

/// A single line of text, sized to fit it.
///
/// Labels are not hit targets: presses fall through to the view behind them.
#[derive(Clone, Debug)]
pub struct Label {
    id: ViewId,
    text: String,
    color: Color,
}

impl Label {
    /// Add a label as the last child of `parent`.
    pub fn add(cx: &mut UiCx<'_>, parent: ViewId, text: impl Into<String>) -> Result<ViewId, UiError> {
        let id = cx.add_view(
            parent,
            ViewProps {
                autoresizing: Autoresizing::CONTAIN,
                flags: ViewFlags::VISIBLE,
                ..Default::default()
            },
        )?;
        let label = Self {
            id,
            text: text.into(),
            color: cx.theme.foreground,
        };
        cx.attach_element(id, label)?;
        Ok(id)
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Returns whether it changed; a change re-fits the label.
    pub fn set_text(&mut self, tree: &mut Tree, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        tree.mark_needs_layout(self.id);
        true
    }

    /// Text color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the text color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl Element for Label {
    fn size_that_fits(&self, tree: &Tree, id: ViewId, metrics: &dyn TextMetrics) -> Option<Size> {
        let padding = tree.props(id)?.padding;
        let text = metrics.measure(&self.text);
        Some(Size::new(
            text.width + padding.horizontal(),
            text.height + padding.vertical(),
        ))
    }

    fn draw_content(
        &self,
        tree: &Tree,
        id: ViewId,
        frame: Rect,
        _theme: &Theme,
        painter: &mut dyn Painter,
    ) {
        if self.text.is_empty() {
            return;
        }
        let padding = tree.props(id).map(|p| p.padding).unwrap_or_default();
        let origin = frame.origin() + Vec2::new(padding.left, padding.top);
        painter.draw_text(&self.text, origin, self.color);
    }
}
