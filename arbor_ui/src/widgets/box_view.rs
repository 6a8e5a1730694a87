// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_view::{Painter, Tree, ViewId, ViewProps};
use kurbo::{Point, Rect};

use crate::element::{Element, UiCx};
use crate::error::UiError;
use crate::theme::Theme;

/// A bordered, padded container with a caption drawn across its top edge.
#[derive(Clone, Debug)]
pub struct BoxView {
    caption: String,
}

impl BoxView {
    /// Add a box as the last child of `parent`.
    pub fn add(
        cx: &mut UiCx<'_>,
        parent: ViewId,
        frame: Rect,
        caption: impl Into<String>,
    ) -> Result<ViewId, UiError> {
        let theme = cx.theme;
        cx.add_element(
            parent,
            ViewProps {
                padding: theme.box_padding,
                border_color: theme.border,
                border_width: 1.0,
                ..ViewProps::with_frame(frame)
            },
            Self {
                caption: caption.into(),
            },
        )
    }

    /// The caption.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Replace the caption. Does not affect layout.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }
}

impl Element for BoxView {
    fn draw_content(
        &self,
        _tree: &Tree,
        _id: ViewId,
        frame: Rect,
        theme: &Theme,
        painter: &mut dyn Painter,
    ) {
        if self.caption.is_empty() {
            return;
        }
        let origin = Point::new(
            frame.x0 + theme.box_label_x,
            frame.y0 - theme.text_height * 0.5,
        );
        painter.draw_text(&self.caption, origin, theme.foreground);
    }
}
