// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_view::{Alignment, Autoresizing, Bevel, Painter, Tree, ViewId, ViewProps};
use kurbo::Rect;

use crate::control::{Control, ControlStyle};
use crate::element::{Element, UiCx};
use crate::error::UiError;
use crate::theme::Theme;
use crate::widgets::Label;

/// A push button with a centered title, sized around it.
#[derive(Debug)]
pub struct Button {
    control: Control,
    title: ViewId,
}

impl Button {
    /// Add a button as the last child of `parent`.
    pub fn add(
        cx: &mut UiCx<'_>,
        parent: ViewId,
        title: impl Into<String>,
        style: ControlStyle,
    ) -> Result<ViewId, UiError> {
        let theme = cx.theme;
        let props = match style {
            ControlStyle::Default => ViewProps {
                autoresizing: Autoresizing::CONTAIN,
                padding: theme.button_padding,
                bevel: Bevel::Outset,
                border_color: theme.border,
                border_width: 1.0,
                ..Default::default()
            },
            ControlStyle::Custom => ViewProps::default(),
        };
        let id = cx.add_view(parent, props)?;
        let title = Label::add(cx, id, title)?;
        cx.tree.set_alignment(title, Alignment::MiddleCenter);
        cx.attach_element(
            id,
            Self {
                control: Control::new(style),
                title,
            },
        )?;
        Ok(id)
    }

    /// The title label.
    pub fn title(&self) -> ViewId {
        self.title
    }
}

impl Element for Button {
    fn control(&self) -> Option<&Control> {
        Some(&self.control)
    }

    fn control_mut(&mut self) -> Option<&mut Control> {
        Some(&mut self.control)
    }

    fn draw_content(
        &self,
        _tree: &Tree,
        _id: ViewId,
        frame: Rect,
        theme: &Theme,
        painter: &mut dyn Painter,
    ) {
        if self.control.is_highlighted() {
            painter.fill_rect(frame, theme.highlight);
        }
    }
}
