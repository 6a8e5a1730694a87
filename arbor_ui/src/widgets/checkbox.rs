// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_view::{Bevel, Painter, Tree, ViewId, ViewProps};
use kurbo::Rect;

use crate::control::{Control, ControlStyle};
use crate::element::{Element, UiCx};
use crate::error::UiError;
use crate::event::Event;
use crate::theme::Theme;

/// A toggle. A press followed by a release inside the box flips its selection.
#[derive(Debug)]
pub struct Checkbox {
    control: Control,
}

impl Checkbox {
    /// Add a checkbox as the last child of `parent`.
    pub fn add(cx: &mut UiCx<'_>, parent: ViewId, style: ControlStyle) -> Result<ViewId, UiError> {
        let theme = cx.theme;
        let props = match style {
            ControlStyle::Default => ViewProps {
                bevel: Bevel::Inset,
                border_color: theme.border,
                border_width: 1.0,
                ..ViewProps::with_frame(Rect::new(0.0, 0.0, theme.checkbox_size, theme.checkbox_size))
            },
            ControlStyle::Custom => ViewProps::default(),
        };
        let id = cx.add_view(parent, props)?;
        cx.attach_element(
            id,
            Self {
                control: Control::new(style),
            },
        )?;
        Ok(id)
    }
}

impl Element for Checkbox {
    fn control(&self) -> Option<&Control> {
        Some(&self.control)
    }

    fn control_mut(&mut self) -> Option<&mut Control> {
        Some(&mut self.control)
    }

    fn handle_event(&mut self, cx: &mut UiCx<'_>, id: ViewId, event: &Event) -> bool {
        let Event::PointerUp(pointer) = event else {
            return false;
        };
        // Only a release that ends this control's own press toggles.
        if !self.control.is_highlighted() {
            return false;
        }
        let inside = cx
            .tree
            .render_frame(id)
            .is_some_and(|frame| frame.contains(pointer.position));
        if inside {
            let selected = self.control.is_selected();
            self.control.set_selected(!selected);
        }
        false
    }

    fn draw_content(
        &self,
        _tree: &Tree,
        _id: ViewId,
        frame: Rect,
        theme: &Theme,
        painter: &mut dyn Painter,
    ) {
        if self.control.is_selected() {
            painter.fill_rect(frame.inset(-4.0), theme.selected);
        }
    }
}
