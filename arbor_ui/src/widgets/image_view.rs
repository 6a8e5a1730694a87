// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_view::{Painter, TextureId, Tree, ViewFlags, ViewId, ViewProps};
use kurbo::Rect;

use crate::element::{Element, UiCx};
use crate::error::UiError;
use crate::theme::Theme;

/// A host texture stretched over the view's frame.
///
/// The texture is owned by the host; the view only keeps its handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageView {
    texture: TextureId,
}

impl ImageView {
    /// Add an image view showing `texture` as the last child of `parent`.
    pub fn add(
        cx: &mut UiCx<'_>,
        parent: ViewId,
        frame: Rect,
        texture: TextureId,
    ) -> Result<ViewId, UiError> {
        cx.add_element(
            parent,
            ViewProps {
                flags: ViewFlags::VISIBLE,
                ..ViewProps::with_frame(frame)
            },
            Self { texture },
        )
    }

    /// The texture handle.
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Show another texture from the next frame on.
    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
    }
}

impl Element for ImageView {
    fn draw_content(
        &self,
        _tree: &Tree,
        _id: ViewId,
        frame: Rect,
        _theme: &Theme,
        painter: &mut dyn Painter,
    ) {
        painter.draw_textured_quad(self.texture, frame);
    }
}
