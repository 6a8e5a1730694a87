// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render traversal and the abstract drawing interface.
//!
//! The tree never talks to a graphics API. It resolves absolute frames and issues primitive
//! calls on a [`Painter`] that the host implements.

use kurbo::{Point, Rect, Vec2};

use crate::layout::NoHooks;
use crate::tree::Tree;
use crate::types::{Bevel, Color, ViewId};

/// Opaque handle to a texture owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Drawing primitives in window coordinates.
pub trait Painter {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
    /// Draw a line segment.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f64);
    /// Draw a texture stretched over `rect`.
    fn draw_textured_quad(&mut self, texture: TextureId, rect: Rect);
    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color);
}

/// Draws whatever a view shows beyond its background, border and bevel.
pub trait ContentRenderer {
    /// Draw the content of `id`, whose absolute frame is `frame`.
    fn draw_content(&mut self, tree: &Tree, id: ViewId, frame: Rect, painter: &mut dyn Painter) {
        let _ = (tree, id, frame, painter);
    }

    /// Light and dark edge colors used for bevels.
    fn bevel_colors(&self) -> (Color, Color) {
        (Color::rgba8(255, 255, 255, 96), Color::rgba8(0, 0, 0, 96))
    }
}

impl ContentRenderer for NoHooks {}

/// Counters from one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Views that were painted.
    pub drawn: usize,
    /// Hidden views whose subtrees were skipped.
    pub hidden_skipped: usize,
}

impl Tree {
    /// Recompute absolute frames for every view without painting.
    pub fn update_render_frames(&mut self) {
        for root in self.roots() {
            self.update_render_recursive(root, Vec2::ZERO);
        }
    }

    /// Paint the tree below `root`, depth first, parents before children.
    ///
    /// Per view: background, border, bevel, content, then children in order. Hidden views and
    /// their subtrees are skipped.
    pub fn render<C: ContentRenderer + ?Sized>(
        &mut self,
        root: ViewId,
        content: &mut C,
        painter: &mut dyn Painter,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        if !self.is_alive(root) {
            return stats;
        }
        let offset = self
            .parent_of(root)
            .and_then(|p| self.render_frame(p))
            .map(|r| r.origin().to_vec2())
            .unwrap_or(Vec2::ZERO);
        self.update_render_recursive(root, offset);
        self.paint_recursive(root, content, painter, &mut stats);
        stats
    }

    fn update_render_recursive(&mut self, id: ViewId, offset: Vec2) {
        let node = self.node_mut(id);
        let frame = node.props.frame + offset;
        node.render_frame = frame;
        let offset = frame.origin().to_vec2();
        for child in self.child_snapshot(id) {
            self.update_render_recursive(child, offset);
        }
    }

    fn paint_recursive<C: ContentRenderer + ?Sized>(
        &self,
        id: ViewId,
        content: &mut C,
        painter: &mut dyn Painter,
        stats: &mut RenderStats,
    ) {
        let node = self.node(id);
        let props = &node.props;
        if props.is_hidden() {
            stats.hidden_skipped += 1;
            return;
        }
        let frame = node.render_frame;
        if !props.background.is_clear() {
            painter.fill_rect(frame, props.background);
        }
        if props.border_width > 0.0 && !props.border_color.is_clear() {
            painter.stroke_rect(frame, props.border_color, props.border_width);
        }
        if props.bevel != Bevel::None {
            let (light, dark) = content.bevel_colors();
            let (top_left, bottom_right) = match props.bevel {
                Bevel::Inset => (dark, light),
                _ => (light, dark),
            };
            draw_bevel(painter, frame, top_left, bottom_right);
        }
        content.draw_content(self, id, frame, painter);
        stats.drawn += 1;

        for child in self.child_snapshot(id) {
            self.paint_recursive(child, content, painter, stats);
        }
    }
}

fn draw_bevel(painter: &mut dyn Painter, frame: Rect, top_left: Color, bottom_right: Color) {
    let tl = Point::new(frame.x0, frame.y0);
    let tr = Point::new(frame.x1, frame.y0);
    let bl = Point::new(frame.x0, frame.y1);
    let br = Point::new(frame.x1, frame.y1);
    painter.draw_line(tl, tr, top_left, 1.0);
    painter.draw_line(tl, bl, top_left, 1.0);
    painter.draw_line(bl, br, bottom_right, 1.0);
    painter.draw_line(tr, br, bottom_right, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViewProps;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum Op {
        Fill(Rect, Color),
        Stroke(Rect),
        Line,
        Text(String, Point),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Painter for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.0.push(Op::Fill(rect, color));
        }
        fn stroke_rect(&mut self, rect: Rect, _color: Color, _width: f64) {
            self.0.push(Op::Stroke(rect));
        }
        fn draw_line(&mut self, _from: Point, _to: Point, _color: Color, _width: f64) {
            self.0.push(Op::Line);
        }
        fn draw_textured_quad(&mut self, _texture: TextureId, _rect: Rect) {}
        fn draw_text(&mut self, text: &str, origin: Point, _color: Color) {
            self.0.push(Op::Text(text.to_string(), origin));
        }
    }

    struct Caption(ViewId);

    impl ContentRenderer for Caption {
        fn draw_content(&mut self, _tree: &Tree, id: ViewId, frame: Rect, painter: &mut dyn Painter) {
            if id == self.0 {
                painter.draw_text("hi", frame.origin(), Color::BLACK);
            }
        }
    }

    fn filled(x: f64, y: f64, w: f64, h: f64, color: Color) -> ViewProps {
        ViewProps {
            background: color,
            ..ViewProps::with_frame(Rect::from_origin_size((x, y), (w, h)))
        }
    }

    #[test]
    fn paints_parents_before_children_in_window_space() {
        let mut tree = Tree::new();
        let root = tree.insert(filled(0.0, 0.0, 100.0, 100.0, Color::WHITE)).unwrap();
        let panel = tree
            .insert_child(
                root,
                ViewProps {
                    border_color: Color::GRAY,
                    border_width: 1.0,
                    ..filled(10.0, 10.0, 50.0, 50.0, Color::BLUE)
                },
            )
            .unwrap();
        let leaf = tree.insert_child(panel, filled(5.0, 5.0, 10.0, 10.0, Color::RED)).unwrap();

        let mut painter = Recorder::default();
        let stats = tree.render(root, &mut Caption(leaf), &mut painter);

        assert_eq!(stats.drawn, 3);
        assert_eq!(
            painter.0,
            vec![
                Op::Fill(Rect::new(0.0, 0.0, 100.0, 100.0), Color::WHITE),
                Op::Fill(Rect::new(10.0, 10.0, 60.0, 60.0), Color::BLUE),
                Op::Stroke(Rect::new(10.0, 10.0, 60.0, 60.0)),
                Op::Fill(Rect::new(15.0, 15.0, 25.0, 25.0), Color::RED),
                Op::Text("hi".to_string(), Point::new(15.0, 15.0)),
            ]
        );
    }

    #[test]
    fn hidden_subtree_is_skipped() {
        let mut tree = Tree::new();
        let root = tree.insert(filled(0.0, 0.0, 100.0, 100.0, Color::CLEAR)).unwrap();
        let panel = tree.insert_child(root, filled(0.0, 0.0, 50.0, 50.0, Color::BLUE)).unwrap();
        tree.insert_child(panel, filled(0.0, 0.0, 10.0, 10.0, Color::RED)).unwrap();
        tree.set_hidden(panel, true);

        let mut painter = Recorder::default();
        let stats = tree.render(root, &mut NoHooks, &mut painter);
        assert_eq!(stats, RenderStats { drawn: 1, hidden_skipped: 1 });
        assert!(painter.0.is_empty(), "clear root paints nothing");
    }

    #[test]
    fn bevel_draws_four_edges() {
        let mut tree = Tree::new();
        let root = tree
            .insert(ViewProps {
                bevel: Bevel::Inset,
                ..ViewProps::with_frame(Rect::new(0.0, 0.0, 10.0, 10.0))
            })
            .unwrap();
        let mut painter = Recorder::default();
        tree.render(root, &mut NoHooks, &mut painter);
        assert_eq!(painter.0, vec![Op::Line, Op::Line, Op::Line, Op::Line]);
    }
}
