// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame resolution: autoresizing, alignment, padding, and size-to-fit.
//!
//! Layout runs top-down. A parent positions and sizes its children inside its content
//! rectangle, then each child lays out its own subtree. Content-sized children are fitted
//! before their parent aligns them, so alignment always sees the final size.
//!
//! Widget-specific behavior plugs in through [`LayoutHooks`], which run after the base rules.

use kurbo::{Point, Size};

use crate::tree::{Tree, is_valid_frame};
use crate::types::{Autoresizing, ViewId};

/// Tolerances used when comparing geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPolicy {
    /// Frame changes no larger than this on every edge are treated as no change.
    pub epsilon: f64,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self { epsilon: 1e-9 }
    }
}

/// Per-view extensions to the base layout rules.
///
/// All methods have no-op defaults.
pub trait LayoutHooks {
    /// Intrinsic size of `id`, such as measured text plus padding.
    ///
    /// For content-sized views this is a lower bound on the fitted size; for other views it is
    /// the size [`Tree::size_to_fit`] applies.
    fn size_that_fits(&mut self, tree: &Tree, id: ViewId) -> Option<Size> {
        let _ = (tree, id);
        None
    }

    /// Space inside `parent` that a filling `child` must leave for its siblings.
    fn fill_reservation(&mut self, tree: &Tree, parent: ViewId, child: ViewId) -> Size {
        let _ = (tree, parent, child);
        Size::ZERO
    }

    /// Runs after the base rules have placed the children of `id`.
    ///
    /// Use [`Tree::place`] to adjust children from here.
    fn layout_subviews(&mut self, tree: &mut Tree, id: ViewId) {
        let _ = (tree, id);
    }
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl LayoutHooks for NoHooks {}

impl Tree {
    /// Lay out every dirty view in every tree, then refresh render frames.
    pub fn layout<H: LayoutHooks + ?Sized>(&mut self, hooks: &mut H) {
        for root in self.roots() {
            self.layout_if_needed(root, hooks);
        }
        self.update_render_frames();
    }

    /// Lay out `id` if it is dirty, then visit its children.
    ///
    /// Clean views are not recomputed, but their subtrees are still visited.
    pub fn layout_if_needed<H: LayoutHooks + ?Sized>(&mut self, id: ViewId, hooks: &mut H) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        if node.needs_layout {
            if node.props.autoresizing.is_content_sized() {
                self.fit(id, hooks);
            } else {
                self.layout_subviews(id, hooks);
                self.clear_needs_layout(id);
            }
        }
        for child in self.child_snapshot(id) {
            self.layout_if_needed(child, hooks);
        }
    }

    /// Apply the base layout rules to the children of `id`, then run the hooks.
    ///
    /// For each child, in order:
    /// 1. a dirty content-sized child is fitted to its own children,
    /// 2. a fill axis takes the parent's content extent minus the reservation,
    /// 3. an aligned axis is anchored inside the parent's content rectangle.
    ///
    /// Fill is ignored on an axis where the parent itself is content-sized, since the two would
    /// depend on each other. A fill that would produce an empty or negative extent is logged
    /// and the child keeps its previous size.
    pub fn layout_subviews<H: LayoutHooks + ?Sized>(&mut self, id: ViewId, hooks: &mut H) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        let parent_mask = node.props.autoresizing;
        let content = node.props.padding.content_rect(node.props.frame.size());

        for child in self.child_snapshot(id) {
            let Some(c) = self.node_opt(child) else {
                continue;
            };
            if c.props.autoresizing.is_content_sized() && c.needs_layout {
                self.fit(child, hooks);
            }
            let reserved = hooks.fill_reservation(self, id, child);
            let Some(c) = self.node_opt(child) else {
                continue;
            };
            let mask = c.props.autoresizing;
            let alignment = c.props.alignment;
            let mut frame = c.props.frame;

            if mask.contains(Autoresizing::FILL_WIDTH) && !parent_mask.contains_width() {
                let width = content.width() - reserved.width;
                if width.is_finite() && width > 0.0 {
                    frame = frame.with_size((width, frame.height()));
                } else {
                    tracing::warn!(
                        parent = ?id,
                        ?child,
                        available = content.width(),
                        reserved = reserved.width,
                        "fill width is degenerate; keeping the last frame"
                    );
                }
            }
            if mask.contains(Autoresizing::FILL_HEIGHT) && !parent_mask.contains_height() {
                let height = content.height() - reserved.height;
                if height.is_finite() && height > 0.0 {
                    frame = frame.with_size((frame.width(), height));
                } else {
                    tracing::warn!(
                        parent = ?id,
                        ?child,
                        available = content.height(),
                        reserved = reserved.height,
                        "fill height is degenerate; keeping the last frame"
                    );
                }
            }
            if let Some(anchor) = alignment.horizontal() {
                let x = content.x0 + anchor.offset(content.width(), frame.width());
                frame = frame.with_origin((x, frame.y0));
            }
            if let Some(anchor) = alignment.vertical() {
                let y = content.y0 + anchor.offset(content.height(), frame.height());
                frame = frame.with_origin((frame.x0, y));
            }
            self.place(child, frame);
        }

        hooks.layout_subviews(self, id);
    }

    /// The size `id` would like to have.
    ///
    /// Content-sized axes cover every visible child plus padding; children are laid out first.
    /// An aligned child contributes its extent rather than its position. Other axes keep the
    /// current size unless a hook reports an intrinsic size.
    pub fn size_that_fits<H: LayoutHooks + ?Sized>(&mut self, id: ViewId, hooks: &mut H) -> Size {
        let Some(node) = self.node_opt(id) else {
            return Size::ZERO;
        };
        let mask = node.props.autoresizing;
        let current = node.props.frame.size();
        let intrinsic = hooks.size_that_fits(self, id);
        if !mask.is_content_sized() {
            return intrinsic.unwrap_or(current);
        }

        self.layout_subviews(id, hooks);
        for child in self.child_snapshot(id) {
            self.layout_if_needed(child, hooks);
        }
        // A hook may have destroyed the view.
        let Some(mut extent) = self.children_extent(id) else {
            return Size::ZERO;
        };
        if let Some(intrinsic) = intrinsic {
            extent.width = extent.width.max(intrinsic.width);
            extent.height = extent.height.max(intrinsic.height);
        }
        Size::new(
            if mask.contains_width() {
                extent.width
            } else {
                current.width
            },
            if mask.contains_height() {
                extent.height
            } else {
                current.height
            },
        )
    }

    /// Resize `id` to [`Tree::size_that_fits`], laying out its subtree.
    ///
    /// Idempotent: a second call with no intervening change leaves every frame as it was.
    /// If the size changed, the parent is marked so it can re-align the view.
    pub fn size_to_fit<H: LayoutHooks + ?Sized>(&mut self, id: ViewId, hooks: &mut H) {
        if self.fit(id, hooks)
            && let Some(parent) = self.parent_of(id)
        {
            self.mark_needs_layout(parent);
        }
    }

    /// Fit `id` without touching ancestors. Returns whether the size changed.
    fn fit<H: LayoutHooks + ?Sized>(&mut self, id: ViewId, hooks: &mut H) -> bool {
        let size = self.size_that_fits(id, hooks);
        let Some(frame) = self.frame(id) else {
            return false;
        };
        let fitted = frame.with_size(size);
        let changed = if is_valid_frame(fitted) {
            self.apply_frame(id, fitted)
        } else {
            tracing::warn!(?id, ?size, "size that fits is degenerate; keeping the last frame");
            false
        };
        if changed {
            // Anchored children depend on the new size.
            self.layout_subviews(id, hooks);
            for child in self.child_snapshot(id) {
                self.layout_if_needed(child, hooks);
            }
            if !self.is_alive(id) {
                return false;
            }
        }
        self.clear_needs_layout(id);
        changed
    }

    fn children_extent(&self, id: ViewId) -> Option<Size> {
        let node = self.node_opt(id)?;
        let padding = node.props.padding;
        let mut extent = Size::new(padding.horizontal(), padding.vertical());
        for &child in &node.children {
            let Some(c) = self.node_opt(child).map(|n| &n.props) else {
                continue;
            };
            if c.is_hidden() {
                continue;
            }
            let width = match c.alignment.horizontal() {
                Some(_) => padding.left + c.frame.width() + padding.right,
                None => c.frame.x1 + padding.right,
            };
            let height = match c.alignment.vertical() {
                Some(_) => padding.top + c.frame.height() + padding.bottom,
                None => c.frame.y1 + padding.bottom,
            };
            extent.width = extent.width.max(width);
            extent.height = extent.height.max(height);
        }
        Some(extent)
    }

    fn clear_needs_layout(&mut self, id: ViewId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.needs_layout = false;
        }
    }

    /// Origin of `id`'s content rectangle in window space, as of the last pass.
    pub fn content_origin(&self, id: ViewId) -> Option<Point> {
        let node = self.node_opt(id)?;
        let padding = node.props.padding;
        let origin = node.render_frame.origin();
        Some(Point::new(origin.x + padding.left, origin.y + padding.top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alignment, Padding, ViewProps};
    use alloc::vec::Vec;
    use kurbo::Rect;

    fn props(x: f64, y: f64, w: f64, h: f64) -> ViewProps {
        ViewProps::with_frame(Rect::from_origin_size((x, y), (w, h)))
    }

    /// Reserves a fixed width from any filling child.
    struct Reserve(f64);

    impl LayoutHooks for Reserve {
        fn fill_reservation(&mut self, _tree: &Tree, _parent: ViewId, _child: ViewId) -> Size {
            Size::new(self.0, 0.0)
        }
    }

    #[test]
    fn fill_width_tracks_parent_minus_reservation_without_drift() {
        let mut tree = Tree::new();
        let root = tree
            .insert(ViewProps {
                padding: Padding::uniform(5.0),
                ..props(0.0, 0.0, 200.0, 50.0)
            })
            .unwrap();
        let bar = tree
            .insert_child(
                root,
                ViewProps {
                    autoresizing: Autoresizing::FILL_WIDTH,
                    ..props(0.0, 0.0, 1.0, 10.0)
                },
            )
            .unwrap();
        let mut hooks = Reserve(20.0);
        tree.layout(&mut hooks);
        assert_eq!(tree.frame(bar).unwrap().width(), 170.0);

        for _ in 0..100 {
            tree.set_size(root, Size::new(300.0, 50.0));
            tree.layout(&mut hooks);
            assert_eq!(tree.frame(bar).unwrap().width(), 270.0);
            tree.set_size(root, Size::new(200.0, 50.0));
            tree.layout(&mut hooks);
        }
        assert_eq!(tree.frame(bar).unwrap().width(), 170.0);
        assert_eq!(tree.frame(bar).unwrap().height(), 10.0);
    }

    #[test]
    fn alignment_anchors_inside_padding() {
        let mut tree = Tree::new();
        let root = tree
            .insert(ViewProps {
                padding: Padding::uniform(10.0),
                ..props(0.0, 0.0, 100.0, 50.0)
            })
            .unwrap();
        let center = tree
            .insert_child(
                root,
                ViewProps {
                    alignment: Alignment::MiddleCenter,
                    ..props(0.0, 0.0, 20.0, 10.0)
                },
            )
            .unwrap();
        let corner = tree
            .insert_child(
                root,
                ViewProps {
                    alignment: Alignment::BottomRight,
                    ..props(0.0, 0.0, 20.0, 10.0)
                },
            )
            .unwrap();
        let free = tree.insert_child(root, props(3.0, 4.0, 5.0, 5.0)).unwrap();
        tree.layout(&mut NoHooks);

        assert_eq!(tree.frame(center), Some(Rect::new(40.0, 20.0, 60.0, 30.0)));
        assert_eq!(tree.frame(corner), Some(Rect::new(70.0, 30.0, 90.0, 40.0)));
        assert_eq!(tree.frame(free), Some(Rect::new(3.0, 4.0, 8.0, 9.0)));
    }

    #[test]
    fn contain_covers_children_plus_padding() {
        let mut tree = Tree::new();
        let root = tree.insert(props(0.0, 0.0, 400.0, 400.0)).unwrap();
        let panel = tree
            .insert_child(
                root,
                ViewProps {
                    autoresizing: Autoresizing::CONTAIN,
                    padding: Padding::uniform(4.0),
                    ..Default::default()
                },
            )
            .unwrap();
        tree.insert_child(panel, props(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.insert_child(panel, props(20.0, 5.0, 10.0, 10.0)).unwrap();
        let hidden = tree.insert_child(panel, props(0.0, 0.0, 500.0, 500.0)).unwrap();
        tree.set_hidden(hidden, true);
        tree.layout(&mut NoHooks);

        assert_eq!(tree.frame(panel).unwrap().size(), Size::new(34.0, 19.0));
    }

    #[test]
    fn size_to_fit_is_idempotent() {
        let mut tree = Tree::new();
        let panel = tree
            .insert(ViewProps {
                autoresizing: Autoresizing::CONTAIN_WIDTH,
                padding: Padding::uniform(2.0),
                ..props(0.0, 0.0, 0.0, 30.0)
            })
            .unwrap();
        let child = tree
            .insert_child(
                panel,
                ViewProps {
                    alignment: Alignment::MiddleRight,
                    ..props(0.0, 0.0, 10.0, 10.0)
                },
            )
            .unwrap();

        tree.size_to_fit(panel, &mut NoHooks);
        let first = (tree.frame(panel), tree.frame(child));
        assert_eq!(first.0, Some(Rect::new(0.0, 0.0, 14.0, 30.0)));
        assert_eq!(first.1, Some(Rect::new(2.0, 10.0, 12.0, 20.0)));

        tree.size_to_fit(panel, &mut NoHooks);
        assert_eq!((tree.frame(panel), tree.frame(child)), first);
    }

    #[test]
    fn layout_is_idempotent() {
        let mut tree = Tree::new();
        let root = tree
            .insert(ViewProps {
                padding: Padding::uniform(8.0),
                ..props(0.0, 0.0, 320.0, 240.0)
            })
            .unwrap();
        let panel = tree
            .insert_child(
                root,
                ViewProps {
                    autoresizing: Autoresizing::CONTAIN,
                    alignment: Alignment::MiddleCenter,
                    padding: Padding::uniform(6.0),
                    ..Default::default()
                },
            )
            .unwrap();
        let row = tree
            .insert_child(
                panel,
                ViewProps {
                    autoresizing: Autoresizing::CONTAIN,
                    alignment: Alignment::TopLeft,
                    ..Default::default()
                },
            )
            .unwrap();
        tree.insert_child(row, props(0.0, 0.0, 40.0, 12.0)).unwrap();
        tree.insert_child(row, props(44.0, 0.0, 30.0, 18.0)).unwrap();

        tree.layout(&mut NoHooks);
        let snapshot: Vec<_> = [root, panel, row].map(|id| tree.frame(id)).into();
        assert_eq!(tree.frame(panel).unwrap().size(), Size::new(86.0, 30.0));

        for id in [root, panel, row] {
            tree.mark_needs_layout(id);
        }
        tree.layout(&mut NoHooks);
        let again: Vec<_> = [root, panel, row].map(|id| tree.frame(id)).into();
        assert_eq!(snapshot, again);
        assert!(!tree.needs_layout(root) && !tree.needs_layout(panel) && !tree.needs_layout(row));
    }

    #[test]
    fn nested_contain_grows_when_a_leaf_grows() {
        let mut tree = Tree::new();
        let root = tree.insert(props(0.0, 0.0, 400.0, 400.0)).unwrap();
        let outer = tree
            .insert_child(
                root,
                ViewProps {
                    autoresizing: Autoresizing::CONTAIN,
                    ..Default::default()
                },
            )
            .unwrap();
        let inner = tree
            .insert_child(
                outer,
                ViewProps {
                    autoresizing: Autoresizing::CONTAIN,
                    ..Default::default()
                },
            )
            .unwrap();
        let leaf = tree.insert_child(inner, props(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.layout(&mut NoHooks);
        assert_eq!(tree.frame(outer).unwrap().size(), Size::new(10.0, 10.0));

        tree.set_size(leaf, Size::new(25.0, 15.0));
        tree.layout(&mut NoHooks);
        assert_eq!(tree.frame(inner).unwrap().size(), Size::new(25.0, 15.0));
        assert_eq!(tree.frame(outer).unwrap().size(), Size::new(25.0, 15.0));
    }

    #[test]
    fn degenerate_fill_keeps_last_frame() {
        let mut tree = Tree::new();
        let root = tree.insert(props(0.0, 0.0, 100.0, 20.0)).unwrap();
        let bar = tree
            .insert_child(
                root,
                ViewProps {
                    autoresizing: Autoresizing::FILL_WIDTH,
                    ..props(0.0, 0.0, 30.0, 10.0)
                },
            )
            .unwrap();
        tree.layout(&mut Reserve(150.0));
        assert_eq!(tree.frame(bar).unwrap().width(), 30.0);
        assert!(!tree.needs_layout(root));
    }

    #[test]
    fn intrinsic_size_applies_on_explicit_fit() {
        struct Fixed(ViewId);
        impl LayoutHooks for Fixed {
            fn size_that_fits(&mut self, _tree: &Tree, id: ViewId) -> Option<Size> {
                (id == self.0).then_some(Size::new(42.0, 7.0))
            }
        }

        let mut tree = Tree::new();
        let label = tree.insert(props(5.0, 5.0, 1.0, 1.0)).unwrap();
        let mut hooks = Fixed(label);
        tree.layout(&mut hooks);
        assert_eq!(tree.frame(label).unwrap().size(), Size::new(1.0, 1.0));
        tree.size_to_fit(label, &mut hooks);
        assert_eq!(tree.frame(label), Some(Rect::new(5.0, 5.0, 47.0, 12.0)));
    }

    #[test]
    fn hook_runs_after_base_rules() {
        struct Nudge;
        impl LayoutHooks for Nudge {
            fn layout_subviews(&mut self, tree: &mut Tree, id: ViewId) {
                for child in tree.children(id).to_vec() {
                    let frame = tree.frame(child).unwrap();
                    tree.place(child, frame.with_origin((frame.x0 + 1.0, frame.y0)));
                }
            }
        }

        let mut tree = Tree::new();
        let root = tree.insert(props(0.0, 0.0, 100.0, 100.0)).unwrap();
        let child = tree
            .insert_child(
                root,
                ViewProps {
                    alignment: Alignment::TopLeft,
                    ..props(50.0, 50.0, 10.0, 10.0)
                },
            )
            .unwrap();
        tree.layout(&mut Nudge);
        assert_eq!(tree.frame(child).unwrap().origin(), Point::new(1.0, 0.0));
    }

    #[test]
    fn hook_may_destroy_a_contained_view_mid_layout() {
        struct Destroy(ViewId);
        impl LayoutHooks for Destroy {
            fn layout_subviews(&mut self, tree: &mut Tree, id: ViewId) {
                if id == self.0 {
                    tree.destroy(id);
                }
            }
        }

        let mut tree = Tree::new();
        let root = tree.insert(props(0.0, 0.0, 400.0, 400.0)).unwrap();
        let panel = tree
            .insert_child(
                root,
                ViewProps {
                    autoresizing: Autoresizing::CONTAIN,
                    ..Default::default()
                },
            )
            .unwrap();
        let leaf = tree.insert_child(panel, props(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.layout(&mut Destroy(panel));

        assert!(!tree.is_alive(panel));
        assert!(!tree.is_alive(leaf));
        assert!(tree.is_alive(root));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn size_to_fit_tolerates_a_destroyed_view() {
        struct Destroy(ViewId);
        impl LayoutHooks for Destroy {
            fn layout_subviews(&mut self, tree: &mut Tree, id: ViewId) {
                if id == self.0 {
                    tree.destroy(id);
                }
            }
        }

        let mut tree = Tree::new();
        let panel = tree
            .insert(ViewProps {
                autoresizing: Autoresizing::CONTAIN,
                ..Default::default()
            })
            .unwrap();
        tree.insert_child(panel, props(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(tree.size_that_fits(panel, &mut Destroy(panel)), Size::ZERO);
        assert!(!tree.is_alive(panel));
        tree.size_to_fit(panel, &mut Destroy(panel));
    }
}
