// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for the Arbor view tree.
//!
//! ## Feature
//!
//! Enable with `view_tree_adapter`.

use alloc::vec::Vec;

use arbor_view::{Tree, ViewId};
use kurbo::Point;

use crate::types::NodeLookup;

/// [`NodeLookup`] over a view tree, scoped to the tree below `root`.
///
/// A view counts as attached when it is alive and `root` is the view itself or one of its
/// ancestors.
#[derive(Clone, Copy, Debug)]
pub struct ViewTreeLookup<'a> {
    tree: &'a Tree,
    root: ViewId,
}

impl<'a> ViewTreeLookup<'a> {
    /// Scope lookups to the subtree under `root`.
    pub fn new(tree: &'a Tree, root: ViewId) -> Self {
        Self { tree, root }
    }
}

impl NodeLookup<ViewId> for ViewTreeLookup<'_> {
    fn parent_of(&self, node: &ViewId) -> Option<ViewId> {
        if *node == self.root {
            return None;
        }
        self.tree.parent_of(*node)
    }

    fn is_attached(&self, node: &ViewId) -> bool {
        self.tree.is_within(*node, self.root)
    }
}

/// Root → target path of the frontmost pickable view under `pt`. Empty if nothing is hit.
///
/// Uses the render frames from the tree's last layout or render pass.
pub fn hit_path(tree: &Tree, root: ViewId, pt: Point) -> Vec<ViewId> {
    tree.hit_test(root, pt).map(|hit| hit.path).unwrap_or_default()
}
