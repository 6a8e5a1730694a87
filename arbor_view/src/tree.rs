// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, mutation, queries, and hit testing.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::layout::LayoutPolicy;
use crate::types::{Alignment, Autoresizing, Bevel, Color, Padding, ViewFlags, ViewId, ViewProps};

/// Snapshot of a child list taken at the start of a visit.
pub(crate) type Children = SmallVec<[ViewId; 8]>;

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Owning container for every view.
///
/// Parents own their children: [`Tree::destroy`] frees a view together with its subtree.
/// Parent back-references are plain [`ViewId`]s and are cleared on detach.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    pub(crate) free_list: Vec<usize>,
    pub(crate) policy: LayoutPolicy,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched view.
    pub node: ViewId,
    /// Path from root to view (inclusive).
    pub path: Vec<ViewId>,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<ViewId>,
    pub(crate) children: Vec<ViewId>,
    pub(crate) props: ViewProps,
    pub(crate) render_frame: Rect,
    pub(crate) needs_layout: bool,
}

impl Node {
    fn new(generation: u32, props: ViewProps) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            props,
            render_frame: Rect::ZERO,
            needs_layout: true,
        }
    }
}

/// Whether `frame` is usable geometry: finite, with non-negative width and height.
pub(crate) fn is_valid_frame(frame: Rect) -> bool {
    frame.x0.is_finite()
        && frame.y0.is_finite()
        && frame.x1.is_finite()
        && frame.y1.is_finite()
        && frame.width() >= 0.0
        && frame.height() >= 0.0
}

impl Tree {
    /// Create a new empty tree with the default [`LayoutPolicy`].
    pub fn new() -> Self {
        Self::with_policy(LayoutPolicy::default())
    }

    /// Create a new empty tree with an explicit layout policy.
    pub fn with_policy(policy: LayoutPolicy) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            policy,
        }
    }

    /// The layout policy in effect.
    pub fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    /// Create a detached view.
    ///
    /// The view starts dirty. An invalid frame (negative size, non-finite coordinates) is
    /// replaced by [`Rect::ZERO`] with a warning.
    pub fn insert(&mut self, mut props: ViewProps) -> Result<ViewId, TreeError> {
        if !is_valid_frame(props.frame) {
            tracing::warn!(frame = ?props.frame, "invalid initial frame; using an empty frame");
            props.frame = Rect::ZERO;
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, props));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            if self.nodes.len() >= u32::MAX as usize {
                return Err(TreeError::Exhausted);
            }
            self.nodes
                .try_reserve(1)
                .map_err(|_| TreeError::Exhausted)?;
            self.generations
                .try_reserve(1)
                .map_err(|_| TreeError::Exhausted)?;
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, props)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        Ok(ViewId::new(idx, generation))
    }

    /// Create a view and attach it as the last child of `parent`.
    pub fn insert_child(&mut self, parent: ViewId, props: ViewProps) -> Result<ViewId, TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::Stale(parent));
        }
        let id = self.insert(props)?;
        if let Err(err) = self.add_child(parent, id) {
            self.destroy(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Attach a detached view as the last (frontmost) child of `parent`.
    ///
    /// Fails without effect if either id is stale, if `child` already has a parent, or if
    /// `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> Result<(), TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::Stale(parent));
        }
        if !self.is_alive(child) {
            return Err(TreeError::Stale(child));
        }
        if let Some(current) = self.node(child).parent {
            tracing::debug!(?child, ?current, "rejected attach of an attached view");
            return Err(TreeError::AlreadyAttached {
                child,
                parent: current,
            });
        }
        if child == parent || self.is_ancestor(child, parent) {
            tracing::debug!(?parent, ?child, "rejected attach that would create a cycle");
            return Err(TreeError::Cycle { parent, child });
        }
        let p = self.node_mut(parent);
        p.children
            .try_reserve(1)
            .map_err(|_| TreeError::Exhausted)?;
        p.children.push(child);
        self.node_mut(child).parent = Some(parent);
        self.mark_subtree_dirty(child);
        self.mark_needs_layout(parent);
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// A no-op returning `false` unless `child` is currently a child of `parent`.
    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> bool {
        if !self.is_alive(child) || self.node(child).parent != Some(parent) {
            return false;
        }
        self.unlink_parent(child, parent);
        self.mark_needs_layout(parent);
        true
    }

    /// Detach `id` from whatever parent it has. Returns the former parent.
    pub fn remove_from_parent(&mut self, id: ViewId) -> Option<ViewId> {
        let parent = self.parent_of(id)?;
        self.remove_child(parent, id);
        Some(parent)
    }

    /// Free a view and its whole subtree, detaching it first.
    ///
    /// Returns the freed ids, the view itself first. Stale ids free nothing.
    pub fn destroy(&mut self, id: ViewId) -> Vec<ViewId> {
        let mut freed = Vec::new();
        if !self.is_alive(id) {
            return freed;
        }
        self.remove_from_parent(id);
        self.free_recursive(id, &mut freed);
        freed
    }

    /// Move `id` to the end of its parent's child list so it paints last and hit-tests first.
    pub fn bring_to_front(&mut self, id: ViewId) -> bool {
        self.splice_within_parent(id, true)
    }

    /// Move `id` to the start of its parent's child list so it paints first and hit-tests last.
    pub fn send_to_back(&mut self, id: ViewId) -> bool {
        self.splice_within_parent(id, false)
    }

    /// Replace the frame.
    ///
    /// Returns whether anything changed. Changes within the layout epsilon are ignored.
    /// Negative or non-finite sizes are rejected with a warning and the previous frame kept.
    pub fn set_frame(&mut self, id: ViewId, frame: Rect) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if !is_valid_frame(frame) {
            tracing::warn!(?id, ?frame, "rejected degenerate frame; keeping the last valid one");
            return false;
        }
        if !self.apply_frame(id, frame) {
            return false;
        }
        self.mark_needs_layout(id);
        if let Some(parent) = self.node(id).parent {
            self.mark_needs_layout(parent);
        }
        true
    }

    /// Move the frame origin, keeping the size.
    pub fn set_origin(&mut self, id: ViewId, origin: Point) -> bool {
        match self.frame(id) {
            Some(frame) => self.set_frame(id, frame.with_origin(origin)),
            None => false,
        }
    }

    /// Resize the frame, keeping the origin.
    pub fn set_size(&mut self, id: ViewId, size: Size) -> bool {
        match self.frame(id) {
            Some(frame) => self.set_frame(id, frame.with_size(size)),
            None => false,
        }
    }

    /// Update padding.
    pub fn set_padding(&mut self, id: ViewId, padding: Padding) {
        if let Some(n) = self.node_opt_mut(id)
            && n.props.padding != padding
        {
            n.props.padding = padding;
            self.mark_needs_layout(id);
        }
    }

    /// Update alignment. The parent re-positions the view on the next layout.
    pub fn set_alignment(&mut self, id: ViewId, alignment: Alignment) {
        if let Some(n) = self.node_opt_mut(id)
            && n.props.alignment != alignment
        {
            n.props.alignment = alignment;
            self.mark_geometry_dirty(id);
        }
    }

    /// Update the autoresizing mask.
    pub fn set_autoresizing(&mut self, id: ViewId, mask: Autoresizing) {
        if let Some(n) = self.node_opt_mut(id)
            && n.props.autoresizing != mask
        {
            n.props.autoresizing = mask;
            self.mark_geometry_dirty(id);
        }
    }

    /// Update view flags.
    pub fn set_flags(&mut self, id: ViewId, flags: ViewFlags) {
        if let Some(n) = self.node_opt_mut(id)
            && n.props.flags != flags
        {
            let visibility_changed =
                (n.props.flags ^ flags).contains(ViewFlags::VISIBLE);
            n.props.flags = flags;
            // Hidden children do not count towards a contain-sized parent.
            if visibility_changed {
                self.mark_geometry_dirty(id);
            }
        }
    }

    /// Show or hide a view and its subtree.
    pub fn set_hidden(&mut self, id: ViewId, hidden: bool) {
        if let Some(flags) = self.props(id).map(|p| p.flags) {
            self.set_flags(id, flags.difference(ViewFlags::VISIBLE).union(if hidden {
                ViewFlags::empty()
            } else {
                ViewFlags::VISIBLE
            }));
        }
    }

    /// Update the background color. Does not affect layout.
    pub fn set_background(&mut self, id: ViewId, color: Color) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.background = color;
        }
    }

    /// Update the border. Does not affect layout.
    pub fn set_border(&mut self, id: ViewId, color: Color, width: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.border_color = color;
            n.props.border_width = width.max(0.0);
        }
    }

    /// Update the bevel. Does not affect layout.
    pub fn set_bevel(&mut self, id: ViewId, bevel: Bevel) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.bevel = bevel;
        }
    }

    /// Mark `id` as needing layout.
    ///
    /// The flag propagates immediately to every ancestor whose size is content-driven, and to
    /// the parent of any content-sized view on the way, which re-positions it.
    pub fn mark_needs_layout(&mut self, id: ViewId) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        n.needs_layout = true;
        let mut below_is_content_sized = n.props.autoresizing.is_content_sized();
        let mut cur = n.parent;
        while let Some(p) = cur {
            let node = self.node_mut(p);
            let content_sized = node.props.autoresizing.is_content_sized();
            if content_sized || below_is_content_sized {
                node.needs_layout = true;
            }
            below_is_content_sized = content_sized;
            cur = node.parent;
        }
    }

    // --- queries ---

    /// Returns true if `id` refers to a live view.
    ///
    /// A `ViewId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`ViewId`] docs for the generational semantics.
    pub fn is_alive(&self, id: ViewId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// The parent of a live view, if attached.
    pub fn parent_of(&self, id: ViewId) -> Option<ViewId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live view in paint order (back to front).
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Geometry and style of a live view.
    pub fn props(&self, id: ViewId) -> Option<&ViewProps> {
        self.node_opt(id).map(|n| &n.props)
    }

    /// Parent-relative frame of a live view.
    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.props.frame)
    }

    /// Absolute (window-space) frame as of the last layout or render pass.
    pub fn render_frame(&self, id: ViewId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.render_frame)
    }

    /// Whether a live view is waiting for layout.
    pub fn needs_layout(&self, id: ViewId) -> bool {
        self.node_opt(id).is_some_and(|n| n.needs_layout)
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut cur = self.parent_of(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent_of(p);
        }
        false
    }

    /// Whether `id` is `root` or lies within its subtree.
    pub fn is_within(&self, id: ViewId, root: ViewId) -> bool {
        self.is_alive(id) && (id == root || self.is_ancestor(root, id))
    }

    /// Path from the topmost ancestor down to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut cur = Some(id);
        while let Some(n) = cur {
            out.push(n);
            cur = self.node(n).parent;
        }
        out.reverse();
        out
    }

    /// All live views without a parent: the window root and any detached subtrees.
    pub fn roots(&self) -> Vec<ViewId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(n) if n.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "ViewId uses 32-bit indices by design."
                    )]
                    Some(ViewId::new(i as u32, n.generation))
                }
                _ => None,
            })
            .collect()
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree holds no live views.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit test a window-space point below `root`. Returns the deepest frontmost pickable view.
    ///
    /// Children are visited in reverse paint order, and a child is only entered if it is
    /// visible and its render frame contains the point. Render frames are those of the last
    /// layout or render pass.
    pub fn hit_test(&self, root: ViewId, pt: Point) -> Option<Hit> {
        if !self.is_alive(root) {
            return None;
        }
        let mut path = Vec::new();
        let node = self.hit_recursive(root, pt, &mut path)?;
        Some(Hit { node, path })
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: ViewId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ViewId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: ViewId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ViewId")
    }

    pub(crate) fn node_opt(&self, id: ViewId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn child_snapshot(&self, id: ViewId) -> Children {
        self.node_opt(id)
            .map(|n| n.children.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Store `frame` if it differs by more than the epsilon. Marks the view dirty when its size
    /// changed. Does not propagate to ancestors.
    pub(crate) fn apply_frame(&mut self, id: ViewId, frame: Rect) -> bool {
        let eps = self.policy.epsilon;
        let n = self.node_mut(id);
        let old = n.props.frame;
        let moved = (old.x0 - frame.x0).abs() > eps || (old.y0 - frame.y0).abs() > eps;
        let resized = (old.width() - frame.width()).abs() > eps
            || (old.height() - frame.height()).abs() > eps;
        if !moved && !resized {
            return false;
        }
        n.props.frame = frame;
        if resized {
            n.needs_layout = true;
        }
        true
    }

    /// Place a view from inside a layout hook.
    ///
    /// Unlike [`Tree::set_frame`], this never marks ancestors dirty: the caller is the
    /// ancestor being laid out. Degenerate frames are rejected with a warning.
    pub fn place(&mut self, id: ViewId, frame: Rect) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if !is_valid_frame(frame) {
            tracing::warn!(?id, ?frame, "rejected degenerate frame; keeping the last valid one");
            return false;
        }
        self.apply_frame(id, frame)
    }

    fn mark_geometry_dirty(&mut self, id: ViewId) {
        self.mark_needs_layout(id);
        if let Some(parent) = self.parent_of(id) {
            self.mark_needs_layout(parent);
        }
    }

    fn mark_subtree_dirty(&mut self, id: ViewId) {
        let children = {
            let n = self.node_mut(id);
            n.needs_layout = true;
            n.children.clone()
        };
        for c in children {
            self.mark_subtree_dirty(c);
        }
    }

    fn unlink_parent(&mut self, id: ViewId, parent: ViewId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn splice_within_parent(&mut self, id: ViewId, front: bool) -> bool {
        let Some(parent) = self.parent_of(id) else {
            return false;
        };
        let children = &mut self.node_mut(parent).children;
        let Some(pos) = children.iter().position(|c| *c == id) else {
            return false;
        };
        children.remove(pos);
        if front {
            children.push(id);
        } else {
            children.insert(0, id);
        }
        true
    }

    fn free_recursive(&mut self, id: ViewId, freed: &mut Vec<ViewId>) {
        freed.push(id);
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_recursive(child, freed);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn hit_recursive(&self, id: ViewId, pt: Point, path: &mut Vec<ViewId>) -> Option<ViewId> {
        let node = self.node(id);
        if node.props.is_hidden() || !node.render_frame.contains(pt) {
            return None;
        }
        path.push(id);
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_recursive(child, pt, path) {
                return Some(hit);
            }
        }
        if node.props.flags.contains(ViewFlags::PICKABLE) {
            return Some(id);
        }
        path.pop();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NoHooks;
    use alloc::vec;

    fn frame(x: f64, y: f64, w: f64, h: f64) -> ViewProps {
        ViewProps::with_frame(Rect::from_origin_size((x, y), (w, h)))
    }

    #[test]
    fn attach_then_detach_restores_child_list() {
        let mut tree = Tree::new();
        let root = tree.insert(frame(0.0, 0.0, 100.0, 100.0)).unwrap();
        let a = tree.insert_child(root, frame(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = tree.insert_child(root, frame(0.0, 0.0, 10.0, 10.0)).unwrap();
        let before = tree.children(root).to_vec();

        let c = tree.insert(frame(0.0, 0.0, 5.0, 5.0)).unwrap();
        tree.add_child(root, c).unwrap();
        assert_eq!(tree.children(root), &[a, b, c]);
        assert_eq!(tree.parent_of(c), Some(root));

        assert!(tree.remove_child(root, c));
        assert_eq!(tree.children(root), before.as_slice());
        assert_eq!(tree.parent_of(c), None, "back-reference must be cleared");
        assert!(tree.is_alive(c), "detaching does not free");
    }

    #[test]
    fn structural_errors_leave_tree_unchanged() {
        let mut tree = Tree::new();
        let root = tree.insert(ViewProps::default()).unwrap();
        let a = tree.insert_child(root, ViewProps::default()).unwrap();
        let b = tree.insert_child(a, ViewProps::default()).unwrap();

        assert_eq!(
            tree.add_child(root, root),
            Err(TreeError::Cycle {
                parent: root,
                child: root
            })
        );
        let other = tree.insert(ViewProps::default()).unwrap();
        assert_eq!(
            tree.add_child(other, a),
            Err(TreeError::AlreadyAttached {
                child: a,
                parent: root
            })
        );
        // Attaching a view below its own descendant is a cycle too.
        tree.remove_from_parent(a);
        assert_eq!(
            tree.add_child(b, a),
            Err(TreeError::Cycle {
                parent: b,
                child: a
            })
        );
        assert_eq!(tree.children(b), &[] as &[ViewId]);
        assert_eq!(tree.parent_of(a), None);
        assert_eq!(tree.children(root), &[] as &[ViewId]);
    }

    #[test]
    fn remove_child_with_wrong_parent_is_noop() {
        let mut tree = Tree::new();
        let root = tree.insert(ViewProps::default()).unwrap();
        let a = tree.insert_child(root, ViewProps::default()).unwrap();
        let b = tree.insert_child(root, ViewProps::default()).unwrap();
        assert!(!tree.remove_child(a, b));
        assert_eq!(tree.children(root), &[a, b]);
    }

    #[test]
    fn destroy_frees_subtree_and_ids_go_stale() {
        let mut tree = Tree::new();
        let root = tree.insert(ViewProps::default()).unwrap();
        let a = tree.insert_child(root, ViewProps::default()).unwrap();
        let b = tree.insert_child(a, ViewProps::default()).unwrap();

        let freed = tree.destroy(a);
        assert_eq!(freed, vec![a, b]);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(tree.children(root).is_empty());

        // Reuse slot by inserting a new view; old id must remain stale; new id is live.
        let c = tree.insert(ViewProps::default()).unwrap();
        assert!(tree.is_alive(c));
        assert!(!tree.is_alive(a) && !tree.is_alive(b));
        if c.0 == b.0 {
            assert!(c.1 > b.1, "generation must increase on reuse");
        }
        if c.0 == a.0 {
            assert!(c.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn reorder_splices_child_list() {
        let mut tree = Tree::new();
        let root = tree.insert(ViewProps::default()).unwrap();
        let a = tree.insert_child(root, ViewProps::default()).unwrap();
        let b = tree.insert_child(root, ViewProps::default()).unwrap();
        let c = tree.insert_child(root, ViewProps::default()).unwrap();
        assert!(tree.bring_to_front(a));
        assert_eq!(tree.children(root), &[b, c, a]);
        assert!(tree.send_to_back(c));
        assert_eq!(tree.children(root), &[c, b, a]);
        assert!(!tree.bring_to_front(root), "roots have no siblings");
    }

    #[test]
    fn hit_test_prefers_later_sibling() {
        let mut tree = Tree::new();
        let root = tree.insert(frame(0.0, 0.0, 200.0, 200.0)).unwrap();
        let a = tree.insert_child(root, frame(40.0, 40.0, 80.0, 80.0)).unwrap();
        let b = tree.insert_child(root, frame(40.0, 40.0, 80.0, 80.0)).unwrap();
        tree.layout(&mut NoHooks);

        let hit = tree.hit_test(root, Point::new(60.0, 60.0)).unwrap();
        assert_eq!(hit.node, b, "later sibling is frontmost");
        assert_eq!(hit.path, vec![root, b]);

        tree.bring_to_front(a);
        let hit = tree.hit_test(root, Point::new(60.0, 60.0)).unwrap();
        assert_eq!(hit.node, a);
    }

    #[test]
    fn hit_test_descends_with_absolute_frames() {
        let mut tree = Tree::new();
        let root = tree.insert(frame(0.0, 0.0, 200.0, 200.0)).unwrap();
        let panel = tree.insert_child(root, frame(50.0, 50.0, 100.0, 100.0)).unwrap();
        let leaf = tree.insert_child(panel, frame(10.0, 10.0, 20.0, 20.0)).unwrap();
        tree.layout(&mut NoHooks);

        assert_eq!(
            tree.render_frame(leaf),
            Some(Rect::new(60.0, 60.0, 80.0, 80.0))
        );
        let hit = tree.hit_test(root, Point::new(65.0, 65.0)).unwrap();
        assert_eq!(hit.node, leaf);
        assert_eq!(hit.path, vec![root, panel, leaf]);
        // Relative coordinates do not hit.
        let hit = tree.hit_test(root, Point::new(15.0, 15.0)).unwrap();
        assert_eq!(hit.node, root);
    }

    #[test]
    fn hidden_subtree_is_not_hit() {
        let mut tree = Tree::new();
        let root = tree.insert(frame(0.0, 0.0, 100.0, 100.0)).unwrap();
        let panel = tree.insert_child(root, frame(0.0, 0.0, 50.0, 50.0)).unwrap();
        let _leaf = tree.insert_child(panel, frame(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.set_hidden(panel, true);
        tree.layout(&mut NoHooks);
        let hit = tree.hit_test(root, Point::new(5.0, 5.0)).unwrap();
        assert_eq!(hit.node, root);
    }

    #[test]
    fn non_pickable_view_passes_through_to_children_and_siblings() {
        let mut tree = Tree::new();
        let root = tree.insert(frame(0.0, 0.0, 100.0, 100.0)).unwrap();
        let back = tree.insert_child(root, frame(0.0, 0.0, 50.0, 50.0)).unwrap();
        let overlay = tree
            .insert_child(
                root,
                ViewProps {
                    flags: ViewFlags::VISIBLE,
                    ..frame(0.0, 0.0, 50.0, 50.0)
                },
            )
            .unwrap();
        let button = tree.insert_child(overlay, frame(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.layout(&mut NoHooks);

        assert_eq!(tree.hit_test(root, Point::new(5.0, 5.0)).unwrap().node, button);
        assert_eq!(tree.hit_test(root, Point::new(30.0, 30.0)).unwrap().node, back);
    }

    #[test]
    fn degenerate_frames_are_rejected() {
        let mut tree = Tree::new();
        let a = tree.insert(frame(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(!tree.set_frame(a, Rect::new(0.0, 0.0, -5.0, 10.0)));
        assert!(!tree.set_frame(a, Rect::new(0.0, 0.0, f64::NAN, 10.0)));
        assert_eq!(tree.frame(a), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn tiny_frame_changes_do_not_dirty() {
        let mut tree = Tree::new();
        let a = tree.insert(frame(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.layout(&mut NoHooks);
        assert!(!tree.needs_layout(a));
        assert!(!tree.set_frame(a, Rect::new(0.0, 0.0, 10.0 + 1e-12, 10.0)));
        assert!(!tree.needs_layout(a));
        assert!(tree.set_frame(a, Rect::new(0.0, 0.0, 11.0, 10.0)));
        assert!(tree.needs_layout(a));
    }

    #[test]
    fn dirty_flag_propagates_to_content_sized_ancestors() {
        let mut tree = Tree::new();
        let root = tree.insert(frame(0.0, 0.0, 100.0, 100.0)).unwrap();
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
        let leaf = tree.insert_child(inner, frame(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.layout(&mut NoHooks);
        assert!(!tree.needs_layout(root) && !tree.needs_layout(outer));

        tree.mark_needs_layout(leaf);
        assert!(tree.needs_layout(inner));
        assert!(tree.needs_layout(outer));
        assert!(tree.needs_layout(root), "the parent re-positions a content-sized child");
    }
}
