// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Holds the responder context and turns it into dispatch sequences:
//!
//! - Pointer events go to the captured node if there is one, otherwise to the hit target.
//! - Keyboard events go to the first responder, or nowhere.
//!
//! Every sequence is the target followed by its ancestors, innermost first.
//!
//! ## Stale roles
//!
//! The router stores plain keys. Before routing to a held node it asks the
//! [`NodeLookup`] whether the node is still attached; a detached holder loses its role and the
//! event is routed as if the role were unset. Call [`Router::forget`] when detaching a subtree
//! to drop roles eagerly.

use crate::types::{Dispatch, NodeLookup, Sequence};

/// Responder context: pointer capture and first responder.
///
/// ## Usage
///
/// - Call [`Router::route_pointer`] with the hit path of each pointer event.
/// - Call [`Router::route_keyboard`] for each keyboard event.
/// - Set [`Router::capture`] on pointer-down over a control and
///   [`Router::release_capture`] on pointer-up.
///
/// The lookup is passed per call, so the node structure can change between events.
#[derive(Clone, Debug)]
pub struct Router<K> {
    pub(crate) first_responder: Option<K>,
    // Single pointer; per-device capture is out of scope.
    pub(crate) captured: Option<K>,
}

impl<K> Default for Router<K> {
    fn default() -> Self {
        Self {
            first_responder: None,
            captured: None,
        }
    }
}

impl<K: Copy + Eq + core::fmt::Debug> Router<K> {
    /// Create a router with no first responder and no capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the first responder. Returns the previous one.
    pub fn set_first_responder(&mut self, node: Option<K>) -> Option<K> {
        tracing::trace!(?node, "first responder changed");
        core::mem::replace(&mut self.first_responder, node)
    }

    /// The current first responder.
    pub fn first_responder(&self) -> Option<K> {
        self.first_responder
    }

    /// Route subsequent pointer events to `node` until released.
    ///
    /// Returns `false`, leaving the capture unchanged, if `node` is not attached.
    pub fn capture(&mut self, node: K, lookup: &impl NodeLookup<K>) -> bool {
        if !lookup.is_attached(&node) {
            tracing::debug!(?node, "refused capture by a detached node");
            return false;
        }
        tracing::trace!(?node, "pointer captured");
        self.captured = Some(node);
        true
    }

    /// Release the pointer capture. Returns the node that held it.
    pub fn release_capture(&mut self) -> Option<K> {
        let released = self.captured.take();
        if let Some(node) = released {
            tracing::trace!(?node, "pointer released");
        }
        released
    }

    /// The node holding the pointer capture.
    pub fn captured(&self) -> Option<K> {
        self.captured
    }

    /// Drop any role held by a node for which `within` returns `true`.
    ///
    /// Typically `within` tests membership in a subtree that is being detached.
    pub fn forget(&mut self, mut within: impl FnMut(&K) -> bool) {
        if self.first_responder.as_ref().is_some_and(&mut within) {
            tracing::trace!(node = ?self.first_responder, "first responder forgotten");
            self.first_responder = None;
        }
        if self.captured.as_ref().is_some_and(&mut within) {
            tracing::trace!(node = ?self.captured, "capture forgotten");
            self.captured = None;
        }
    }

    /// Build the sequence for a pointer event.
    ///
    /// `hit_path` is root → target from a hit test, possibly empty. An attached captured node
    /// overrides it; a detached one is released first.
    pub fn route_pointer(&mut self, hit_path: &[K], lookup: &impl NodeLookup<K>) -> Sequence<K> {
        if let Some(cap) = self.captured {
            if lookup.is_attached(&cap) {
                return Self::chain(cap, lookup);
            }
            tracing::debug!(node = ?cap, "captured node detached; releasing");
            self.captured = None;
        }
        let mut out = Sequence::new();
        let mut nodes = hit_path.iter().rev();
        if let Some(&target) = nodes.next() {
            out.push(Dispatch::target(target));
            out.extend(nodes.map(|&n| Dispatch::bubble(n)));
        }
        out
    }

    /// Build the sequence for a keyboard event.
    ///
    /// Empty when there is no first responder. A detached first responder is cleared and the
    /// event is dropped.
    pub fn route_keyboard(&mut self, lookup: &impl NodeLookup<K>) -> Sequence<K> {
        let Some(node) = self.first_responder else {
            return Sequence::new();
        };
        if !lookup.is_attached(&node) {
            tracing::debug!(?node, "first responder detached; dropping keyboard event");
            self.first_responder = None;
            return Sequence::new();
        }
        Self::chain(node, lookup)
    }

    fn chain(target: K, lookup: &impl NodeLookup<K>) -> Sequence<K> {
        let mut out = Sequence::new();
        out.push(Dispatch::target(target));
        // Caller ensures acyclic ancestry.
        let mut cur = lookup.parent_of(&target);
        while let Some(p) = cur {
            out.push(Dispatch::bubble(p));
            cur = lookup.parent_of(&p);
        }
        out
    }
}
