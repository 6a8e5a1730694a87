// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: phases, outcomes, lookups, and dispatch.
//!
//! ## Overview
//!
//! These types describe the responder protocol and its inputs/outputs.
//! They are referenced by the [`router`](crate::router) and the [`dispatcher`](crate::dispatcher).

use smallvec::SmallVec;

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] item produced by the [`Router`](crate::router::Router).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// The node the event was routed to.
    Target,
    /// An ancestor of the target, innermost first.
    Bubble,
}

/// Handler outcome controlling propagation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Offer the event to the next entry.
    Continue,
    /// The event was consumed; stop propagation.
    Stop,
}

/// A single step in a propagation sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dispatch<K> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node receiving the event.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// A target step.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// A bubble step.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// A propagation sequence: the target followed by its ancestors up to the root.
pub type Sequence<K> = SmallVec<[Dispatch<K>; 8]>;

/// Structural queries the router needs about nodes it does not own.
pub trait NodeLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// Whether `node` is alive and reachable from the root events are routed through.
    ///
    /// Roles held by detached nodes are dropped instead of routed.
    fn is_attached(&self, node: &K) -> bool {
        let _ = node;
        true
    }
}

/// A lookup for flat node sets: every node is an attached root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> NodeLookup<K> for NoParent {
    fn parent_of(&self, _: &K) -> Option<K> {
        None
    }
}
