// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Responder: a deterministic, `no_std` router for UI events.
//!
//! ## Overview
//!
//! This crate holds the responder context (pointer capture and first responder) and builds
//! the sequence an event travels: the target, then its ancestors innermost first.
//! It does not perform hit testing. Feed it a root → target path from your picker and a
//! [`NodeLookup`](crate::types::NodeLookup) that answers parent and liveness queries.
//!
//! ## Routing
//!
//! - Pointer events: the captured node if one is set and still attached, otherwise the hit
//!   target.
//! - Keyboard events: the first responder's chain. With no first responder, or one that has
//!   been detached, the event is dropped.
//!
//! ## Layering
//!
//! The router only computes the order. The [`dispatcher`] walks a sequence and stops at the
//! first handler that consumes the event; toolkit policy (what counts as consuming, when to
//! capture) lives above this crate.
//!
//! ## Example
//!
//! ```
//! use arbor_responder::router::Router;
//! use arbor_responder::types::{NodeLookup, Phase};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! struct Node(u32);
//!
//! // 3 is inside 2, which is inside 1.
//! struct Parents;
//! impl NodeLookup<Node> for Parents {
//!     fn parent_of(&self, node: &Node) -> Option<Node> {
//!         (node.0 > 1).then(|| Node(node.0 - 1))
//!     }
//! }
//!
//! let mut router = Router::new();
//! let seq = router.route_pointer(&[Node(1), Node(2), Node(3)], &Parents);
//! assert_eq!(seq[0].phase, Phase::Target);
//! assert_eq!(seq.iter().map(|d| d.node.0).collect::<Vec<_>>(), [3, 2, 1]);
//!
//! // While captured, pointer events go to the captor wherever they land.
//! assert!(router.capture(Node(2), &Parents));
//! let seq = router.route_pointer(&[Node(1)], &Parents);
//! assert_eq!(seq.iter().map(|d| d.node.0).collect::<Vec<_>>(), [2, 1]);
//! ```

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod router;
pub mod types;
