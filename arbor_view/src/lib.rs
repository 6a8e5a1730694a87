// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor View: a retained view tree with frame-based layout and an abstract render traversal.
//!
//! ## Overview
//!
//! Views live in a [`Tree`] arena and are addressed by generational [`ViewId`]s.
//! Each view has a parent-relative frame, padding, an [`Alignment`] and an [`Autoresizing`] mask.
//! Layout resolves those into concrete frames; render walks the tree and issues primitive
//! calls on a host-provided [`Painter`].
//!
//! - Structure: attach, detach, destroy, and reorder children. Invalid mutations return a
//!   [`TreeError`] and leave the tree unchanged.
//! - Layout: fill to the parent's content area, contain the children, align at one of nine
//!   anchors, and size-to-fit. Only dirty views are recomputed; widgets extend the rules
//!   through [`LayoutHooks`].
//! - Render: depth first, parents before children, in window coordinates.
//! - Hit testing: the deepest frontmost pickable view under a point.
//!
//! ## Example
//!
//! ```
//! use arbor_view::{Alignment, Autoresizing, NoHooks, Padding, Tree, ViewProps};
//! use arbor_view::kurbo::{Point, Rect, Size};
//!
//! let mut tree = Tree::new();
//! let root = tree
//!     .insert(ViewProps {
//!         padding: Padding::uniform(10.0),
//!         ..ViewProps::with_frame(Rect::new(0.0, 0.0, 200.0, 100.0))
//!     })
//!     .unwrap();
//!
//! // A bar that spans the content width, and a centered badge.
//! let bar = tree
//!     .insert_child(
//!         root,
//!         ViewProps {
//!             autoresizing: Autoresizing::FILL_WIDTH,
//!             ..ViewProps::with_frame(Rect::new(0.0, 0.0, 1.0, 8.0))
//!         },
//!     )
//!     .unwrap();
//! let badge = tree
//!     .insert_child(
//!         root,
//!         ViewProps {
//!             alignment: Alignment::MiddleCenter,
//!             ..ViewProps::with_frame(Rect::new(0.0, 0.0, 20.0, 20.0))
//!         },
//!     )
//!     .unwrap();
//!
//! tree.layout(&mut NoHooks);
//! assert_eq!(tree.frame(bar).unwrap().width(), 180.0);
//! assert_eq!(tree.frame(badge).unwrap().origin(), Point::new(90.0, 40.0));
//!
//! // The frontmost view under the point wins.
//! let hit = tree.hit_test(root, Point::new(100.0, 50.0)).unwrap();
//! assert_eq!(hit.node, badge);
//!
//! // Resizing the root re-fills the bar on the next pass.
//! tree.set_size(root, Size::new(300.0, 100.0));
//! tree.layout(&mut NoHooks);
//! assert_eq!(tree.frame(bar).unwrap().width(), 280.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod layout;
mod render;
mod tree;
mod types;

pub use error::TreeError;
pub use layout::{LayoutHooks, LayoutPolicy, NoHooks};
pub use render::{ContentRenderer, Painter, RenderStats, TextureId};
pub use tree::{Hit, Tree};
pub use types::{
    Alignment, Anchor, Autoresizing, Bevel, Color, Padding, ViewFlags, ViewId, ViewProps,
};

// Re-exported so downstream crates agree on geometry types.
pub use kurbo;
