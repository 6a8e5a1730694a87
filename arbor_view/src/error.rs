// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors reported by tree mutations.

use core::fmt;

use crate::types::ViewId;

/// A rejected tree mutation. The tree is unchanged when one of these is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The id does not refer to a live view.
    Stale(ViewId),
    /// The child already has a parent and must be detached first.
    AlreadyAttached {
        /// The view that was being attached.
        child: ViewId,
        /// Its current parent.
        parent: ViewId,
    },
    /// Attaching would make a view its own ancestor.
    Cycle {
        /// The prospective parent.
        parent: ViewId,
        /// The view that is `parent` or one of its ancestors.
        child: ViewId,
    },
    /// Storage for a new view could not be allocated.
    Exhausted,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stale(id) => write!(f, "view {id:?} is not alive"),
            Self::AlreadyAttached { child, parent } => {
                write!(f, "view {child:?} is already attached to {parent:?}")
            }
            Self::Cycle { parent, child } => {
                write!(f, "attaching {child:?} to {parent:?} would create a cycle")
            }
            Self::Exhausted => f.write_str("out of memory allocating a view"),
        }
    }
}

impl core::error::Error for TreeError {}
