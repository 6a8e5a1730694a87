// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use arbor_view::{TreeError, ViewId};

/// Errors from window and widget operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiError {
    /// A structural tree operation failed.
    Tree(TreeError),
    /// The view is not a control.
    NotAControl(ViewId),
    /// The view is not reachable from the window's root.
    Detached(ViewId),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(err) => err.fmt(f),
            Self::NotAControl(id) => write!(f, "view {id:?} is not a control"),
            Self::Detached(id) => write!(f, "view {id:?} is not attached to the window"),
        }
    }
}

impl core::error::Error for UiError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for UiError {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}
