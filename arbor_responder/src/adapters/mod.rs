// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Arbor crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "view_tree_adapter")]
pub mod view_tree;
