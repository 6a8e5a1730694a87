// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: offer an event along a sequence until someone consumes it.
//!
//! - [`Outcome::Continue`] offers the event to the next entry.
//! - [`Outcome::Stop`] marks the event consumed and ends propagation.
//! - The return value of [`run`] reports the consuming entry, if any.
//!
//! Anything richer (what the handler did, which actions fired) lives on the event payload
//! you pass to [`run`].
//!
//! ## Example
//!
//! ```
//! use arbor_responder::dispatcher;
//! use arbor_responder::types::{Dispatch, Outcome, Phase};
//! #[derive(Copy, Clone, Debug)] struct Node(u32);
//!
//! // Target 3 inside 2 inside 1.
//! let seq = [
//!     Dispatch::target(Node(3)),
//!     Dispatch::bubble(Node(2)),
//!     Dispatch::bubble(Node(1)),
//! ];
//!
//! // Node 2 handles the event; the root never sees it.
//! let mut seen: Vec<u32> = Vec::new();
//! let consumed = dispatcher::run(&seq, &mut seen, |d, seen| {
//!     seen.push(d.node.0);
//!     if d.node.0 == 2 { Outcome::Stop } else { Outcome::Continue }
//! });
//!
//! assert_eq!(consumed.map(|d| d.phase), Some(Phase::Bubble));
//! assert_eq!(seen, vec![3, 2]);
//! ```

use crate::types::{Dispatch, Outcome};

/// Run `handler` over `seq` in order until it returns [`Outcome::Stop`].
///
/// Returns the entry that stopped propagation, or `None` if every entry was visited.
pub fn run<'a, K, E>(
    seq: &'a [Dispatch<K>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}
