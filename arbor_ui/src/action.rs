// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action registry: callbacks bound to a control by event kind.

use core::fmt;
use std::panic::{self, AssertUnwindSafe};

use arbor_view::{Tree, ViewId};
use hashbrown::HashMap;

use crate::control::ControlState;
use crate::event::{Event, EventKind, KeyCode};

/// Narrows which events of a kind fire a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionFilter {
    /// Every event of the kind.
    Any,
    /// Pointer events with this button.
    Button(u8),
    /// Key events with this key.
    Key(KeyCode),
}

impl ActionFilter {
    /// Whether `event` passes the filter.
    pub fn matches(self, event: &Event) -> bool {
        match self {
            Self::Any => true,
            Self::Button(button) => event.pointer().is_some_and(|p| p.button == button),
            Self::Key(key) => event.key().is_some_and(|k| k.key == key),
        }
    }
}

/// Handle to a registered binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionId(u32);

/// A failure reported by an action callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionError {
    message: String,
}

impl ActionError {
    /// An error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action failed: {}", self.message)
    }
}

impl core::error::Error for ActionError {}

/// Context passed to an action callback.
#[derive(Debug)]
pub struct ActionCx<'a> {
    /// The control whose binding fired.
    pub control: ViewId,
    /// The sender recorded when the binding was added, or the control itself.
    pub sender: ViewId,
    /// The control state after the event was processed.
    pub state: ControlState,
    /// The triggering event.
    pub event: &'a Event,
    /// The view tree, for marking views dirty or changing geometry.
    pub tree: &'a mut Tree,
}

/// Callback type for actions. User data is captured by the closure.
pub type ActionFn = Box<dyn FnMut(&mut ActionCx<'_>) -> Result<(), ActionError>>;

struct Binding {
    id: ActionId,
    filter: ActionFilter,
    sender: Option<ViewId>,
    callback: ActionFn,
}

/// Read-only view of a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindingInfo {
    /// The binding handle.
    pub id: ActionId,
    /// Its filter.
    pub filter: ActionFilter,
    /// Its sender.
    pub sender: Option<ViewId>,
}

/// Outcome of dispatching one event to a registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Callbacks that ran and succeeded.
    pub invoked: usize,
    /// Callbacks that returned an error or panicked.
    pub failed: usize,
}

impl ActionReport {
    /// Add another report's counts to this one.
    pub fn merge(&mut self, other: Self) {
        self.invoked += other.invoked;
        self.failed += other.failed;
    }
}

/// Bindings of a control, grouped by event kind and kept in insertion order.
///
/// The same callback may be bound more than once; each binding fires.
#[derive(Default)]
pub struct ActionRegistry {
    bindings: HashMap<EventKind, Vec<Binding>>,
    next_id: u32,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.bindings.values().map(Vec::len).sum();
        f.debug_struct("ActionRegistry")
            .field("bindings", &total)
            .finish_non_exhaustive()
    }
}

impl ActionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `callback` to events of `kind` that pass `filter`.
    pub fn add(
        &mut self,
        kind: EventKind,
        filter: ActionFilter,
        sender: Option<ViewId>,
        callback: impl FnMut(&mut ActionCx<'_>) -> Result<(), ActionError> + 'static,
    ) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.bindings.entry(kind).or_default().push(Binding {
            id,
            filter,
            sender,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a binding. Returns whether it existed.
    pub fn remove(&mut self, id: ActionId) -> bool {
        for list in self.bindings.values_mut() {
            if let Some(pos) = list.iter().position(|b| b.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Remove every binding for `kind`. Returns how many were removed.
    pub fn remove_all(&mut self, kind: EventKind) -> usize {
        self.bindings.remove(&kind).map_or(0, |list| list.len())
    }

    /// Bindings for `kind`, in firing order.
    pub fn bindings(&self, kind: EventKind) -> impl Iterator<Item = BindingInfo> + '_ {
        self.bindings.get(&kind).into_iter().flatten().map(|b| BindingInfo {
            id: b.id,
            filter: b.filter,
            sender: b.sender,
        })
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.values().all(Vec::is_empty)
    }

    /// Fire every binding matching `cx.event`, in insertion order.
    ///
    /// A failing or panicking callback is logged and counted as failed; the rest still run.
    /// A callback that panics after mutating `cx.tree` leaves those mutations in place.
    pub fn dispatch(&mut self, cx: &mut ActionCx<'_>) -> ActionReport {
        let mut report = ActionReport::default();
        let Some(list) = self.bindings.get_mut(&cx.event.kind()) else {
            return report;
        };
        for binding in list.iter_mut() {
            if !binding.filter.matches(cx.event) {
                continue;
            }
            cx.sender = binding.sender.unwrap_or(cx.control);
            let callback = &mut binding.callback;
            match panic::catch_unwind(AssertUnwindSafe(|| callback(cx))) {
                Ok(Ok(())) => report.invoked += 1,
                Ok(Err(error)) => {
                    tracing::warn!(control = ?cx.control, action = ?binding.id, %error, "action callback failed");
                    report.failed += 1;
                }
                Err(_) => {
                    tracing::warn!(control = ?cx.control, action = ?binding.id, "action callback panicked");
                    report.failed += 1;
                }
            }
        }
        report
    }
}
