// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view behavior and the context it runs in.

use core::any::Any;
use core::fmt;

use arbor_view::{Painter, Tree, ViewId, ViewProps};
use hashbrown::HashMap;
use kurbo::{Rect, Size};

use crate::control::Control;
use crate::error::UiError;
use crate::event::Event;
use crate::theme::{TextMetrics, Theme};

pub(crate) type Elements = HashMap<ViewId, Box<dyn Element>>;

/// Behavior attached to a view: event handling, layout hooks, and content drawing.
///
/// Every method has a default, so a plain container implements nothing. Controls return
/// their [`Control`] from [`Element::control`] and [`Element::control_mut`].
pub trait Element: Any {
    /// The control state of this element, if it is a control.
    fn control(&self) -> Option<&Control> {
        None
    }

    /// Mutable access to the control state.
    fn control_mut(&mut self) -> Option<&mut Control> {
        None
    }

    /// Offered an event before the control's base transition.
    ///
    /// Sees the state from before the transition. Returns whether the event was consumed.
    fn handle_event(&mut self, cx: &mut UiCx<'_>, id: ViewId, event: &Event) -> bool {
        let _ = (cx, id, event);
        false
    }

    /// Window-space region in which a press highlights the control.
    fn hit_region(&self, tree: &Tree, id: ViewId) -> Option<Rect> {
        tree.render_frame(id)
    }

    /// Intrinsic size, such as measured text plus padding.
    fn size_that_fits(&self, tree: &Tree, id: ViewId, metrics: &dyn TextMetrics) -> Option<Size> {
        let _ = (tree, id, metrics);
        None
    }

    /// Space a filling `child` must leave for its siblings.
    fn fill_reservation(&self, tree: &Tree, parent: ViewId, child: ViewId) -> Size {
        let _ = (tree, parent, child);
        Size::ZERO
    }

    /// Runs after the base layout of this view's children.
    fn layout_subviews(&mut self, tree: &mut Tree, id: ViewId) {
        let _ = (tree, id);
    }

    /// Draw content above the background, border and bevel and below the children.
    fn draw_content(
        &self,
        tree: &Tree,
        id: ViewId,
        frame: Rect,
        theme: &Theme,
        painter: &mut dyn Painter,
    ) {
        let _ = (tree, id, frame, theme, painter);
    }
}

/// Context for building widgets and handling events.
///
/// While an element's hook runs, that element is not in the element map; every other
/// element is reachable through [`UiCx::element`] and [`UiCx::with_element`].
pub struct UiCx<'a> {
    /// The view tree.
    pub tree: &'a mut Tree,
    /// The window's theme.
    pub theme: &'a Theme,
    /// Text measurement.
    pub metrics: &'a dyn TextMetrics,
    pub(crate) elements: &'a mut Elements,
}

impl fmt::Debug for UiCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiCx")
            .field("tree", &self.tree)
            .field("elements", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl UiCx<'_> {
    /// Create a plain view as the last child of `parent`.
    pub fn add_view(&mut self, parent: ViewId, props: ViewProps) -> Result<ViewId, UiError> {
        Ok(self.tree.insert_child(parent, props)?)
    }

    /// Create a view with an element as the last child of `parent`.
    pub fn add_element(
        &mut self,
        parent: ViewId,
        props: ViewProps,
        element: impl Element,
    ) -> Result<ViewId, UiError> {
        let id = self.add_view(parent, props)?;
        self.elements.insert(id, Box::new(element));
        Ok(id)
    }

    /// Attach `element` to an existing view, replacing any previous one.
    pub fn attach_element(&mut self, id: ViewId, element: impl Element) -> Result<(), UiError> {
        if !self.tree.is_alive(id) {
            return Err(UiError::Tree(arbor_view::TreeError::Stale(id)));
        }
        self.elements.insert(id, Box::new(element));
        Ok(())
    }

    /// The element of `id`, if it is a `T`.
    pub fn element<T: Element>(&self, id: ViewId) -> Option<&T> {
        downcast_ref(&*self.elements, id)
    }

    /// Run `f` on the element of `id` if it is a `T`, with the tree alongside.
    pub fn with_element<T: Element, R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut T, &mut Tree) -> R,
    ) -> Option<R> {
        let element = downcast_mut::<T>(&mut *self.elements, id)?;
        Some(f(element, self.tree))
    }
}

pub(crate) fn downcast_ref<T: Element>(elements: &Elements, id: ViewId) -> Option<&T> {
    let element: &dyn Any = &**elements.get(&id)?;
    element.downcast_ref()
}

pub(crate) fn downcast_mut<T: Element>(elements: &mut Elements, id: ViewId) -> Option<&mut T> {
    let element: &mut dyn Any = &mut **elements.get_mut(&id)?;
    element.downcast_mut()
}
