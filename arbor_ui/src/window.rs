// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame integration of tree, router, controls and actions.
//!
//! A [`Window`] owns the view tree and the elements attached to its views. Each host tick
//! feeds it events, then lays out and paints:
//!
//! ```text
//! events ─▶ route (hit test / capture / first responder) ─▶ offer along the chain
//!        ─▶ layout (dirty views only) ─▶ render (painter)
//! ```

use core::any::Any;
use core::fmt;

use arbor_responder::adapters::view_tree::{ViewTreeLookup, hit_path};
use arbor_responder::dispatcher;
use arbor_responder::router::Router;
use arbor_responder::types::Outcome;
use arbor_view::{
    Color, ContentRenderer, LayoutHooks, Painter, RenderStats, Tree, ViewId, ViewProps,
};
use kurbo::{Point, Rect, Size};

use crate::action::{ActionCx, ActionReport};
use crate::control::{Control, ControlState};
use crate::element::{Element, Elements, UiCx, downcast_ref};
use crate::error::UiError;
use crate::event::Event;
use crate::theme::{TextMetrics, Theme};

/// What happened to one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventReport {
    /// The first view the event was offered to.
    pub target: Option<ViewId>,
    /// The view that consumed it.
    pub consumed_by: Option<ViewId>,
    /// Action callbacks fired while handling it.
    pub actions: ActionReport,
}

impl EventReport {
    /// Whether some view consumed the event.
    pub fn consumed(&self) -> bool {
        self.consumed_by.is_some()
    }
}

/// A window: the content view, its subtree, the attached elements, and the responder state.
pub struct Window {
    tree: Tree,
    root: ViewId,
    elements: Elements,
    router: Router<ViewId>,
    theme: Theme,
    metrics: Box<dyn TextMetrics>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("root", &self.root)
            .field("views", &self.tree.len())
            .field("elements", &self.elements.len())
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Create a window of `size` whose content view fills it.
    pub fn new(
        theme: Theme,
        size: Size,
        metrics: impl TextMetrics + 'static,
    ) -> Result<Self, UiError> {
        let mut tree = Tree::with_policy(theme.layout);
        let root = tree.insert(ViewProps {
            background: theme.background,
            ..ViewProps::with_frame(Rect::from_origin_size(Point::ORIGIN, size))
        })?;
        Ok(Self {
            tree,
            root,
            elements: Elements::default(),
            router: Router::new(),
            theme,
            metrics: Box::new(metrics),
        })
    }

    /// The content view.
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// The view tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// A build context for adding widgets.
    pub fn cx(&mut self) -> UiCx<'_> {
        UiCx {
            tree: &mut self.tree,
            theme: &self.theme,
            metrics: &*self.metrics,
            elements: &mut self.elements,
        }
    }

    /// Create a plain view as the last child of `parent`.
    pub fn add_view(&mut self, parent: ViewId, props: ViewProps) -> Result<ViewId, UiError> {
        self.cx().add_view(parent, props)
    }

    /// Attach `element` to the existing view `id`.
    pub fn insert_element(&mut self, id: ViewId, element: impl Element) -> Result<(), UiError> {
        self.cx().attach_element(id, element)
    }

    /// Attach the detached view `child` as the last child of `parent`.
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> Result<(), UiError> {
        Ok(self.tree.add_child(parent, child)?)
    }

    /// Detach `id` from its parent. The subtree stays alive and may be re-attached.
    ///
    /// Pointer capture and first responder held inside the subtree are dropped first.
    pub fn remove_from_parent(&mut self, id: ViewId) -> Option<ViewId> {
        self.forget_subtree(id);
        self.tree.remove_from_parent(id)
    }

    /// Destroy `id` and its subtree along with their elements. Returns how many views died.
    pub fn destroy(&mut self, id: ViewId) -> usize {
        self.forget_subtree(id);
        let freed = self.tree.destroy(id);
        for view in &freed {
            self.elements.remove(view);
        }
        freed.len()
    }

    /// Move `id` to the front of its siblings.
    pub fn bring_to_front(&mut self, id: ViewId) -> bool {
        self.tree.bring_to_front(id)
    }

    /// Move `id` to the back of its siblings.
    pub fn send_to_back(&mut self, id: ViewId) -> bool {
        self.tree.send_to_back(id)
    }

    fn forget_subtree(&mut self, id: ViewId) {
        let tree = &self.tree;
        self.router
            .forget(|node| *node == id || tree.is_ancestor(id, *node));
    }

    /// Route keyboard events to `id`, or to nobody.
    ///
    /// `id` must be an attached control.
    pub fn set_first_responder(&mut self, id: Option<ViewId>) -> Result<(), UiError> {
        if let Some(id) = id {
            if !self.tree.is_within(id, self.root) {
                return Err(UiError::Detached(id));
            }
            if self.control(id).is_none() {
                return Err(UiError::NotAControl(id));
            }
        }
        self.router.set_first_responder(id);
        Ok(())
    }

    /// The view receiving keyboard events.
    pub fn first_responder(&self) -> Option<ViewId> {
        self.router.first_responder()
    }

    /// The control holding the pointer capture.
    pub fn captured(&self) -> Option<ViewId> {
        self.router.captured()
    }

    /// Enable or disable the control `id`. Returns whether its state changed.
    ///
    /// Disabling drops the highlight and releases the pointer capture if the control held it.
    pub fn set_enabled(&mut self, id: ViewId, enabled: bool) -> Result<bool, UiError> {
        let control = self.control_mut(id).ok_or(UiError::NotAControl(id))?;
        let changed = control.set_enabled(enabled);
        if !enabled && self.router.captured() == Some(id) {
            self.router.release_capture();
        }
        Ok(changed)
    }

    /// Control state of `id`, if it is a control.
    pub fn state(&self, id: ViewId) -> Option<ControlState> {
        self.control(id).map(Control::state)
    }

    /// The control of `id`.
    pub fn control(&self, id: ViewId) -> Option<&Control> {
        self.elements.get(&id)?.control()
    }

    /// Mutable access to the control of `id`, for example to bind actions.
    pub fn control_mut(&mut self, id: ViewId) -> Option<&mut Control> {
        self.elements.get_mut(&id)?.control_mut()
    }

    /// The element of `id`, if it is a `T`.
    pub fn element<T: Element>(&self, id: ViewId) -> Option<&T> {
        downcast_ref(&self.elements, id)
    }

    /// Run `f` on the element of `id` if it is a `T`, with a full context alongside.
    ///
    /// The element is out of the element map while `f` runs.
    pub fn update<T: Element, R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut T, &mut UiCx<'_>) -> R,
    ) -> Option<R> {
        let mut element = self.elements.remove(&id)?;
        let any: &mut dyn Any = &mut *element;
        let result = match any.downcast_mut::<T>() {
            Some(typed) => {
                let mut cx = UiCx {
                    tree: &mut self.tree,
                    theme: &self.theme,
                    metrics: &*self.metrics,
                    elements: &mut self.elements,
                };
                Some(f(typed, &mut cx))
            }
            None => None,
        };
        self.restore(id, element);
        result
    }

    /// Put a taken element back, unless its view died while the element was out.
    fn restore(&mut self, id: ViewId, element: Box<dyn Element>) {
        if self.tree.is_alive(id) {
            self.elements.insert(id, element);
            return;
        }
        // A hook destroyed views through the tree directly; drop their elements too.
        self.prune_dead_elements();
    }

    fn prune_dead_elements(&mut self) {
        let tree = &self.tree;
        self.elements.retain(|view, _| tree.is_alive(*view));
    }

    /// Window-space frame of `id` from the last layout or render.
    pub fn render_frame(&self, id: ViewId) -> Option<Rect> {
        self.tree.render_frame(id)
    }

    /// The frontmost pickable view under `pt`.
    pub fn hit_test(&self, pt: Point) -> Option<ViewId> {
        self.tree.hit_test(self.root, pt).map(|hit| hit.node)
    }

    /// Route one event and offer it along its chain until a view consumes it.
    ///
    /// Pointer events are laid out against current geometry first, so hit testing sees what
    /// the next render will draw.
    pub fn handle_event(&mut self, event: &Event) -> EventReport {
        let seq = match event {
            Event::WindowResize(resize) => {
                self.tree.set_size(self.root, resize.size);
                return EventReport::default();
            }
            Event::PointerDown(pointer) | Event::PointerUp(pointer) | Event::PointerMove(pointer) => {
                self.layout();
                // The control may have been disabled through `control_mut`.
                if let Some(captured) = self.router.captured()
                    && self.control(captured).is_some_and(|c| !c.is_enabled())
                {
                    tracing::debug!(control = ?captured, "captured control is disabled; releasing");
                    self.router.release_capture();
                }
                let path = hit_path(&self.tree, self.root, pointer.position);
                let lookup = ViewTreeLookup::new(&self.tree, self.root);
                self.router.route_pointer(&path, &lookup)
            }
            Event::KeyDown(_) | Event::KeyUp(_) | Event::TextInput(_) => {
                let lookup = ViewTreeLookup::new(&self.tree, self.root);
                self.router.route_keyboard(&lookup)
            }
        };

        let mut report = EventReport {
            target: seq.first().map(|d| d.node),
            ..Default::default()
        };
        let consumed = dispatcher::run(&seq, &mut report.actions, |d, actions| {
            if self.offer(d.node, event, actions) {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        report.consumed_by = consumed.map(|d| d.node);

        match event {
            Event::PointerDown(_) => {
                if let Some(id) = report.consumed_by {
                    if self.control(id).is_some_and(Control::is_enabled) {
                        let lookup = ViewTreeLookup::new(&self.tree, self.root);
                        self.router.capture(id, &lookup);
                    }
                }
            }
            Event::PointerUp(_) => {
                self.router.release_capture();
            }
            _ => {}
        }
        tracing::trace!(kind = ?event.kind(), ?report, "event handled");
        report
    }

    /// Offer `event` to the element of `id`. Returns whether it was consumed.
    ///
    /// Order: the element's hook, the control's base transition, then its actions.
    /// Disabled controls are skipped so the event bubbles past them.
    fn offer(&mut self, id: ViewId, event: &Event, actions: &mut ActionReport) -> bool {
        let Some(mut element) = self.elements.remove(&id) else {
            return false;
        };
        if element.control().is_some_and(|c| !c.is_enabled()) {
            self.elements.insert(id, element);
            return false;
        }

        let mut cx = UiCx {
            tree: &mut self.tree,
            theme: &self.theme,
            metrics: &*self.metrics,
            elements: &mut self.elements,
        };
        let mut consumed = element.handle_event(&mut cx, id, event);

        if self.tree.is_alive(id) {
            let inside = event.position().is_some_and(|pt| {
                element
                    .hit_region(&self.tree, id)
                    .is_some_and(|region| region.contains(pt))
            });
            if let Some(control) = element.control_mut() {
                consumed |= control.transition(event, inside);
                if consumed {
                    let mut cx = ActionCx {
                        control: id,
                        sender: id,
                        state: control.state(),
                        event,
                        tree: &mut self.tree,
                    };
                    actions.merge(control.actions.dispatch(&mut cx));
                }
            }
        }

        self.restore(id, element);
        consumed
    }

    /// Lay out every dirty view and refresh render frames.
    pub fn layout(&mut self) {
        let mut hooks = ElementHooks {
            elements: &mut self.elements,
            metrics: &*self.metrics,
        };
        self.tree.layout(&mut hooks);
        self.prune_dead_elements();
    }

    /// Fit `id` to its content now.
    pub fn size_to_fit(&mut self, id: ViewId) {
        let mut hooks = ElementHooks {
            elements: &mut self.elements,
            metrics: &*self.metrics,
        };
        self.tree.size_to_fit(id, &mut hooks);
        self.prune_dead_elements();
    }

    /// Paint the window.
    pub fn render(&mut self, painter: &mut dyn Painter) -> RenderStats {
        let mut content = ElementRenderer {
            elements: &self.elements,
            theme: &self.theme,
        };
        self.tree.render(self.root, &mut content, painter)
    }

    /// One host tick: handle `events` in order, lay out, then paint.
    pub fn frame<'e>(
        &mut self,
        events: impl IntoIterator<Item = &'e Event>,
        painter: &mut dyn Painter,
    ) -> RenderStats {
        for event in events {
            self.handle_event(event);
        }
        self.layout();
        self.render(painter)
    }
}

struct ElementHooks<'a> {
    elements: &'a mut Elements,
    metrics: &'a dyn TextMetrics,
}

impl LayoutHooks for ElementHooks<'_> {
    fn size_that_fits(&mut self, tree: &Tree, id: ViewId) -> Option<Size> {
        self.elements.get(&id)?.size_that_fits(tree, id, self.metrics)
    }

    fn fill_reservation(&mut self, tree: &Tree, parent: ViewId, child: ViewId) -> Size {
        self.elements
            .get(&parent)
            .map_or(Size::ZERO, |e| e.fill_reservation(tree, parent, child))
    }

    fn layout_subviews(&mut self, tree: &mut Tree, id: ViewId) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.layout_subviews(tree, id);
        }
    }
}

struct ElementRenderer<'a> {
    elements: &'a Elements,
    theme: &'a Theme,
}

impl ContentRenderer for ElementRenderer<'_> {
    fn draw_content(&mut self, tree: &Tree, id: ViewId, frame: Rect, painter: &mut dyn Painter) {
        if let Some(element) = self.elements.get(&id) {
            element.draw_content(tree, id, frame, self.theme, painter);
        }
    }

    fn bevel_colors(&self) -> (Color, Color) {
        (self.theme.bevel_light, self.theme.bevel_dark)
    }
}
