// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: identifiers, flags, and per-view geometry and style.

use kurbo::{Point, Rect, Size};

/// Identifier for a view in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On [`destroy`](crate::Tree::destroy), the slot is freed; any existing `ViewId` that pointed
///   to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ViewId`.
///
/// Detaching a view from its parent does not free it; the id stays live until destroyed.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `ViewId` still refers to a
/// live view. Stale `ViewId`s never alias a different live view because the generation must match.
/// This is what makes `ViewId` usable as a non-owning back-reference: holders validate on use.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u32, pub(crate) u32);

impl ViewId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index, useful for debugging output.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Generation of the slot this id was issued for.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// View flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// View is visible. Hidden views and their subtrees are neither painted nor hit-tested.
        const VISIBLE  = 0b0000_0001;
        /// View may itself be a hit target. Children of a non-pickable view remain hit-testable.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

bitflags::bitflags! {
    /// How a view's size follows its parent (fill) or its children (contain).
    ///
    /// Fill takes precedence over contain on the same axis.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Autoresizing: u8 {
        /// Width tracks the parent's content width, minus any sibling reservation.
        const FILL_WIDTH     = 0b0000_0001;
        /// Height tracks the parent's content height, minus any sibling reservation.
        const FILL_HEIGHT    = 0b0000_0010;
        /// Width grows to the union of the children's frames plus padding.
        const CONTAIN_WIDTH  = 0b0000_0100;
        /// Height grows to the union of the children's frames plus padding.
        const CONTAIN_HEIGHT = 0b0000_1000;
        /// Fill both axes.
        const FILL = Self::FILL_WIDTH.bits() | Self::FILL_HEIGHT.bits();
        /// Contain both axes.
        const CONTAIN = Self::CONTAIN_WIDTH.bits() | Self::CONTAIN_HEIGHT.bits();
    }
}

impl Autoresizing {
    /// Whether the width is derived from the children.
    pub fn contains_width(self) -> bool {
        self.contains(Self::CONTAIN_WIDTH) && !self.contains(Self::FILL_WIDTH)
    }

    /// Whether the height is derived from the children.
    pub fn contains_height(self) -> bool {
        self.contains(Self::CONTAIN_HEIGHT) && !self.contains(Self::FILL_HEIGHT)
    }

    /// Whether any axis is content-driven.
    pub fn is_content_sized(self) -> bool {
        self.contains_width() || self.contains_height()
    }
}

/// Insets between a view's frame and its content area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Left inset.
    pub left: f64,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same inset on every side.
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Sum of the left and right insets.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// The content rectangle of a view of `size`, in the view's own coordinates.
    ///
    /// Dimensions clamp at zero when the padding exceeds the size.
    pub fn content_rect(&self, size: Size) -> Rect {
        let width = (size.width - self.horizontal()).max(0.0);
        let height = (size.height - self.vertical()).max(0.0);
        Rect::from_origin_size(Point::new(self.left, self.top), Size::new(width, height))
    }
}

/// Anchor along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Left or top edge.
    Start,
    /// Centered.
    Center,
    /// Right or bottom edge.
    End,
}

impl Anchor {
    /// Offset of a box of `extent` anchored inside `available`.
    pub fn offset(self, available: f64, extent: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => (available - extent) * 0.5,
            Self::End => available - extent,
        }
    }
}

/// Placement of a view inside its parent's content rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// The frame origin is authoritative.
    #[default]
    None,
    /// Top-left corner.
    TopLeft,
    /// Top edge, centered horizontally.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Left edge, centered vertically.
    MiddleLeft,
    /// Centered on both axes.
    MiddleCenter,
    /// Right edge, centered vertically.
    MiddleRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge, centered horizontally.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Alignment {
    /// Horizontal anchor, if aligned.
    pub fn horizontal(self) -> Option<Anchor> {
        match self {
            Self::None => None,
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => Some(Anchor::Start),
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => Some(Anchor::Center),
            Self::TopRight | Self::MiddleRight | Self::BottomRight => Some(Anchor::End),
        }
    }

    /// Vertical anchor, if aligned.
    pub fn vertical(self) -> Option<Anchor> {
        match self {
            Self::None => None,
            Self::TopLeft | Self::TopCenter | Self::TopRight => Some(Anchor::Start),
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => Some(Anchor::Center),
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Some(Anchor::End),
        }
    }
}

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; `0` is fully transparent.
    pub a: u8,
}

impl Color {
    /// Fully transparent.
    pub const CLEAR: Self = Self::rgba8(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb8(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb8(0, 0, 0);
    /// Opaque gray.
    pub const GRAY: Self = Self::rgb8(128, 128, 128);
    /// Opaque dim gray.
    pub const DIM_GRAY: Self = Self::rgb8(105, 105, 105);
    /// Opaque red.
    pub const RED: Self = Self::rgb8(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb8(0, 255, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb8(0, 0, 255);

    /// An opaque color.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// A color with alpha.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether painting this color has no effect.
    pub const fn is_clear(self) -> bool {
        self.a == 0
    }
}

/// Decorative edge shading. Never affects layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Bevel {
    /// No bevel.
    #[default]
    None,
    /// Light bottom/right edges, dark top/left edges: pressed in.
    Inset,
    /// Light top/left edges, dark bottom/right edges: raised.
    Outset,
}

/// Per-view geometry and style.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewProps {
    /// Position and size relative to the parent's frame origin.
    pub frame: Rect,
    /// Insets of the content area.
    pub padding: Padding,
    /// Placement within the parent's content rectangle.
    pub alignment: Alignment,
    /// Fill/contain behavior.
    pub autoresizing: Autoresizing,
    /// Visibility and picking flags.
    pub flags: ViewFlags,
    /// Background fill; clear draws nothing.
    pub background: Color,
    /// Border stroke color.
    pub border_color: Color,
    /// Border stroke width; `0` draws nothing.
    pub border_width: f64,
    /// Edge shading.
    pub bevel: Bevel,
}

impl Default for ViewProps {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            padding: Padding::ZERO,
            alignment: Alignment::None,
            autoresizing: Autoresizing::empty(),
            flags: ViewFlags::default(),
            background: Color::CLEAR,
            border_color: Color::CLEAR,
            border_width: 0.0,
            bevel: Bevel::None,
        }
    }
}

impl ViewProps {
    /// Default props with the given frame.
    pub fn with_frame(frame: Rect) -> Self {
        Self {
            frame,
            ..Default::default()
        }
    }

    /// Whether the view is hidden.
    pub fn is_hidden(&self) -> bool {
        !self.flags.contains(ViewFlags::VISIBLE)
    }
}
