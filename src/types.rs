/*
 * Platform-agnostic types shared by the strip, its containers and the host bridge:
 * geometry, identifiers, tab items, and the interaction events containers emit.
 * Geometry follows the host convention of origin at top-left with y growing down.
 */

use crate::controls::content_view::ContentView;

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Expresses `self` relative to `origin`.
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered_at(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The same size anchored at the origin, i.e. a frame seen from inside.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Half-open containment: left/top edges are inside, right/bottom edges are not.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Shrinks the rectangle by `insets`. Negative insets grow it.
    pub fn inset_by(&self, insets: EdgeInsets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            self.width - insets.left - insets.right,
            self.height - insets.top - insets.bottom,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets { top: 0.0, left: 0.0, bottom: 0.0, right: 0.0 };

    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Offset {
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self { horizontal, vertical }
    }
}

/// First container tag. Tags above this value never collide with host-native views
/// sharing the strip.
pub const CONTAINER_TAG_BASE: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerTag(i32);

impl ContainerTag {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub fn from_index(index: usize) -> Self {
        Self(CONTAINER_TAG_BASE + index as i32)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Slot index encoded by the tag. Tags below the base map to slot 0.
    pub fn index(self) -> usize {
        self.0.saturating_sub(CONTAINER_TAG_BASE).max(0) as usize
    }
}

static NEXT_STRIP_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a strip instance. Containers hold their owner's id instead of a
/// reference, so an event can always be checked against the strip receiving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StripId(u64);

impl StripId {
    pub(crate) fn next() -> Self {
        Self(NEXT_STRIP_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One slot of the strip as supplied by the host. Identity is the position in the
/// list handed to `TabStrip::set_items`.
#[derive(Debug, Clone)]
pub struct TabItem {
    pub enabled: bool,
    /// Items without a content view are drawn by the host's native button.
    pub content_view: Option<ContentView>,
}

impl TabItem {
    pub fn new(content_view: ContentView) -> Self {
        Self {
            enabled: true,
            content_view: Some(content_view),
        }
    }

    /// An item left entirely to the host's native rendering.
    pub fn native() -> Self {
        Self {
            enabled: true,
            content_view: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Raw interaction phases a container reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEvent {
    TouchDown,
    TouchDragEnter,
    TouchDragExit,
    TouchUpInside,
    TouchCancel,
}

/// What a container asks of its strip after an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionRequest {
    Highlight,
    Dehighlight,
    Select,
}

/// A request forwarded from a container to the strip that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerAction {
    pub owner: StripId,
    pub tag: ContainerTag,
    pub request: InteractionRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_containment_is_half_open() {
        let rect = Rect::new(10.0, 0.0, 50.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 0.0)));
        assert!(rect.contains(Point::new(59.9, 19.9)));
        assert!(!rect.contains(Point::new(60.0, 5.0)));
        assert!(!rect.contains(Point::new(30.0, 20.0)));
        assert!(!rect.contains(Point::new(9.9, 5.0)));
    }

    #[test]
    fn negative_insets_grow_the_rect() {
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0).inset_by(EdgeInsets::uniform(-5.0));
        assert_eq!(rect, Rect::new(-5.0, -5.0, 50.0, 50.0));
    }

    #[test]
    fn container_tags_round_trip_indices_and_clamp_low_values() {
        assert_eq!(ContainerTag::from_index(3).raw(), 1003);
        assert_eq!(ContainerTag::from_index(3).index(), 3);
        assert_eq!(ContainerTag::new(17).index(), 0);
        assert_eq!(ContainerTag::new(i32::MIN).index(), 0);
        assert_eq!(ContainerTag::new(i32::MAX).index(), (i32::MAX - 1000) as usize);
    }

    #[test]
    fn strip_ids_are_unique() {
        let a = StripId::next();
        let b = StripId::next();
        assert_ne!(a, b);
    }
}
