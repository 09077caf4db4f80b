/*
 * Item container: the hit-testable wrapper for one strip slot.
 *
 * A container hosts at most one content view (the item's own view or the shared
 * overflow view), sizes it to its bounds minus the view's insets, and turns raw
 * interaction phases into requests for the strip that created it. The container keeps
 * only its owner's `StripId`, so a request from a container that outlived its strip is
 * recognised as coming from an unknown sender.
 */

use crate::controls::content_view::ContentView;
use crate::types::{
    ContainerAction, ContainerEvent, ContainerTag, InteractionRequest, Point, Rect, StripId,
};

/// Interaction phases map onto three strip requests: press and drag-back-in highlight,
/// drag-out and cancel dehighlight, release inside selects.
pub fn request_for_event(event: ContainerEvent) -> InteractionRequest {
    match event {
        ContainerEvent::TouchDown | ContainerEvent::TouchDragEnter => InteractionRequest::Highlight,
        ContainerEvent::TouchDragExit | ContainerEvent::TouchCancel => {
            InteractionRequest::Dehighlight
        }
        ContainerEvent::TouchUpInside => InteractionRequest::Select,
    }
}

#[derive(Debug)]
pub struct ItemContainer {
    owner: StripId,
    tag: ContainerTag,
    frame: Rect,
    hidden: bool,
    content: Option<ContentView>,
}

impl ItemContainer {
    pub(crate) fn new(owner: StripId, tag: ContainerTag) -> Self {
        Self {
            owner,
            tag,
            frame: Rect::ZERO,
            hidden: false,
            content: None,
        }
    }

    pub fn tag(&self) -> ContainerTag {
        self.tag
    }

    pub fn owner(&self) -> StripId {
        self.owner
    }

    /// Frame in strip coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn content(&self) -> Option<&ContentView> {
        self.content.as_ref()
    }

    /// Replaces the hosted view. Returns true when the child actually changed.
    pub(crate) fn attach(&mut self, view: Option<ContentView>) -> bool {
        let unchanged = match (&self.content, &view) {
            (Some(current), Some(next)) => current.ptr_eq(next),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }
        log::trace!(
            "[ItemContainer] {} child {} -> {}",
            self.tag.raw(),
            if self.content.is_some() { "view" } else { "none" },
            if view.is_some() { "view" } else { "none" },
        );
        self.content = view;
        self.layout_content();
        true
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.layout_content();
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn layout_content(&self) {
        if let Some(view) = &self.content {
            view.set_frame(self.frame.bounds().inset_by(view.insets()));
        }
    }

    /// `point` is in container coordinates. Points outside the container still count
    /// when they land inside the hosted view's own hit area.
    pub fn point_inside(&self, point: Point) -> bool {
        if self.frame.bounds().contains(point) {
            return true;
        }
        self.content
            .as_ref()
            .is_some_and(|view| view.point_inside(point.relative_to(view.frame().origin())))
    }

    /// Tags the request produced by `event` with this container's identity.
    pub fn handle_event(&self, event: ContainerEvent) -> ContainerAction {
        log::trace!("[ItemContainer] {} received {event:?}", self.tag.raw());
        ContainerAction {
            owner: self.owner,
            tag: self.tag,
            request: request_for_event(event),
        }
    }
}
