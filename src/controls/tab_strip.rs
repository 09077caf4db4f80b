/*
 * Tab strip: owns the ordered items, one container per item, and the selection state.
 *
 * Replacing the items rebuilds every container from scratch and marks the strip for
 * layout. A layout pass re-evaluates the overflow slot, decides which native buttons
 * and containers are visible, and positions the containers.
 *
 * Interaction requests coming back from containers run through the same guard: the
 * item must exist, be enabled and be accepted by the delegate's `should_select`. A
 * select request may then be hijacked by the delegate, in which case the tap is only
 * acknowledged visually and the recorded selection stays as it was.
 *
 * The delegate is held weakly. When it has gone away the strip behaves as if every
 * policy question got its default answer.
 */

use crate::controls::content_view::{Completion, ContentView};
use crate::controls::item_container::ItemContainer;
use crate::controls::positioning::{self, PositioningConfig};
use crate::error::{Result as StripResult, StripError, report};
use crate::styling_primitives::TextMeasurer;
use crate::types::{
    ContainerAction, ContainerEvent, ContainerTag, InteractionRequest, Point, Rect, Size, StripId,
    TabItem,
};

use std::rc::{Rc, Weak};

/// Host policy and notifications consulted by the strip.
pub trait StripDelegate {
    fn should_select(&self, index: usize, item: &TabItem) -> bool {
        let _ = (index, item);
        true
    }

    /// Return true to consume the tap instead of selecting the item.
    fn should_hijack(&self, index: usize, item: &TabItem) -> bool {
        let _ = (index, item);
        false
    }

    fn did_hijack(&self, index: usize, item: &TabItem) {
        let _ = (index, item);
    }

    /// A different item became selected. `overflow` is true for the overflow slot.
    fn did_select(&self, index: usize, overflow: bool) {
        let _ = (index, overflow);
    }

    /// The already-selected item was tapped again.
    fn did_reselect(&self, index: usize, animated: bool) {
        let _ = (index, animated);
    }

    /// Whether the host is currently showing its overflow page. Asked on every layout
    /// pass and every selection, never cached.
    fn is_overflow_active(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabStripConfig {
    pub positioning: PositioningConfig,
    /// Install the default overflow ("More") content view.
    pub show_overflow_view: bool,
}

impl Default for TabStripConfig {
    fn default() -> Self {
        Self {
            positioning: PositioningConfig::default(),
            show_overflow_view: true,
        }
    }
}

/// One entry of the native button registry. The host supplies frames; the strip
/// decides visibility.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NativeButton {
    pub frame: Rect,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected { previous: Option<usize> },
    Reselected,
    Hijacked,
    Denied,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    Applied,
    Selection(SelectOutcome),
    Denied,
    Disabled,
}

#[derive(Debug, Clone, Copy)]
struct PointerTrack {
    tag: ContainerTag,
    inside: bool,
}

pub struct TabStrip {
    id: StripId,
    items: Vec<TabItem>,
    containers: Vec<ItemContainer>,
    native_buttons: Vec<NativeButton>,
    config: TabStripConfig,
    overflow_view: Option<ContentView>,
    customizing: bool,
    bounds: Size,
    selected_index: Option<usize>,
    needs_layout: bool,
    delegate: Option<Weak<dyn StripDelegate>>,
    pointer: Option<PointerTrack>,
    measurer: Option<Rc<dyn TextMeasurer>>,
}

impl std::fmt::Debug for TabStrip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabStrip")
            .field("id", &self.id)
            .field("items", &self.items.len())
            .field("selected_index", &self.selected_index)
            .field("customizing", &self.customizing)
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new(TabStripConfig::default())
    }
}

impl TabStrip {
    pub fn new(config: TabStripConfig) -> Self {
        Self {
            id: StripId::next(),
            items: Vec::new(),
            containers: Vec::new(),
            native_buttons: Vec::new(),
            overflow_view: config.show_overflow_view.then(ContentView::overflow),
            config,
            customizing: false,
            bounds: Size::ZERO,
            selected_index: None,
            needs_layout: false,
            delegate: None,
            pointer: None,
            measurer: None,
        }
    }

    pub fn id(&self) -> StripId {
        self.id
    }

    pub fn set_delegate(&mut self, delegate: Weak<dyn StripDelegate>) {
        self.delegate = Some(delegate);
    }

    fn delegate(&self) -> Option<Rc<dyn StripDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn containers(&self) -> &[ItemContainer] {
        &self.containers
    }

    pub fn container(&self, tag: ContainerTag) -> Option<&ItemContainer> {
        self.containers.iter().find(|container| container.tag() == tag)
    }

    pub fn native_buttons(&self) -> &[NativeButton] {
        &self.native_buttons
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn config(&self) -> &TabStripConfig {
        &self.config
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn is_customizing(&self) -> bool {
        self.customizing
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn overflow_view(&self) -> Option<&ContentView> {
        self.overflow_view.as_ref()
    }

    pub fn is_overflow_active(&self) -> bool {
        self.delegate().is_some_and(|delegate| delegate.is_overflow_active())
    }

    /// True when `index` is the last slot and the host is showing its overflow page.
    pub fn is_overflow_slot(&self, index: usize) -> bool {
        self.is_overflow_active() && index + 1 == self.items.len()
    }

    // ── Configuration ────────────────────────────────────────────────────────

    pub fn set_bounds(&mut self, bounds: Size) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.set_needs_layout();
        }
    }

    pub fn set_positioning(&mut self, positioning: PositioningConfig) {
        self.config.positioning = positioning;
        self.set_needs_layout();
    }

    pub fn set_overflow_view(&mut self, view: Option<ContentView>) {
        self.overflow_view = view;
        self.reload();
    }

    pub fn set_text_measurer(&mut self, measurer: Rc<dyn TextMeasurer>) {
        for view in self.all_views() {
            view.set_text_measurer(measurer.clone());
        }
        self.measurer = Some(measurer);
    }

    /// Records the host's native button frames, ordered left to right.
    pub fn set_native_button_frames(&mut self, mut frames: Vec<Rect>) {
        frames.sort_by(|a, b| a.x.total_cmp(&b.x));
        if frames.len() != self.items.len() {
            log::warn!(
                "[TabStrip] {} native frames reported for {} items",
                frames.len(),
                self.items.len()
            );
        }
        self.native_buttons = frames
            .into_iter()
            .map(|frame| NativeButton { frame, hidden: false })
            .collect();
        self.native_buttons.resize(self.items.len(), NativeButton::default());
        self.set_needs_layout();
    }

    /// Item customization is host-owned; while it runs every native button is shown
    /// and every container is hidden.
    pub fn set_customizing(&mut self, customizing: bool) -> StripResult<()> {
        if self.customizing == customizing {
            return Ok(());
        }
        log::debug!("[TabStrip] Customizing mode {customizing}");
        self.customizing = customizing;
        self.layout_subviews()
    }

    // ── Items and rebuild ────────────────────────────────────────────────────

    /// Replaces the item list wholesale and rebuilds every container. The selection
    /// is cleared; no view is left selected.
    pub fn set_items(&mut self, items: Vec<TabItem>, animated: bool) {
        log::debug!(
            "[TabStrip] set_items count={} animated={animated} (previous {})",
            items.len(),
            self.items.len()
        );
        self.selected_index = None;
        for view in self.all_views() {
            if view.is_selected() {
                view.deselect(false, Completion::none());
            }
        }
        self.items = items;
        for view in self.all_views() {
            if view.is_selected() {
                view.deselect(false, Completion::none());
            }
        }
        self.reload();
    }

    fn all_views(&self) -> Vec<ContentView> {
        self.items
            .iter()
            .filter_map(|item| item.content_view.clone())
            .chain(self.overflow_view.clone())
            .collect()
    }

    fn remove_all(&mut self) {
        for container in &mut self.containers {
            container.attach(None);
        }
        self.containers.clear();
        self.pointer = None;
    }

    fn reload(&mut self) {
        self.remove_all();
        self.native_buttons.resize(self.items.len(), NativeButton::default());
        if self.items.is_empty() {
            report(StripError::EmptyItems);
            return;
        }
        if let Some(measurer) = &self.measurer {
            for view in self.all_views() {
                view.set_text_measurer(measurer.clone());
            }
        }
        let overflow = self.is_overflow_active();
        let mut containers = Vec::with_capacity(self.items.len());
        for idx in 0..self.items.len() {
            let mut container = ItemContainer::new(self.id, ContainerTag::from_index(idx));
            container.attach(self.desired_child(idx, overflow));
            containers.push(container);
        }
        self.containers = containers;
        log::debug!("[TabStrip] Rebuilt {} containers", self.containers.len());
        self.set_needs_layout();
    }

    fn desired_child(&self, index: usize, overflow: bool) -> Option<ContentView> {
        if overflow
            && index + 1 == self.items.len()
            && let Some(view) = &self.overflow_view
        {
            return Some(view.clone());
        }
        self.items.get(index).and_then(|item| item.content_view.clone())
    }

    fn resolve_view(&self, index: usize, overflow: bool) -> Option<ContentView> {
        self.desired_child(index, overflow)
    }

    // ── Layout ───────────────────────────────────────────────────────────────

    pub fn set_needs_layout(&mut self) {
        self.needs_layout = true;
    }

    pub fn layout_if_needed(&mut self) -> StripResult<()> {
        if self.needs_layout {
            self.layout_subviews()
        } else {
            Ok(())
        }
    }

    /// Full layout pass. Always recomputes from current inputs.
    pub fn layout_subviews(&mut self) -> StripResult<()> {
        self.needs_layout = false;
        if self.items.is_empty() {
            return Err(report(StripError::EmptyItems));
        }
        let overflow = self.is_overflow_active();

        for idx in 0..self.containers.len() {
            let child = self.desired_child(idx, overflow);
            self.containers[idx].attach(child);
        }
        self.apply_visibility(overflow);

        let native_frames: Vec<Rect> = self.native_buttons.iter().map(|button| button.frame).collect();
        let frames = positioning::compute_item_frames(
            self.bounds,
            &self.config.positioning,
            self.containers.len(),
            &native_frames,
        )?;
        for (container, frame) in self.containers.iter_mut().zip(frames) {
            log::trace!("[TabStrip] container {} -> {frame:?}", container.tag().raw());
            container.set_frame(frame);
        }
        log::debug!(
            "[TabStrip] Layout pass: {} containers, mode {:?}, overflow={overflow}, customizing={}",
            self.containers.len(),
            self.config.positioning.mode,
            self.customizing
        );
        Ok(())
    }

    fn apply_visibility(&mut self, overflow: bool) {
        if self.customizing {
            for button in &mut self.native_buttons {
                button.hidden = false;
            }
            for container in &mut self.containers {
                container.set_hidden(true);
            }
            if let Some(view) = &self.overflow_view {
                view.set_hidden(true);
            }
            return;
        }

        let last = self.items.len().saturating_sub(1);
        let has_overflow_view = self.overflow_view.is_some();
        for (idx, button) in self.native_buttons.iter_mut().enumerate() {
            let custom = self
                .items
                .get(idx)
                .is_some_and(|item| item.content_view.is_some());
            let custom_overflow = overflow && idx == last && has_overflow_view;
            button.hidden = custom || custom_overflow;
        }
        for container in &mut self.containers {
            let empty = container.content().is_none();
            container.set_hidden(empty);
        }
        if let Some(view) = &self.overflow_view {
            view.set_hidden(false);
        }
    }

    // ── Selection ────────────────────────────────────────────────────────────

    pub fn select_item(&mut self, index: usize, animated: bool) -> StripResult<SelectOutcome> {
        let len = self.items.len();
        let Some(item) = self.items.get(index) else {
            return Err(report(StripError::IndexOutOfRange { index, len }));
        };
        if !item.enabled {
            log::debug!("[TabStrip] select {index}: item disabled");
            return Ok(SelectOutcome::Disabled);
        }
        let delegate = self.delegate();
        if let Some(delegate) = &delegate
            && !delegate.should_select(index, item)
        {
            log::debug!("[TabStrip] select {index}: refused by should_select");
            return Ok(SelectOutcome::Denied);
        }

        let overflow = self.is_overflow_active();
        let target = self.resolve_view(index, overflow);

        if let Some(delegate) = &delegate
            && delegate.should_hijack(index, item)
        {
            log::debug!("[TabStrip] select {index}: hijacked");
            delegate.did_hijack(index, item);
            if let Some(view) = &target {
                if animated {
                    view.flash(animated);
                } else {
                    view.dehighlight(false, Completion::none());
                }
            }
            return Ok(SelectOutcome::Hijacked);
        }

        let previous = self.selected_index;
        if previous == Some(index) {
            log::debug!("[TabStrip] select {index}: reselect");
            if let Some(view) = &target {
                view.reselect(animated, Completion::none());
            }
            if let Some(delegate) = &delegate {
                delegate.did_reselect(index, animated);
            }
            return Ok(SelectOutcome::Reselected);
        }

        if let Some(prev) = previous
            && prev < len
            && let Some(view) = self.resolve_view(prev, overflow)
        {
            view.deselect(animated, Completion::none());
        }
        if let Some(view) = &target {
            view.select(animated, Completion::none());
        }
        self.selected_index = Some(index);
        log::debug!("[TabStrip] select {index}: selected (previous {previous:?})");
        if let Some(delegate) = &delegate {
            delegate.did_select(index, overflow && index + 1 == len);
        }
        Ok(SelectOutcome::Selected { previous })
    }

    /// The guard shared by every interaction: item exists, is enabled, may be selected.
    fn check_interaction(&self, index: usize) -> StripResult<Option<InteractionOutcome>> {
        let Some(item) = self.items.get(index) else {
            return Err(report(StripError::IndexOutOfRange {
                index,
                len: self.items.len(),
            }));
        };
        if !item.enabled {
            return Ok(Some(InteractionOutcome::Disabled));
        }
        if let Some(delegate) = self.delegate()
            && !delegate.should_select(index, item)
        {
            return Ok(Some(InteractionOutcome::Denied));
        }
        Ok(None)
    }

    pub fn highlight_item(&self, index: usize, animated: bool) -> StripResult<InteractionOutcome> {
        if let Some(refused) = self.check_interaction(index)? {
            return Ok(refused);
        }
        if let Some(view) = self.resolve_view(index, self.is_overflow_active()) {
            view.highlight(animated, Completion::none());
        }
        Ok(InteractionOutcome::Applied)
    }

    pub fn dehighlight_item(&self, index: usize, animated: bool) -> StripResult<InteractionOutcome> {
        if let Some(refused) = self.check_interaction(index)? {
            return Ok(refused);
        }
        if let Some(view) = self.resolve_view(index, self.is_overflow_active()) {
            view.dehighlight(animated, Completion::none());
        }
        Ok(InteractionOutcome::Applied)
    }

    // ── Event dispatch ───────────────────────────────────────────────────────

    /// Runs a request forwarded by a container. Requests from containers this strip no
    /// longer owns are reported and dropped.
    pub fn dispatch(&mut self, action: ContainerAction) -> StripResult<InteractionOutcome> {
        if action.owner != self.id || self.container(action.tag).is_none() {
            return Err(report(StripError::UnknownSender {
                owner: action.owner,
                tag: action.tag,
            }));
        }
        let index = action.tag.index();
        match action.request {
            InteractionRequest::Highlight => self.highlight_item(index, true),
            InteractionRequest::Dehighlight => self.dehighlight_item(index, true),
            InteractionRequest::Select => self
                .select_item(index, true)
                .map(InteractionOutcome::Selection),
        }
    }

    /// Delivers `event` to the container tagged `tag`.
    pub fn send_event(&mut self, tag: ContainerTag, event: ContainerEvent) -> StripResult<InteractionOutcome> {
        let Some(container) = self.container(tag) else {
            return Err(report(StripError::UnknownSender { owner: self.id, tag }));
        };
        let action = container.handle_event(event);
        self.dispatch(action)
    }

    // ── Hit testing ──────────────────────────────────────────────────────────

    /// `point` is in strip coordinates. Containers extend the strip's touch area.
    pub fn point_inside(&self, point: Point) -> bool {
        Rect::from_origin_size(Point::ZERO, self.bounds).contains(point)
            || self
                .containers
                .iter()
                .any(|container| container.point_inside(point.relative_to(container.frame().origin())))
    }

    /// The container that should receive a touch at `point`: a direct frame hit
    /// first, then the topmost container whose hosted view extends over the point.
    pub fn hit_test(&self, point: Point) -> Option<ContainerTag> {
        let visible = || self.containers.iter().filter(|container| !container.is_hidden());
        visible()
            .find(|container| container.frame().contains(point))
            .or_else(|| {
                visible().rev().find(|container| {
                    container.point_inside(point.relative_to(container.frame().origin()))
                })
            })
            .map(ItemContainer::tag)
    }

    // ── Pointer tracking ─────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, point: Point) -> StripResult<Option<InteractionOutcome>> {
        self.pointer = None;
        let Some(tag) = self.hit_test(point) else {
            return Ok(None);
        };
        log::trace!("[TabStrip] pointer down on {}", tag.raw());
        self.pointer = Some(PointerTrack { tag, inside: true });
        self.send_event(tag, ContainerEvent::TouchDown).map(Some)
    }

    pub fn pointer_moved(&mut self, point: Point) -> StripResult<Option<InteractionOutcome>> {
        let Some(track) = self.pointer else {
            return Ok(None);
        };
        let Some(container) = self.container(track.tag) else {
            self.pointer = None;
            return Ok(None);
        };
        let inside = container.point_inside(point.relative_to(container.frame().origin()));
        if inside == track.inside {
            return Ok(None);
        }
        self.pointer = Some(PointerTrack { inside, ..track });
        let event = if inside {
            ContainerEvent::TouchDragEnter
        } else {
            ContainerEvent::TouchDragExit
        };
        self.send_event(track.tag, event).map(Some)
    }

    pub fn pointer_up(&mut self, point: Point) -> StripResult<Option<InteractionOutcome>> {
        let Some(track) = self.pointer.take() else {
            return Ok(None);
        };
        let Some(container) = self.container(track.tag) else {
            return Ok(None);
        };
        if container.point_inside(point.relative_to(container.frame().origin())) {
            self.send_event(track.tag, ContainerEvent::TouchUpInside).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn pointer_cancelled(&mut self) -> StripResult<Option<InteractionOutcome>> {
        match self.pointer.take() {
            Some(track) if track.inside => self.send_event(track.tag, ContainerEvent::TouchCancel).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::positioning::PositioningMode;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingDelegate {
        overflow: Cell<bool>,
        refuse: Cell<Option<usize>>,
        hijack: Cell<Option<usize>>,
        log: RefCell<Vec<String>>,
    }

    impl StripDelegate for RecordingDelegate {
        fn should_select(&self, index: usize, _item: &TabItem) -> bool {
            self.refuse.get() != Some(index)
        }
        fn should_hijack(&self, index: usize, _item: &TabItem) -> bool {
            self.hijack.get() == Some(index)
        }
        fn did_hijack(&self, index: usize, _item: &TabItem) {
            self.log.borrow_mut().push(format!("hijack {index}"));
        }
        fn did_select(&self, index: usize, overflow: bool) {
            self.log.borrow_mut().push(format!("select {index} overflow={overflow}"));
        }
        fn did_reselect(&self, index: usize, _animated: bool) {
            self.log.borrow_mut().push(format!("reselect {index}"));
        }
        fn is_overflow_active(&self) -> bool {
            self.overflow.get()
        }
    }

    fn strip_with(count: usize) -> (TabStrip, Rc<RecordingDelegate>, Vec<ContentView>) {
        let delegate = Rc::new(RecordingDelegate::default());
        let mut strip = TabStrip::new(TabStripConfig {
            positioning: PositioningConfig {
                mode: PositioningMode::FillIncludeSeparator,
                ..Default::default()
            },
            show_overflow_view: true,
        });
        let weak: Weak<dyn StripDelegate> = Rc::downgrade(&delegate) as Weak<dyn StripDelegate>;
        strip.set_delegate(weak);
        let views: Vec<ContentView> = (0..count).map(|_| ContentView::new()).collect();
        strip.set_items(views.iter().cloned().map(TabItem::new).collect(), false);
        strip.set_bounds(Size::new(100.0 * count as f64, 49.0));
        strip.layout_subviews().unwrap();
        (strip, delegate, views)
    }

    #[test]
    fn rebuild_creates_one_tagged_container_per_item() {
        let (strip, _delegate, views) = strip_with(3);
        assert_eq!(strip.containers().len(), 3);
        for (idx, container) in strip.containers().iter().enumerate() {
            assert_eq!(container.tag().raw(), 1000 + idx as i32);
            assert!(container.content().unwrap().ptr_eq(&views[idx]));
        }
        assert!(!strip.needs_layout());
    }

    #[test]
    fn empty_item_list_is_reported_on_layout() {
        let mut strip = TabStrip::default();
        strip.set_items(Vec::new(), false);
        assert!(strip.containers().is_empty());
        assert_eq!(strip.layout_subviews(), Err(StripError::EmptyItems));
    }

    #[test]
    fn selecting_a_new_item_deselects_the_previous_one() {
        let (mut strip, delegate, views) = strip_with(3);
        assert_eq!(
            strip.select_item(0, false),
            Ok(SelectOutcome::Selected { previous: None })
        );
        assert_eq!(
            strip.select_item(2, false),
            Ok(SelectOutcome::Selected { previous: Some(0) })
        );
        assert!(!views[0].is_selected());
        assert!(views[2].is_selected());
        assert_eq!(strip.selected_index(), Some(2));
        assert_eq!(
            *delegate.log.borrow(),
            vec!["select 0 overflow=false", "select 2 overflow=false"]
        );
    }

    #[test]
    fn selecting_the_same_item_reselects() {
        let (mut strip, delegate, views) = strip_with(2);
        strip.select_item(1, true).unwrap();
        assert_eq!(strip.select_item(1, true), Ok(SelectOutcome::Reselected));
        assert!(views[1].is_selected());
        assert_eq!(
            *delegate.log.borrow(),
            vec!["select 1 overflow=false", "reselect 1"]
        );
    }

    #[test]
    fn disabled_and_refused_items_are_ignored() {
        let delegate = Rc::new(RecordingDelegate::default());
        let mut strip = TabStrip::default();
        strip.set_delegate(Rc::downgrade(&delegate) as Weak<dyn StripDelegate>);
        strip.set_items(
            vec![
                TabItem::new(ContentView::new()).enabled(false),
                TabItem::new(ContentView::new()),
            ],
            false,
        );
        delegate.refuse.set(Some(1));
        assert_eq!(strip.select_item(0, false), Ok(SelectOutcome::Disabled));
        assert_eq!(strip.select_item(1, false), Ok(SelectOutcome::Denied));
        assert_eq!(strip.highlight_item(1, false), Ok(InteractionOutcome::Denied));
        assert_eq!(strip.selected_index(), None);
        assert!(delegate.log.borrow().is_empty());
    }

    #[test]
    fn out_of_range_selection_is_an_error_without_state_change() {
        let (mut strip, _delegate, _views) = strip_with(2);
        assert_eq!(
            strip.select_item(5, false),
            Err(StripError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(strip.selected_index(), None);
    }

    #[test]
    fn hijack_keeps_selection_and_notifies() {
        let (mut strip, delegate, views) = strip_with(3);
        strip.select_item(0, false).unwrap();
        delegate.hijack.set(Some(2));
        assert_eq!(strip.select_item(2, true), Ok(SelectOutcome::Hijacked));
        assert_eq!(strip.selected_index(), Some(0));
        assert!(views[0].is_selected());
        assert!(!views[2].is_selected());
        assert_eq!(delegate.log.borrow().last().map(String::as_str), Some("hijack 2"));
    }

    #[test]
    fn overflow_slot_uses_the_overflow_view() {
        let (mut strip, delegate, views) = strip_with(4);
        delegate.overflow.set(true);
        strip.layout_subviews().unwrap();
        let overflow_view = strip.overflow_view().cloned().unwrap();
        assert!(strip.containers()[3].content().unwrap().ptr_eq(&overflow_view));
        assert!(strip.native_buttons()[3].hidden);

        strip.select_item(3, false).unwrap();
        assert!(overflow_view.is_selected());
        assert!(!views[3].is_selected());
        assert_eq!(
            delegate.log.borrow().last().map(String::as_str),
            Some("select 3 overflow=true")
        );

        delegate.overflow.set(false);
        strip.layout_subviews().unwrap();
        assert!(strip.containers()[3].content().unwrap().ptr_eq(&views[3]));
    }

    #[test]
    fn customizing_shows_native_buttons_and_hides_containers() {
        let (mut strip, _delegate, _views) = strip_with(2);
        assert!(strip.native_buttons().iter().all(|button| button.hidden));
        strip.set_customizing(true).unwrap();
        assert!(strip.native_buttons().iter().all(|button| !button.hidden));
        assert!(strip.containers().iter().all(ItemContainer::is_hidden));
        strip.set_customizing(false).unwrap();
        assert!(strip.containers().iter().all(|container| !container.is_hidden()));
    }

    #[test]
    fn customizing_an_empty_strip_reports_the_layout_failure() {
        let mut strip = TabStrip::default();
        assert_eq!(strip.set_customizing(true), Err(StripError::EmptyItems));
        assert!(strip.is_customizing());
        assert_eq!(strip.set_customizing(true), Ok(()));
    }

    #[test]
    fn native_items_keep_their_native_button() {
        let mut strip = TabStrip::default();
        strip.set_items(vec![TabItem::new(ContentView::new()), TabItem::native()], false);
        strip.set_native_button_frames(vec![
            Rect::new(50.0, 0.0, 50.0, 49.0),
            Rect::new(0.0, 0.0, 50.0, 49.0),
        ]);
        strip.layout_subviews().unwrap();
        let buttons = strip.native_buttons();
        assert_eq!(buttons[0].frame.x, 0.0);
        assert!(buttons[0].hidden);
        assert!(!buttons[1].hidden);
        assert!(strip.containers()[1].is_hidden());
        assert_eq!(strip.containers()[1].frame(), Rect::new(50.0, 0.0, 50.0, 49.0));
    }

    #[test]
    fn events_from_foreign_or_stale_containers_are_rejected() {
        let (mut strip, _delegate, _views) = strip_with(2);
        let (other, _other_delegate, _) = strip_with(2);
        let foreign = other.containers()[0].handle_event(ContainerEvent::TouchUpInside);
        assert!(matches!(
            strip.dispatch(foreign),
            Err(StripError::UnknownSender { .. })
        ));
        assert!(matches!(
            strip.send_event(ContainerTag::from_index(9), ContainerEvent::TouchDown),
            Err(StripError::UnknownSender { .. })
        ));
    }

    #[test]
    fn pointer_sequence_highlights_then_selects() {
        let (mut strip, _delegate, views) = strip_with(3);
        strip.pointer_down(Point::new(150.0, 20.0)).unwrap();
        assert!(views[1].is_highlighted());

        strip.pointer_moved(Point::new(150.0, 80.0)).unwrap();
        assert!(!views[1].is_highlighted());
        strip.pointer_moved(Point::new(150.0, 30.0)).unwrap();
        assert!(views[1].is_highlighted());

        let outcome = strip.pointer_up(Point::new(150.0, 30.0)).unwrap();
        assert_eq!(
            outcome,
            Some(InteractionOutcome::Selection(SelectOutcome::Selected { previous: None }))
        );
        assert!(views[1].is_selected());
        assert!(!views[1].is_highlighted());
    }

    #[test]
    fn release_outside_does_not_select() {
        let (mut strip, _delegate, views) = strip_with(2);
        strip.pointer_down(Point::new(10.0, 10.0)).unwrap();
        strip.pointer_moved(Point::new(10.0, 100.0)).unwrap();
        assert_eq!(strip.pointer_up(Point::new(10.0, 100.0)), Ok(None));
        assert!(!views[0].is_selected());
        assert!(!views[0].is_highlighted());
    }

    #[test]
    fn strip_touch_area_includes_enlarged_content() {
        let (mut strip, _delegate, views) = strip_with(2);
        views[0].set_touch_outsets(crate::types::EdgeInsets::new(-20.0, 0.0, 0.0, 0.0));
        strip.layout_subviews().unwrap();
        let above = Point::new(30.0, -10.0);
        assert!(strip.point_inside(above));
        assert_eq!(strip.hit_test(above), Some(ContainerTag::from_index(0)));
        assert_eq!(strip.hit_test(Point::new(150.0, -10.0)), None);
    }

    #[test]
    fn set_items_leaves_no_view_selected() {
        let (mut strip, _delegate, views) = strip_with(2);
        strip.select_item(1, false).unwrap();
        let fresh = ContentView::new();
        fresh.select(false, Completion::none());
        strip.set_items(vec![TabItem::new(views[1].clone()), TabItem::new(fresh.clone())], true);
        assert_eq!(strip.selected_index(), None);
        assert!(!views[1].is_selected());
        assert!(!fresh.is_selected());
        assert_eq!(strip.containers().len(), 2);
    }

    #[test]
    fn dropped_delegate_falls_back_to_defaults() {
        let mut strip = TabStrip::default();
        {
            let delegate = Rc::new(RecordingDelegate::default());
            delegate.refuse.set(Some(0));
            strip.set_delegate(Rc::downgrade(&delegate) as Weak<dyn StripDelegate>);
        }
        strip.set_items(vec![TabItem::new(ContentView::new())], false);
        assert_eq!(
            strip.select_item(0, false),
            Ok(SelectOutcome::Selected { previous: None })
        );
    }
}
