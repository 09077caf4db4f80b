/*
 * Host bridge: keeps the host navigation framework's "selected page" and the strip's
 * selected index in step.
 *
 * Two directions are handled. A tap in the strip selects an item and the bridge writes
 * the new index (or the overflow page) back to the host. An external change on the host
 * side arrives through `will_set_selected_index` / `will_set_selected_page` and is
 * mirrored into the strip without writing back or emitting did-select.
 *
 * The bridge's own writes trigger the host's will-set observation too. A one-shot
 * suppression flag, held by `SelectionSuppression` for the duration of the write,
 * makes the bridge ignore exactly that echo.
 *
 * The controller is built with `Controller::new` and installs itself as the strip's
 * delegate; no host-side property injection is involved.
 */

use crate::controls::content_view::ContentView;
use crate::controls::positioning::{PositioningConfig, PositioningMode};
use crate::controls::tab_strip::{
    InteractionOutcome, NativeButton, SelectOutcome, StripDelegate, TabStrip, TabStripConfig,
};
use crate::error::{Result as StripResult, StripError, report};
use crate::styling_primitives::TextMeasurer;
use crate::types::{ContainerEvent, ContainerTag, Point, Rect, Size, TabItem};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// The host navigation framework as seen by the bridge.
pub trait NavigationHost {
    type Page: Clone + PartialEq + fmt::Debug + 'static;

    /// Pages in strip order, one per item.
    fn pages(&self) -> Vec<Self::Page>;

    fn selected_index(&self) -> Option<usize>;

    /// Makes the page at `index` active. Hosts typically report the change back
    /// through `Controller::will_set_selected_index` before applying it.
    fn set_selected_index(&self, index: usize);

    fn show_overflow_page(&self);

    fn is_overflow_active(&self) -> bool;

    fn should_select_page(&self, page: &Self::Page, index: usize) -> bool {
        let _ = (page, index);
        true
    }

    fn has_navigation_stack(&self, page: &Self::Page) -> bool {
        let _ = page;
        false
    }

    fn pop_to_root(&self, page: &Self::Page, animated: bool) {
        let _ = (page, animated);
    }

    /// Default item customization UI.
    fn begin_customizing_items(&self) {}

    fn end_customizing(&self, animated: bool) -> bool {
        let _ = animated;
        true
    }

    fn apply_native_positioning(&self, mode: PositioningMode) {
        let _ = mode;
    }
}

type PagePredicate<P> = Rc<dyn Fn(&P, usize) -> bool>;
type PageCallback<P> = Rc<dyn Fn(&P, usize)>;

/*
 * RAII helper marking the next host selection change as our own. Dropping it clears
 * the flag whether or not the host echoed the change.
 */
struct SelectionSuppression<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> SelectionSuppression<'a> {
    fn new(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for SelectionSuppression<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct Controller<H: NavigationHost> {
    host: H,
    strip: RefCell<TabStrip>,
    suppress_next_selection: Cell<bool>,
    /// Set while an external host change is being mirrored into the strip.
    mirroring: Cell<bool>,
    should_hijack: RefCell<Option<PagePredicate<H::Page>>>,
    did_hijack: RefCell<Option<PageCallback<H::Page>>>,
    did_select: RefCell<Option<PageCallback<H::Page>>>,
}

impl<H: NavigationHost> fmt::Debug for Controller<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("strip", &self.strip)
            .field("suppress_next_selection", &self.suppress_next_selection.get())
            .finish()
    }
}

impl<H: NavigationHost + 'static> Controller<H> {
    pub fn new(host: H, config: TabStripConfig) -> Rc<Self> {
        if let Some(mode) = config.positioning.mode.native_equivalent() {
            host.apply_native_positioning(mode);
        }
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let mut strip = TabStrip::new(config);
            let delegate: Weak<dyn StripDelegate> = weak.clone();
            strip.set_delegate(delegate);
            log::debug!("[Controller] Created bridge for strip {}", strip.id().raw());
            Self {
                host,
                strip: RefCell::new(strip),
                suppress_next_selection: Cell::new(false),
                mirroring: Cell::new(false),
                should_hijack: RefCell::new(None),
                did_hijack: RefCell::new(None),
                did_select: RefCell::new(None),
            }
        })
    }
}

impl<H: NavigationHost> Controller<H> {
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Read access to the strip. Fails while the strip is dispatching a selection.
    pub fn with_strip<R>(&self, read: impl FnOnce(&TabStrip) -> R) -> StripResult<R> {
        let strip = self.strip.try_borrow().map_err(|_| {
            report(StripError::OperationFailed(
                "strip is busy dispatching".to_string(),
            ))
        })?;
        Ok(read(&strip))
    }

    fn with_strip_mut<R>(
        &self,
        update: impl FnOnce(&mut TabStrip) -> StripResult<R>,
    ) -> StripResult<R> {
        let mut strip = self.strip.try_borrow_mut().map_err(|_| {
            report(StripError::OperationFailed(
                "re-entrant strip access from a host callback".to_string(),
            ))
        })?;
        update(&mut strip)
    }

    // ── Handlers ─────────────────────────────────────────────────────────────

    pub fn set_should_hijack_handler(&self, handler: impl Fn(&H::Page, usize) -> bool + 'static) {
        *self.should_hijack.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn set_did_hijack_handler(&self, handler: impl Fn(&H::Page, usize) + 'static) {
        *self.did_hijack.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn set_did_select_handler(&self, handler: impl Fn(&H::Page, usize) + 'static) {
        *self.did_select.borrow_mut() = Some(Rc::new(handler));
    }

    fn page_at(&self, index: usize) -> Option<H::Page> {
        self.host.pages().get(index).cloned()
    }

    // ── Strip entry points ───────────────────────────────────────────────────

    /// Replaces the items and re-mirrors the host's current selection.
    pub fn set_items(&self, items: Vec<TabItem>, animated: bool) -> StripResult<()> {
        let pages = self.host.pages().len();
        if pages != items.len() {
            log::warn!(
                "[Controller] {} items supplied for {pages} host pages",
                items.len()
            );
        }
        self.with_strip_mut(|strip| {
            strip.set_items(items, animated);
            Ok(())
        })?;
        match self.current_host_slot() {
            Some(index) => self.mirror_selection(index),
            None => Ok(()),
        }
    }

    pub fn select_item(&self, index: usize, animated: bool) -> StripResult<SelectOutcome> {
        self.with_strip_mut(|strip| strip.select_item(index, animated))
    }

    pub fn set_bounds(&self, bounds: Size) -> StripResult<()> {
        self.with_strip_mut(|strip| {
            strip.set_bounds(bounds);
            Ok(())
        })
    }

    pub fn set_native_button_frames(&self, frames: Vec<Rect>) -> StripResult<()> {
        self.with_strip_mut(|strip| {
            strip.set_native_button_frames(frames);
            Ok(())
        })
    }

    pub fn native_buttons(&self) -> StripResult<Vec<NativeButton>> {
        self.with_strip(|strip| strip.native_buttons().to_vec())
    }

    /// Native modes are also forwarded to the host so its own buttons use the same
    /// arrangement the containers copy.
    pub fn set_positioning(&self, positioning: PositioningConfig) -> StripResult<()> {
        if let Some(mode) = positioning.mode.native_equivalent() {
            self.host.apply_native_positioning(mode);
        }
        self.with_strip_mut(|strip| {
            strip.set_positioning(positioning);
            Ok(())
        })
    }

    pub fn set_overflow_view(&self, view: Option<ContentView>) -> StripResult<()> {
        self.with_strip_mut(|strip| {
            strip.set_overflow_view(view);
            Ok(())
        })
    }

    pub fn set_text_measurer(&self, measurer: Rc<dyn TextMeasurer>) -> StripResult<()> {
        self.with_strip_mut(|strip| {
            strip.set_text_measurer(measurer);
            Ok(())
        })
    }

    pub fn layout_if_needed(&self) -> StripResult<()> {
        self.with_strip_mut(TabStrip::layout_if_needed)
    }

    pub fn send_event(&self, tag: ContainerTag, event: ContainerEvent) -> StripResult<InteractionOutcome> {
        self.with_strip_mut(|strip| strip.send_event(tag, event))
    }

    pub fn pointer_down(&self, point: Point) -> StripResult<Option<InteractionOutcome>> {
        self.with_strip_mut(|strip| strip.pointer_down(point))
    }

    pub fn pointer_moved(&self, point: Point) -> StripResult<Option<InteractionOutcome>> {
        self.with_strip_mut(|strip| strip.pointer_moved(point))
    }

    pub fn pointer_up(&self, point: Point) -> StripResult<Option<InteractionOutcome>> {
        self.with_strip_mut(|strip| strip.pointer_up(point))
    }

    pub fn pointer_cancelled(&self) -> StripResult<Option<InteractionOutcome>> {
        self.with_strip_mut(TabStrip::pointer_cancelled)
    }

    // ── Host observation points ──────────────────────────────────────────────

    /// Strip slot matching the host's current selection. The overflow page maps onto
    /// the last slot; an index past the strip has no slot.
    fn current_host_slot(&self) -> Option<usize> {
        let last = self.last_slot()?;
        if self.host.is_overflow_active() {
            return Some(last);
        }
        self.host.selected_index().filter(|&index| index <= last)
    }

    fn last_slot(&self) -> Option<usize> {
        self.with_strip(TabStrip::item_count)
            .ok()
            .and_then(|count| count.checked_sub(1))
    }

    /// Only the overflow page may sit past the last slot.
    fn clamp_slot(&self, index: usize) -> usize {
        if !self.host.is_overflow_active() {
            return index;
        }
        match self.last_slot() {
            Some(last) if index > last => last,
            _ => index,
        }
    }

    /// Called by the host before it changes its selected index.
    pub fn will_set_selected_index(&self, index: usize) -> StripResult<()> {
        if self.suppress_next_selection.replace(false) {
            log::trace!("[Controller] Ignoring echo of own selection {index}");
            return Ok(());
        }
        self.mirror_selection(self.clamp_slot(index))
    }

    /// Called by the host before it changes its selected page. A page that is not
    /// part of the strip is shown through the overflow slot.
    pub fn will_set_selected_page(&self, page: &H::Page) -> StripResult<()> {
        match self.host.pages().iter().position(|candidate| candidate == page) {
            Some(index) => self.will_set_selected_index(index),
            None => {
                if self.suppress_next_selection.replace(false) {
                    return Ok(());
                }
                match self.last_slot() {
                    Some(last) => self.mirror_selection(last),
                    None => Err(report(StripError::EmptyItems)),
                }
            }
        }
    }

    fn mirror_selection(&self, index: usize) -> StripResult<()> {
        log::debug!("[Controller] Mirroring host selection {index}");
        self.mirroring.set(true);
        let result = self.with_strip_mut(|strip| strip.select_item(index, false));
        self.mirroring.set(false);
        result.map(|_| ())
    }

    // ── Customization ────────────────────────────────────────────────────────

    pub fn will_begin_customizing(&self) -> StripResult<()> {
        self.with_strip_mut(|strip| strip.set_customizing(true))
    }

    pub fn will_end_customizing(&self) -> StripResult<()> {
        self.with_strip_mut(|strip| strip.set_customizing(false))
    }

    /// Item customization is host-owned; the request is handed on to the host and
    /// reported back as unsupported.
    pub fn begin_customizing_items(&self) -> StripResult<()> {
        let err = report(StripError::Unsupported("begin_customizing_items"));
        self.host.begin_customizing_items();
        Err(err)
    }

    pub fn end_customizing(&self, animated: bool) -> bool {
        report(StripError::Unsupported("end_customizing"));
        self.host.end_customizing(animated)
    }
}

impl<H: NavigationHost> StripDelegate for Controller<H> {
    fn should_select(&self, index: usize, _item: &TabItem) -> bool {
        if self.mirroring.get() {
            return true;
        }
        match self.page_at(index) {
            Some(page) => self.host.should_select_page(&page, index),
            None => true,
        }
    }

    fn should_hijack(&self, index: usize, _item: &TabItem) -> bool {
        if self.mirroring.get() {
            return false;
        }
        let handler = self.should_hijack.borrow().clone();
        match (handler, self.page_at(index)) {
            (Some(handler), Some(page)) => handler(&page, index),
            _ => false,
        }
    }

    fn did_hijack(&self, index: usize, _item: &TabItem) {
        log::debug!("[Controller] Item {index} hijacked");
        let handler = self.did_hijack.borrow().clone();
        if let (Some(handler), Some(page)) = (handler, self.page_at(index)) {
            handler(&page, index);
        }
    }

    fn did_select(&self, index: usize, overflow: bool) {
        if self.mirroring.get() {
            return;
        }
        let suppression = SelectionSuppression::new(&self.suppress_next_selection);
        if overflow {
            log::debug!("[Controller] Overflow slot {index} selected; showing overflow page");
            self.host.show_overflow_page();
            return;
        }
        self.host.set_selected_index(index);
        drop(suppression);
        log::debug!("[Controller] did-select {index} overflow={overflow}");
        let handler = self.did_select.borrow().clone();
        if let (Some(handler), Some(page)) = (handler, self.page_at(index)) {
            handler(&page, index);
        }
    }

    fn did_reselect(&self, index: usize, animated: bool) {
        if self.mirroring.get() {
            return;
        }
        if let Some(page) = self.page_at(index)
            && self.host.has_navigation_stack(&page)
        {
            log::debug!("[Controller] Reselected {index}; popping {page:?} to root");
            self.host.pop_to_root(&page, animated);
        }
    }

    fn is_overflow_active(&self) -> bool {
        self.host.is_overflow_active()
    }
}
