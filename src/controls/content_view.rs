/*
 * Content view: the visual of one tab item (icon, title, badge) together with its
 * selection/highlight state machine.
 *
 * State only changes through `select`, `deselect`, `reselect`, `highlight`,
 * `dehighlight` and `set_badge_value`. Every change recomputes the display attributes
 * in `refresh_display`, so setters never patch colors piecemeal.
 *
 * Each transition ends in a `ContentAnimator` hook. The default hooks complete
 * immediately; skins override them to add motion and call the completion once the
 * motion is done. A transition that must follow another (select after dehighlight) is
 * started from inside the earlier transition's completion, never by waiting.
 *
 * `ContentView` is a cheap handle (`Rc`) so the strip, the tab item and pending
 * completions can all refer to the same view. Completions hold a weak handle and do
 * nothing to the view once it has been dropped.
 */

use crate::controls::badge::{self, BadgeStyle, DEFAULT_BADGE_COLOR};
use crate::styling_primitives::{Color, ContentPalette, FixedAdvanceMeasurer, TextMeasurer};
use crate::types::{EdgeInsets, Offset, Point, Rect, Size};

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

// ── Completion ────────────────────────────────────────────────────────────────

/// One-shot notification fired when a visual transition has finished.
pub struct Completion {
    callback: Option<Box<dyn FnOnce()>>,
}

impl Completion {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A completion nobody waits for.
    pub fn none() -> Self {
        Self { callback: None }
    }

    pub fn is_empty(&self) -> bool {
        self.callback.is_none()
    }

    pub fn fire(mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.callback.is_some() {
            log::warn!("[ContentView] Transition completion dropped without being fired");
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

// ── Animation hooks ───────────────────────────────────────────────────────────

/// Transition hooks run after each state change. Implementations must fire the
/// completion exactly once, now or later.
pub trait ContentAnimator {
    fn select_animation(&self, view: &ContentView, animated: bool, completion: Completion) {
        let _ = (view, animated);
        completion.fire();
    }

    fn deselect_animation(&self, view: &ContentView, animated: bool, completion: Completion) {
        let _ = (view, animated);
        completion.fire();
    }

    fn reselect_animation(&self, view: &ContentView, animated: bool, completion: Completion) {
        let _ = (view, animated);
        completion.fire();
    }

    fn highlight_animation(&self, view: &ContentView, animated: bool, completion: Completion) {
        let _ = (view, animated);
        completion.fire();
    }

    fn dehighlight_animation(&self, view: &ContentView, animated: bool, completion: Completion) {
        let _ = (view, animated);
        completion.fire();
    }

    fn badge_changed_animation(&self, view: &ContentView, animated: bool, completion: Completion) {
        let _ = (view, animated);
        completion.fire();
    }
}

/// Completes every transition immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnimation;

impl ContentAnimator for NoAnimation {}

// ── Appearance ────────────────────────────────────────────────────────────────

/// Host-owned image reference together with its natural size.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub name: String,
    pub size: Size,
}

impl Icon {
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Whether the host tints the icon (`Template`) or draws it as authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderingMode {
    #[default]
    Template,
    Original,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentMetrics {
    /// How far the icon sits above center when a title is shown.
    pub icon_bottom_offset: f64,
    /// Gap between the title and the bottom edge.
    pub title_bottom_offset: f64,
    pub title_font_size: f64,
}

impl Default for ContentMetrics {
    fn default() -> Self {
        Self {
            icon_bottom_offset: 6.0,
            title_bottom_offset: 1.0,
            title_font_size: 10.0,
        }
    }
}

/// What the host should currently draw for a content view.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayAttributes {
    pub icon: Option<Icon>,
    pub rendering_mode: RenderingMode,
    pub icon_tint: Color,
    pub title_color: Color,
    pub background: Color,
}

/// Frames of the content view's parts, in content-view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentLayout {
    pub icon: Option<Rect>,
    pub title: Option<Rect>,
    pub badge: Option<Rect>,
}

/// Maps selection state onto icon, tint and colors.
pub fn display_attributes(
    selected: bool,
    icon: Option<&Icon>,
    selected_icon: Option<&Icon>,
    rendering_mode: RenderingMode,
    palette: &ContentPalette,
) -> DisplayAttributes {
    let icon = if selected { selected_icon.or(icon) } else { icon };
    DisplayAttributes {
        icon: icon.cloned(),
        rendering_mode,
        icon_tint: if selected { palette.highlight_icon } else { palette.icon },
        title_color: if selected { palette.highlight_text } else { palette.text },
        background: if selected {
            palette.highlight_backdrop
        } else {
            palette.backdrop
        },
    }
}

/// Arranges icon, title and badge inside a content view of size `bounds`.
///
/// With both icon and title the title hugs the bottom edge and the icon sits above
/// center; a lone icon or title is centered. The badge is anchored at the center
/// plus `badge_offset`.
pub fn arrange_content(
    bounds: Size,
    icon: Option<Size>,
    title: Option<Size>,
    badge: Option<Size>,
    metrics: &ContentMetrics,
    badge_offset: Offset,
) -> ContentLayout {
    let w = bounds.width;
    let h = bounds.height;
    let center = Point::new(w / 2.0, h / 2.0);

    let (icon_frame, title_frame) = match (icon, title) {
        (Some(icon), Some(title)) => {
            let title_frame = Rect::new(
                (w - title.width) / 2.0,
                h - title.height - metrics.title_bottom_offset,
                title.width,
                title.height,
            );
            let icon_frame = Rect::new(
                (w - icon.width) / 2.0,
                (h - icon.height) / 2.0 - metrics.icon_bottom_offset,
                icon.width,
                icon.height,
            );
            (Some(icon_frame), Some(title_frame))
        }
        (Some(icon), None) => (Some(Rect::centered_at(center, icon)), None),
        (None, Some(title)) => (None, Some(Rect::centered_at(center, title))),
        (None, None) => (None, None),
    };

    let badge_frame = badge.map(|size| {
        Rect::from_origin_size(
            Point::new(
                center.x + badge_offset.horizontal,
                center.y + badge_offset.vertical,
            ),
            size,
        )
    });

    ContentLayout {
        icon: icon_frame,
        title: title_frame,
        badge: badge_frame,
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Snapshot of the state-machine fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentViewState {
    pub selected: bool,
    pub highlighted: bool,
    pub highlight_enabled: bool,
    pub badge_value: Option<String>,
}

impl Default for ContentViewState {
    fn default() -> Self {
        Self {
            selected: false,
            highlighted: false,
            highlight_enabled: true,
            badge_value: None,
        }
    }
}

struct ContentModel {
    state: ContentViewState,
    /// Bumped by every select and deselect.
    selection_generation: u64,
    palette: ContentPalette,
    title: Option<String>,
    icon: Option<Icon>,
    selected_icon: Option<Icon>,
    rendering_mode: RenderingMode,
    metrics: ContentMetrics,
    insets: EdgeInsets,
    touch_outsets: EdgeInsets,
    badge_color: Option<Color>,
    badge_offset: Offset,
    badge_style: BadgeStyle,
    frame: Rect,
    hidden: bool,
    display: DisplayAttributes,
    layout: ContentLayout,
    animator: Rc<dyn ContentAnimator>,
    measurer: Rc<dyn TextMeasurer>,
}

impl ContentModel {
    fn new(animator: Rc<dyn ContentAnimator>) -> Self {
        let palette = ContentPalette::default();
        let rendering_mode = RenderingMode::default();
        Self {
            state: ContentViewState::default(),
            selection_generation: 0,
            display: display_attributes(false, None, None, rendering_mode, &palette),
            palette,
            title: None,
            icon: None,
            selected_icon: None,
            rendering_mode,
            metrics: ContentMetrics::default(),
            insets: EdgeInsets::ZERO,
            touch_outsets: EdgeInsets::ZERO,
            badge_color: None,
            badge_offset: Offset::new(6.0, -22.0),
            badge_style: BadgeStyle::default(),
            frame: Rect::ZERO,
            hidden: false,
            layout: ContentLayout::default(),
            animator,
            measurer: Rc::new(FixedAdvanceMeasurer::default()),
        }
    }

    fn compute_layout(&self) -> ContentLayout {
        let icon = self.display.icon.as_ref().map(|icon| icon.size);
        let title = self
            .title
            .as_deref()
            .map(|title| self.measurer.measure(title, self.metrics.title_font_size));
        let badge = badge::badge_size(
            self.state.badge_value.as_deref(),
            &self.badge_style,
            self.measurer.as_ref(),
        );
        arrange_content(
            self.frame.size(),
            icon,
            title,
            badge,
            &self.metrics,
            self.badge_offset,
        )
    }
}

// ── ContentView ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ContentView {
    model: Rc<RefCell<ContentModel>>,
}

struct WeakContentView(Weak<RefCell<ContentModel>>);

impl WeakContentView {
    fn upgrade(&self) -> Option<ContentView> {
        self.0.upgrade().map(|model| ContentView { model })
    }
}

impl fmt::Debug for ContentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.model.borrow();
        f.debug_struct("ContentView")
            .field("title", &model.title)
            .field("state", &model.state)
            .field("frame", &model.frame)
            .finish()
    }
}

impl Default for ContentView {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentView {
    pub fn new() -> Self {
        Self::with_animator(Rc::new(NoAnimation))
    }

    pub fn with_animator(animator: Rc<dyn ContentAnimator>) -> Self {
        Self {
            model: Rc::new(RefCell::new(ContentModel::new(animator))),
        }
    }

    /// Default content for the overflow ("More") slot.
    pub fn overflow() -> Self {
        let view = Self::new();
        view.set_title(Some("More".to_string()));
        view
    }

    /// True when both handles refer to the same view.
    pub fn ptr_eq(&self, other: &ContentView) -> bool {
        Rc::ptr_eq(&self.model, &other.model)
    }

    fn downgrade(&self) -> WeakContentView {
        WeakContentView(Rc::downgrade(&self.model))
    }

    fn selection_generation(&self) -> u64 {
        self.model.borrow().selection_generation
    }

    fn animator(&self) -> Rc<dyn ContentAnimator> {
        self.model.borrow().animator.clone()
    }

    pub fn set_animator(&self, animator: Rc<dyn ContentAnimator>) {
        self.model.borrow_mut().animator = animator;
    }

    pub fn set_text_measurer(&self, measurer: Rc<dyn TextMeasurer>) {
        self.configure(|model| model.measurer = measurer);
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    pub fn state(&self) -> ContentViewState {
        self.model.borrow().state.clone()
    }

    pub fn is_selected(&self) -> bool {
        self.model.borrow().state.selected
    }

    pub fn is_highlighted(&self) -> bool {
        self.model.borrow().state.highlighted
    }

    pub fn badge_value(&self) -> Option<String> {
        self.model.borrow().state.badge_value.clone()
    }

    /// A non-`None` badge value means the badge is attached.
    pub fn has_badge(&self) -> bool {
        self.model.borrow().state.badge_value.is_some()
    }

    pub fn badge_color(&self) -> Color {
        self.model.borrow().badge_color.unwrap_or(DEFAULT_BADGE_COLOR)
    }

    pub fn badge_style(&self) -> BadgeStyle {
        self.model.borrow().badge_style
    }

    pub fn title(&self) -> Option<String> {
        self.model.borrow().title.clone()
    }

    pub fn display(&self) -> DisplayAttributes {
        self.model.borrow().display.clone()
    }

    pub fn layout(&self) -> ContentLayout {
        self.model.borrow().layout
    }

    /// Frame in the coordinates of the hosting container.
    pub fn frame(&self) -> Rect {
        self.model.borrow().frame
    }

    pub fn insets(&self) -> EdgeInsets {
        self.model.borrow().insets
    }

    pub fn is_hidden(&self) -> bool {
        self.model.borrow().hidden
    }

    // ── Configuration ────────────────────────────────────────────────────────

    fn configure(&self, apply: impl FnOnce(&mut ContentModel)) {
        apply(&mut self.model.borrow_mut());
        self.refresh_display();
        self.update_layout();
    }

    pub fn set_title(&self, title: Option<String>) {
        self.configure(|model| model.title = title);
    }

    pub fn set_icon(&self, icon: Option<Icon>) {
        self.configure(|model| model.icon = icon);
    }

    pub fn set_selected_icon(&self, icon: Option<Icon>) {
        self.configure(|model| model.selected_icon = icon);
    }

    pub fn set_rendering_mode(&self, mode: RenderingMode) {
        self.configure(|model| model.rendering_mode = mode);
    }

    pub fn set_palette(&self, palette: ContentPalette) {
        self.configure(|model| model.palette = palette);
    }

    pub fn palette(&self) -> ContentPalette {
        self.model.borrow().palette
    }

    pub fn set_text_color(&self, color: Color) {
        self.configure(|model| model.palette.text = color);
    }

    pub fn set_highlight_text_color(&self, color: Color) {
        self.configure(|model| model.palette.highlight_text = color);
    }

    pub fn set_icon_color(&self, color: Color) {
        self.configure(|model| model.palette.icon = color);
    }

    pub fn set_highlight_icon_color(&self, color: Color) {
        self.configure(|model| model.palette.highlight_icon = color);
    }

    pub fn set_backdrop_color(&self, color: Color) {
        self.configure(|model| model.palette.backdrop = color);
    }

    pub fn set_highlight_backdrop_color(&self, color: Color) {
        self.configure(|model| model.palette.highlight_backdrop = color);
    }

    pub fn set_metrics(&self, metrics: ContentMetrics) {
        self.configure(|model| model.metrics = metrics);
    }

    /// Gap between the hosting container's bounds and this view's frame.
    pub fn set_insets(&self, insets: EdgeInsets) {
        self.model.borrow_mut().insets = insets;
    }

    /// Grows (negative values) or shrinks the touch area around the frame.
    pub fn set_touch_outsets(&self, outsets: EdgeInsets) {
        self.model.borrow_mut().touch_outsets = outsets;
    }

    pub fn set_highlight_enabled(&self, enabled: bool) {
        self.model.borrow_mut().state.highlight_enabled = enabled;
    }

    pub fn set_badge_color(&self, color: Option<Color>) {
        self.model.borrow_mut().badge_color = color;
    }

    pub fn set_badge_offset(&self, offset: Offset) {
        let changed = {
            let mut model = self.model.borrow_mut();
            let changed = model.badge_offset != offset;
            model.badge_offset = offset;
            changed
        };
        if changed {
            self.update_layout();
        }
    }

    pub fn set_badge_style(&self, style: BadgeStyle) {
        self.configure(|model| model.badge_style = style);
    }

    /// Attaches (`Some`) or detaches (`None`) the badge and runs the badge-change
    /// transition.
    pub fn set_badge_value(&self, value: Option<String>) {
        log::trace!("[ContentView] Badge value set to {value:?}");
        self.configure(|model| model.state.badge_value = value);
        self.badge_changed(true, Completion::none());
    }

    pub(crate) fn set_frame(&self, frame: Rect) {
        self.model.borrow_mut().frame = frame;
        self.update_layout();
    }

    pub(crate) fn set_hidden(&self, hidden: bool) {
        self.model.borrow_mut().hidden = hidden;
    }

    // ── Display and layout ───────────────────────────────────────────────────

    fn refresh_display(&self) {
        let mut model = self.model.borrow_mut();
        model.display = display_attributes(
            model.state.selected,
            model.icon.as_ref(),
            model.selected_icon.as_ref(),
            model.rendering_mode,
            &model.palette,
        );
    }

    /// Re-arranges icon, title and badge for the current frame.
    pub fn update_layout(&self) {
        let mut model = self.model.borrow_mut();
        model.layout = model.compute_layout();
    }

    /// `point` is in this view's own coordinates.
    pub fn point_inside(&self, point: Point) -> bool {
        let model = self.model.borrow();
        model.frame.bounds().inset_by(model.touch_outsets).contains(point)
    }

    // ── State machine ────────────────────────────────────────────────────────

    pub fn select(&self, animated: bool, completion: Completion) {
        let was_highlighted = {
            let mut model = self.model.borrow_mut();
            model.state.selected = true;
            model.selection_generation += 1;
            let was_highlighted = model.state.highlight_enabled && model.state.highlighted;
            if was_highlighted {
                model.state.highlighted = false;
            }
            was_highlighted
        };
        log::trace!("[ContentView] select animated={animated} after_dehighlight={was_highlighted}");
        if was_highlighted {
            let weak = self.downgrade();
            self.animator().dehighlight_animation(
                self,
                animated,
                Completion::new(move || match weak.upgrade() {
                    Some(view) => {
                        view.refresh_display();
                        view.animator().select_animation(&view, animated, completion);
                    }
                    None => completion.fire(),
                }),
            );
        } else {
            self.refresh_display();
            self.animator().select_animation(self, animated, completion);
        }
    }

    pub fn deselect(&self, animated: bool, completion: Completion) {
        {
            let mut model = self.model.borrow_mut();
            model.state.selected = false;
            model.selection_generation += 1;
        }
        log::trace!("[ContentView] deselect animated={animated}");
        self.refresh_display();
        self.animator().deselect_animation(self, animated, completion);
    }

    /// Tapping the already-active item. Falls back to `select` when not selected.
    pub fn reselect(&self, animated: bool, completion: Completion) {
        if !self.is_selected() {
            self.select(animated, completion);
            return;
        }
        let was_highlighted = {
            let mut model = self.model.borrow_mut();
            let was_highlighted = model.state.highlight_enabled && model.state.highlighted;
            if was_highlighted {
                model.state.highlighted = false;
            }
            was_highlighted
        };
        log::trace!("[ContentView] reselect animated={animated} after_dehighlight={was_highlighted}");
        if was_highlighted {
            let weak = self.downgrade();
            self.animator().dehighlight_animation(
                self,
                animated,
                Completion::new(move || match weak.upgrade() {
                    Some(view) => view.animator().reselect_animation(&view, animated, completion),
                    None => completion.fire(),
                }),
            );
        } else {
            self.animator().reselect_animation(self, animated, completion);
        }
    }

    pub fn highlight(&self, animated: bool, completion: Completion) {
        {
            let mut model = self.model.borrow_mut();
            if !model.state.highlight_enabled || model.state.highlighted {
                drop(model);
                completion.fire();
                return;
            }
            model.state.highlighted = true;
        }
        self.animator().highlight_animation(self, animated, completion);
    }

    pub fn dehighlight(&self, animated: bool, completion: Completion) {
        {
            let mut model = self.model.borrow_mut();
            if !model.state.highlight_enabled || !model.state.highlighted {
                drop(model);
                completion.fire();
                return;
            }
            model.state.highlighted = false;
        }
        self.animator().dehighlight_animation(self, animated, completion);
    }

    pub fn badge_changed(&self, animated: bool, completion: Completion) {
        self.animator().badge_changed_animation(self, animated, completion);
    }

    /// Selected-then-deselected feedback for a consumed tap. A view that is already
    /// selected stays selected and only loses its highlight.
    pub fn flash(&self, animated: bool) {
        if self.is_selected() {
            self.dehighlight(animated, Completion::none());
            return;
        }
        // A select or deselect landing before the flash completes takes precedence.
        let flash_generation = self.selection_generation() + 1;
        let weak = self.downgrade();
        self.select(
            animated,
            Completion::new(move || {
                if let Some(view) = weak.upgrade()
                    && view.selection_generation() == flash_generation
                {
                    view.deselect(false, Completion::none());
                }
            }),
        );
    }
}
