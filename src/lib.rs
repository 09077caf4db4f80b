/*
 * Provides the public entry point for the tabstripui crate, the platform-independent
 * core of a custom-rendered tab strip that sits on top of a host navigation framework.
 *
 * The crate computes where every item goes, runs each item's selection/highlight state
 * machine, extends hit-testing to enlarged item visuals and lets host code intercept
 * taps before they select. Drawing, animation curves and the host's own chrome stay
 * with the host; they are reached through the `NavigationHost`, `StripDelegate`,
 * `ContentAnimator` and `TextMeasurer` traits so everything here runs headless.
 */
pub mod controller;
pub(crate) mod controls;
pub mod error;
pub mod styling_primitives;
pub mod types;

pub use controller::{Controller, NavigationHost};
pub use controls::badge::{
    BadgeInterior, BadgeStyle, DEFAULT_BADGE_COLOR, badge_interior, badge_size,
    size_for_text_width,
};
pub use controls::content_view::{
    Completion, ContentAnimator, ContentLayout, ContentMetrics, ContentView, ContentViewState,
    DisplayAttributes, Icon, NoAnimation, RenderingMode, arrange_content, display_attributes,
};
pub use controls::item_container::{ItemContainer, request_for_event};
pub use controls::positioning::{PositioningConfig, PositioningMode, compute_item_frames};
pub use controls::tab_strip::{
    InteractionOutcome, NativeButton, SelectOutcome, StripDelegate, TabStrip, TabStripConfig,
};
pub use error::{Result as StripResult, StripError};
pub use styling_primitives::{Color, ContentPalette, FixedAdvanceMeasurer, TextMeasurer};
pub use types::{
    CONTAINER_TAG_BASE, ContainerAction, ContainerEvent, ContainerTag, EdgeInsets,
    InteractionRequest, Offset, Point, Rect, Size, StripId, TabItem,
};
