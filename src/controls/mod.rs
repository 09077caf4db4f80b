/*
 * The strip's building blocks. `tab_strip` orchestrates the others: `positioning`
 * places containers, `item_container` hosts one `content_view` each and `badge`
 * sizes the badge a content view may carry.
 */
pub(crate) mod badge;
pub(crate) mod content_view;
pub(crate) mod item_container;
pub(crate) mod positioning;
pub(crate) mod tab_strip;
