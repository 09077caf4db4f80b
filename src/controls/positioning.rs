/*
 * Positioning engine: computes the frame of every item container.
 *
 * `Automatic`, `Fill` and `Centered` reuse the host's native button frames one-to-one
 * by slot. The two custom fill modes divide the strip themselves, edge to edge, with
 * optional fixed item width and spacing. The computation is a pure function of its
 * inputs, so repeated layout passes always agree.
 */

use crate::error::{Result as StripResult, StripError, report};
use crate::types::{EdgeInsets, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositioningMode {
    #[default]
    Automatic,
    Fill,
    Centered,
    /// Custom fill that leaves the 1-unit top separator line uncovered.
    FillExcludeSeparator,
    /// Custom fill that covers the separator line.
    FillIncludeSeparator,
}

impl PositioningMode {
    /// True when frames come from the host's native buttons.
    pub fn is_native(self) -> bool {
        matches!(self, Self::Automatic | Self::Fill | Self::Centered)
    }

    /// The native positioning the host should apply for this mode, if any.
    pub fn native_equivalent(self) -> Option<PositioningMode> {
        self.is_native().then_some(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositioningConfig {
    pub mode: PositioningMode,
    pub edge_insets: EdgeInsets,
    /// Fixed width per item; `0` divides the available width evenly.
    pub item_width: f64,
    /// Gap between neighbouring items; `0` for none.
    pub item_spacing: f64,
}

/// Frames for `count` containers inside a strip of size `bounds`.
///
/// `native_frames` are the host's button frames ordered left to right; they are only
/// consulted for native modes.
pub fn compute_item_frames(
    bounds: Size,
    config: &PositioningConfig,
    count: usize,
    native_frames: &[Rect],
) -> StripResult<Vec<Rect>> {
    if count == 0 {
        return Err(report(StripError::EmptyItems));
    }

    if config.mode.is_native() {
        if native_frames.len() < count {
            log::warn!(
                "[Positioning] {} native frames for {count} containers; missing slots get an empty frame",
                native_frames.len()
            );
        }
        return Ok((0..count)
            .map(|idx| native_frames.get(idx).copied().unwrap_or(Rect::ZERO))
            .collect());
    }

    let insets = config.edge_insets;
    let mut x = insets.left;
    let mut y = insets.top;
    if config.mode == PositioningMode::FillExcludeSeparator && y <= 0.0 {
        y += 1.0;
    }
    let width = bounds.width - insets.left - insets.right;
    let height = bounds.height - y - insets.bottom;
    let each_width = if config.item_width != 0.0 {
        config.item_width
    } else {
        width / count as f64
    };
    let spacing = config.item_spacing;

    let mut frames = Vec::with_capacity(count);
    for _ in 0..count {
        frames.push(Rect::new(x, y, each_width, height));
        x += each_width + spacing;
    }
    log::trace!(
        "[Positioning] {:?}: {count} items of {each_width}x{height} from ({}, {y})",
        config.mode,
        insets.left
    );
    Ok(frames)
}
