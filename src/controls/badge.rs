/*
 * Badge sizing and interior layout.
 *
 * A badge value is three-valued: `None` detaches the badge, `""` shows a dot and any
 * other string shows a pill sized around its text.
 */

use crate::styling_primitives::{Color, TextMeasurer};
use crate::types::{Point, Rect, Size};

pub const DEFAULT_BADGE_COLOR: Color = Color::rgb(0xFF, 0x3B, 0x30);

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BadgeStyle {
    /// Minimum badge size; also the size of a dot badge.
    pub size: Size,
    /// Horizontal room added around measured text.
    pub text_width_increase: f64,
    pub font_size: f64,
    pub dot_diameter: f64,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            size: Size::new(18.0, 18.0),
            text_width_increase: 10.0,
            font_size: 13.0,
            dot_diameter: 8.0,
        }
    }
}

/// Size a badge occupies for `value`, or `None` when the badge is detached.
pub fn badge_size(
    value: Option<&str>,
    style: &BadgeStyle,
    measurer: &dyn TextMeasurer,
) -> Option<Size> {
    let value = value?;
    if value.is_empty() {
        return Some(style.size);
    }
    let text = measurer.measure(value, style.font_size);
    Some(size_for_text_width(style, text.width))
}

pub fn size_for_text_width(style: &BadgeStyle, text_width: f64) -> Size {
    Size::new(
        style.size.width.max(text_width + style.text_width_increase),
        style.size.height,
    )
}

/// Where the badge paints its fill and label, in badge-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeInterior {
    pub fill: Rect,
    pub corner_radius: f64,
    pub label_center: Point,
}

pub fn badge_interior(value: Option<&str>, bounds: Size, style: &BadgeStyle) -> Option<BadgeInterior> {
    let value = value?;
    let local = Rect::from_origin_size(Point::ZERO, bounds);
    let fill = if value.is_empty() {
        Rect::centered_at(
            local.center(),
            Size::new(style.dot_diameter, style.dot_diameter),
        )
    } else {
        local
    };
    Some(BadgeInterior {
        fill,
        corner_radius: fill.height / 2.0,
        label_center: fill.center(),
    })
}
