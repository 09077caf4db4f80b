/*
 * Styling primitives that stay independent of any rendering backend: colors, the
 * normal/selected palette a content view maps its state onto, and the text
 * measurement seam through which the host's text engine sizes titles and badges.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_clear(&self) -> bool {
        self.a == 0
    }
}

fn default_inactive() -> Color {
    Color::rgb(0x92, 0x92, 0x92)
}
fn default_active() -> Color {
    Color::rgb(0x00, 0x7A, 0xFF)
}

/// Colors a content view switches between when it becomes selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentPalette {
    pub text: Color,
    pub highlight_text: Color,
    pub icon: Color,
    pub highlight_icon: Color,
    pub backdrop: Color,
    pub highlight_backdrop: Color,
}

impl Default for ContentPalette {
    fn default() -> Self {
        Self {
            text: default_inactive(),
            highlight_text: default_active(),
            icon: default_inactive(),
            highlight_icon: default_active(),
            backdrop: Color::CLEAR,
            highlight_backdrop: Color::CLEAR,
        }
    }
}

/// Host text engine. Returns the natural single-line size of `text` at `font_size`.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> crate::types::Size;
}

/// Deterministic measurer for headless hosts and tests: every character advances by
/// a fixed fraction of the font size and lines are `line_height` font sizes tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasurer {
    pub advance: f64,
    pub line_height: f64,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> crate::types::Size {
        let chars = text.chars().count() as f64;
        crate::types::Size::new(
            chars * self.advance * font_size,
            self.line_height * font_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_uses_gray_and_blue() {
        let palette = ContentPalette::default();
        assert_eq!(palette.text, Color::rgb(0x92, 0x92, 0x92));
        assert_eq!(palette.highlight_icon, Color::rgb(0x00, 0x7A, 0xFF));
        assert!(palette.backdrop.is_clear());
        assert!(palette.highlight_backdrop.is_clear());
    }

    #[test]
    fn fixed_advance_measurer_scales_with_font_size() {
        let measurer = FixedAdvanceMeasurer { advance: 0.5, line_height: 1.0 };
        let size = measurer.measure("abcd", 10.0);
        assert_eq!(size.width, 20.0);
        assert_eq!(size.height, 10.0);
        assert_eq!(measurer.measure("", 13.0).width, 0.0);
    }
}
