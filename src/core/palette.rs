use image::Rgba;

use crate::core::renderer::RenderError;

pub const DEFAULT_THEME: &str = "github";

const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 0xff])
}

// Most intense first, empty-day colour last.
const GITHUB: [Rgba<u8>; 5] = [rgb(0x216e39), rgb(0x30a14e), rgb(0x40c463), rgb(0x9be9a8), rgb(0xebedf0)];
const HALLOWEEN: [Rgba<u8>; 5] = [rgb(0x03001c), rgb(0xfe9600), rgb(0xffc501), rgb(0xffee4a), rgb(0xebedf0)];
const DARK: [Rgba<u8>; 5] = [rgb(0x39d353), rgb(0x26a641), rgb(0x006d32), rgb(0x0e4429), rgb(0x161b22)];
const OCEAN: [Rgba<u8>; 5] = [rgb(0x0a3069), rgb(0x0969da), rgb(0x54aeff), rgb(0xb6e3ff), rgb(0xebedf0)];

/// A named colour ramp used to shade heat-map cells
///
/// `palette[0]` is drawn for the busiest day and the last entry for days
/// without contributions.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub palette: Vec<Rgba<u8>>,
}

impl Theme {
    /// Build a custom theme; the palette must hold at least one colour
    pub fn new(name: impl Into<String>, palette: Vec<Rgba<u8>>) -> Result<Self, RenderError> {
        if palette.is_empty() {
            return Err(RenderError::EmptyPalette);
        }
        Ok(Self { name: name.into(), palette })
    }

    /// Look up a built-in theme, ignoring case
    pub fn by_name(name: &str) -> Option<Self> {
        let palette = match name.to_ascii_lowercase().as_str() {
            "github" => GITHUB,
            "halloween" => HALLOWEEN,
            "dark" => DARK,
            "ocean" => OCEAN,
            _ => return None,
        };
        Some(Self {
            name: name.to_ascii_lowercase(),
            palette: palette.to_vec(),
        })
    }

    pub fn available() -> &'static [&'static str] {
        &["github", "halloween", "dark", "ocean"]
    }

    /// Colour for a day with `count` contributions when the busiest day has `max_count`
    #[inline]
    pub fn color_for(&self, count: u32, max_count: u32) -> Rgba<u8> {
        self.palette[palette_index(count, max_count, self.palette.len())]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            palette: GITHUB.to_vec(),
        }
    }
}

/// Bucket a count into a palette slot
///
/// `level = count / max_count` (0 when `max_count` is 0) and the slot is
/// `floor((1 - level) * (len - 1))`, so the maximum lands on slot 0 and
/// zero lands on the last slot.
#[inline]
pub fn palette_index(count: u32, max_count: u32, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let last = len - 1;
    let level = if max_count == 0 {
        0.0
    } else {
        (count as f64 / max_count as f64).min(1.0)
    };
    let index = ((1.0 - level) * last as f64).floor() as usize;
    index.min(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_count_maps_to_first_slot() {
        assert_eq!(palette_index(10, 10, 5), 0);
    }

    #[test]
    fn test_zero_count_maps_to_last_slot() {
        assert_eq!(palette_index(0, 10, 5), 4);
    }

    #[test]
    fn test_all_zero_series_does_not_divide_by_zero() {
        assert_eq!(palette_index(0, 0, 5), 4);
    }

    #[test]
    fn test_intermediate_buckets() {
        assert_eq!(palette_index(5, 10, 5), 2);
        assert_eq!(palette_index(1, 10, 5), 3);
        assert_eq!(palette_index(9, 10, 5), 0);
    }

    #[test]
    fn test_single_colour_palette() {
        assert_eq!(palette_index(0, 10, 1), 0);
        assert_eq!(palette_index(10, 10, 1), 0);
    }

    #[test]
    fn test_theme_lookup_is_case_insensitive() {
        let theme = Theme::by_name("Halloween").unwrap();
        assert_eq!(theme.name, "halloween");
        assert_eq!(theme.palette.len(), 5);
        assert!(Theme::by_name("neon").is_none());
    }

    #[test]
    fn test_every_listed_theme_resolves() {
        for name in Theme::available() {
            assert!(Theme::by_name(name).is_some(), "missing theme {}", name);
        }
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(matches!(Theme::new("empty", vec![]), Err(RenderError::EmptyPalette)));
    }

    #[test]
    fn test_default_theme_colours() {
        let theme = Theme::default();
        assert_eq!(theme.color_for(0, 10), rgb(0xebedf0));
        assert_eq!(theme.color_for(10, 10), rgb(0x216e39));
    }
}
