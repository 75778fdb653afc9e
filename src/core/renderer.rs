use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

use crate::core::palette::Theme;
use crate::models::CombinedSeries;

pub const SQUARE_SIZE: u32 = 10;
pub const GAP: u32 = 2;
pub const WEEK_WIDTH: u32 = SQUARE_SIZE + GAP;
pub const WEEKS: u32 = 53;
pub const DAYS_PER_WEEK: u32 = 7;
pub const HEADER_HEIGHT: u32 = 20;

pub const CANVAS_WIDTH: u32 = WEEKS * WEEK_WIDTH;
pub const CANVAS_HEIGHT: u32 = DAYS_PER_WEEK * WEEK_WIDTH + HEADER_HEIGHT;

const LABEL_X: u32 = 10;
const LABEL_BASELINE: u32 = 15;
const GLYPH_SIZE: u32 = 8;
const LABEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 0xff]);

/// Errors raised while merging or rasterizing a heat-map
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No contribution calendars to combine")]
    NoCalendars,

    #[error("Cannot render an empty contribution series")]
    EmptySeries,

    #[error("Theme palette must contain at least one colour")]
    EmptyPalette,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Rasterize a combined series onto the fixed 53x7 grid
///
/// Cells are laid out column-major (one column per week) below a 20px
/// header band. The username label is drawn last so it stays on top.
pub fn render(
    series: &CombinedSeries,
    theme: &Theme,
    usernames: &[String],
) -> Result<RgbaImage, RenderError> {
    let max_count = series.max_count().ok_or(RenderError::EmptySeries)?;
    if theme.palette.is_empty() {
        return Err(RenderError::EmptyPalette);
    }

    let mut canvas = RgbaImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    for (i, &count) in series.contributions.iter().enumerate() {
        let week = (i / DAYS_PER_WEEK as usize) as u32;
        let day = (i % DAYS_PER_WEEK as usize) as u32;
        if week >= WEEKS {
            tracing::debug!("Series has {} days, clipping past week {}", series.len(), WEEKS);
            break;
        }

        let x = week * WEEK_WIDTH;
        let y = day * WEEK_WIDTH + HEADER_HEIGHT;
        fill_rect(&mut canvas, x, y, SQUARE_SIZE, SQUARE_SIZE, theme.color_for(count, max_count));
    }

    let label = format!("Usernames: {}", usernames.join(", "));
    draw_text(&mut canvas, &label, LABEL_X, LABEL_BASELINE - GLYPH_SIZE, LABEL_COLOR);

    Ok(canvas)
}

/// Render and encode as PNG bytes
pub fn render_png(
    series: &CombinedSeries,
    theme: &Theme,
    usernames: &[String],
) -> Result<Vec<u8>, RenderError> {
    let canvas = render(series, theme, usernames)?;
    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = (x + width).min(canvas.width());
    let y_end = (y + height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

/// Draw `text` with the 8x8 bitmap font, `top` being the first glyph row
fn draw_text(canvas: &mut RgbaImage, text: &str, left: u32, top: u32, color: Rgba<u8>) {
    let fallback = BASIC_FONTS.get('?').unwrap_or([0; 8]);

    for (n, ch) in text.chars().enumerate() {
        let origin_x = left + n as u32 * GLYPH_SIZE;
        if origin_x >= canvas.width() {
            break;
        }
        let glyph = BASIC_FONTS.get(ch).unwrap_or(fallback);

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let (px, py) = (origin_x + col, top + row as u32);
                if px < canvas.width() && py < canvas.height() {
                    canvas.put_pixel(px, py, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(counts: Vec<u32>) -> CombinedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        CombinedSeries {
            dates: (0..counts.len())
                .map(|i| start + chrono::Duration::days(i as i64))
                .collect(),
            contributions: counts,
        }
    }

    fn names() -> Vec<String> {
        vec!["octocat".to_string()]
    }

    #[test]
    fn test_canvas_dimensions() {
        assert_eq!(CANVAS_WIDTH, 636);
        assert_eq!(CANVAS_HEIGHT, 104);

        let image = render(&series(vec![1; 371]), &Theme::default(), &names()).unwrap();
        assert_eq!(image.dimensions(), (636, 104));
    }

    #[test]
    fn test_cell_placement_and_colour() {
        let theme = Theme::default();
        // day 8 = week 1, weekday 1
        let mut counts = vec![0; 14];
        counts[8] = 10;
        let image = render(&series(counts), &theme, &names()).unwrap();

        let busy = image.get_pixel(WEEK_WIDTH + 5, WEEK_WIDTH + HEADER_HEIGHT + 5);
        assert_eq!(*busy, theme.palette[0]);

        let idle = image.get_pixel(WEEK_WIDTH + 5, HEADER_HEIGHT + 5);
        assert_eq!(*idle, theme.palette[4]);

        // gap between squares stays transparent
        let gap = image.get_pixel(SQUARE_SIZE, HEADER_HEIGHT + 5);
        assert_eq!(gap.0[3], 0);
    }

    #[test]
    fn test_all_zero_series_uses_last_colour() {
        let theme = Theme::default();
        let image = render(&series(vec![0; 7]), &theme, &names()).unwrap();
        for day in 0..7 {
            let pixel = image.get_pixel(5, day * WEEK_WIDTH + HEADER_HEIGHT + 5);
            assert_eq!(*pixel, theme.palette[4]);
        }
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let result = render(&CombinedSeries::default(), &Theme::default(), &names());
        assert!(matches!(result, Err(RenderError::EmptySeries)));
    }

    #[test]
    fn test_overlong_series_is_clipped() {
        let image = render(&series(vec![3; 400]), &Theme::default(), &names()).unwrap();
        assert_eq!(image.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    }

    #[test]
    fn test_label_is_drawn_in_header() {
        let image = render(&series(vec![0; 7]), &Theme::default(), &names()).unwrap();
        let label_pixels = (LABEL_X..LABEL_X + 11 * GLYPH_SIZE)
            .flat_map(|x| (LABEL_BASELINE - GLYPH_SIZE..LABEL_BASELINE).map(move |y| (x, y)))
            .filter(|&(x, y)| *image.get_pixel(x, y) == LABEL_COLOR)
            .count();
        assert!(label_pixels > 0);
    }

    #[test]
    fn test_png_round_trip_dimensions() {
        let bytes = render_png(&series(vec![1, 2, 3]), &Theme::default(), &names()).unwrap();
        assert!(!bytes.is_empty());

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.width(), CANVAS_WIDTH);
        assert_eq!(decoded.height(), CANVAS_HEIGHT);
    }
}
