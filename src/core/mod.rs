// Core algorithm exports
pub mod aggregator;
pub mod palette;
pub mod renderer;

pub use aggregator::{combine, combine_by_date, combine_with};
pub use palette::{palette_index, Theme, DEFAULT_THEME};
pub use renderer::{render, render_png, RenderError, CANVAS_HEIGHT, CANVAS_WIDTH};
