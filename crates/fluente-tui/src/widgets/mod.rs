//! Reusable widgets.

pub mod query_select;

pub use query_select::QuerySelect;

use ratatui::layout::Rect;

/// A rect of `width` x `height` centered inside `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
