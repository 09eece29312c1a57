use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use crate::views::{Tone, Toned};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn create_cyan_header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

fn tone_color(tone: Tone) -> TableColor {
    match tone {
        Tone::Success => TableColor::Green,
        Tone::Failure => TableColor::Red,
        Tone::Active => TableColor::Cyan,
        Tone::Warning => TableColor::Yellow,
        Tone::Accent => TableColor::Magenta,
        Tone::Neutral => TableColor::Grey,
    }
}

/// Cell showing a status or role in its tone color.
pub fn toned_cell<T: Toned + std::fmt::Display>(value: &T) -> Cell {
    Cell::new(value.to_string()).fg(tone_color(value.tone()))
}

pub fn color_coded_success_cell(rate: f64) -> Cell {
    let text = format!("{rate:.1}%");
    if rate > 80.0 {
        Cell::new(text).fg(TableColor::Green)
    } else if rate >= 50.0 {
        Cell::new(text).fg(TableColor::Yellow)
    } else {
        Cell::new(text).fg(TableColor::Red)
    }
}

/// Progress bar cell, e.g. `██████░░░░ 60%`.
pub fn progress_cell(percentage: f64, tone: Tone) -> Cell {
    Cell::new(format!("{} {percentage:.0}%", bar(percentage, 100.0, 10))).fg(tone_color(tone))
}

/// Horizontal bar of `width` cells filled in proportion to `value / max`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
