//! Formatting utilities for terminal output

use crate::core::ColorToken;
use crate::session::Lives;
use colored::{ColoredString, Colorize};

/// Paint text in the terminal colour for a tile state
#[must_use]
pub fn paint(text: &str, color: ColorToken) -> ColoredString {
    match color {
        ColorToken::Neutral => text.normal(),
        ColorToken::Selected => text.bright_green().bold(),
        ColorToken::Merged => text.bright_yellow().bold(),
        ColorToken::Penalty => text.bright_red().bold(),
    }
}

/// Fit a label into exactly `width` columns, truncating with `…`
#[must_use]
pub fn fit_label(label: &str, width: usize) -> String {
    let len = label.chars().count();
    if len <= width {
        return format!("{label:<width$}");
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = label.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Hearts for remaining lives, hollow for lost ones
#[must_use]
pub fn lives_meter(lives: Lives) -> String {
    let remaining = lives.remaining() as usize;
    let lost = lives.starting().saturating_sub(lives.remaining()) as usize;
    format!("{}{}", "♥".repeat(remaining), "♡".repeat(lost))
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
