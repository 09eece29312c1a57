use console::{style, StyledObject};

use crate::views::{Tone, Toned};

/// Styling helpers for terminal output
pub fn bright_yellow(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).bright().yellow()
}

pub fn bright_green(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).bright().green()
}

pub fn bright_red(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).bright().red()
}

pub fn cyan(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).cyan()
}

pub fn dim(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).dim()
}

pub fn bright(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).bright()
}

pub fn magenta_bold(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).magenta().bold()
}

pub fn toned(text: impl std::fmt::Display, tone: Tone) -> StyledObject<String> {
    let styled = style(text.to_string());
    match tone {
        Tone::Success => styled.green(),
        Tone::Failure => styled.red(),
        Tone::Active => styled.cyan(),
        Tone::Warning => styled.yellow(),
        Tone::Accent => styled.magenta(),
        Tone::Neutral => styled.dim(),
    }
}

/// Success rate colored the way the dashboard cards are.
pub fn success_rate(rate: f64) -> StyledObject<String> {
    let text = format!("{rate:.1}%");
    if rate > 80.0 {
        bright_green(text)
    } else if rate >= 50.0 {
        bright_yellow(text)
    } else {
        bright_red(text)
    }
}

/// A status or role in its own tone.
pub fn status<T: Toned + std::fmt::Display>(value: &T) -> StyledObject<String> {
    toned(value, value.tone())
}
