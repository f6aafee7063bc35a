use crate::domain::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Primary accent color for the theme
fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::LightCyan,
        Theme::Retro => Color::LightGreen,
    }
}

/// Default text style
pub fn default_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
        Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
        Theme::Retro => Style::default().fg(Color::Green).bg(Color::Black),
    }
}

/// Title style for panes
pub fn title_style(theme: Theme) -> Style {
    Style::default()
        .fg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::DarkGray),
        Theme::Dark => Style::default().fg(Color::Gray),
        Theme::Retro => Style::default().fg(Color::Green),
    }
}

/// Big countdown digits
pub fn clock_style(theme: Theme) -> Style {
    Style::default()
        .fg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Countdown gauge
pub fn gauge_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Blue).bg(Color::Gray),
        Theme::Dark => Style::default().fg(Color::LightCyan).bg(Color::DarkGray),
        Theme::Retro => Style::default().fg(Color::LightGreen).bg(Color::Black),
    }
}

/// Time's-up banner
pub fn expired_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
}

/// Tasks finished ahead of plan
pub fn early_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Muted text (timestamps, hints)
pub fn hint_style(theme: Theme) -> Style {
    match theme {
        Theme::Retro => Style::default().fg(Color::Green),
        _ => Style::default().fg(Color::DarkGray),
    }
}

/// Selected preset in the form
pub fn selected_style(theme: Theme) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
