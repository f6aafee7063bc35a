use crate::app::AppState;
use crate::countdown::CountdownPhase;
use crate::domain::{format_clock, format_minutes};
use crate::ui::styles::{
    border_style, clock_style, default_style, expired_style, gauge_style, hint_style, title_style,
};
use chrono::{Local, TimeZone};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Render the countdown for the active task
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();
    let Some(task) = app.store.active_task() else {
        return;
    };

    let expired = app.countdown.phase() == CountdownPhase::Expired;
    let title = if expired { " Time's up " } else { " Focusing " };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(title, title_style(theme)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Task text
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Gauge
            Constraint::Min(0),    // Status
        ])
        .split(inner);

    let text = Paragraph::new(task.text.as_str())
        .style(default_style(theme))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(text, rows[0]);

    let clock = Paragraph::new(Span::styled(
        format_clock(app.countdown.remaining_seconds()),
        if expired { expired_style() } else { clock_style(theme) },
    ))
    .alignment(Alignment::Center);
    f.render_widget(clock, rows[1]);

    let percent = app.countdown.progress().clamp(0.0, 100.0).round() as u16;
    let gauge = Gauge::default()
        .block(Block::default())
        .gauge_style(gauge_style(theme))
        .percent(percent)
        .label("");
    f.render_widget(gauge, rows[3]);

    let status = if expired {
        let bell = if app.countdown.is_alert_playing() { "🔔 " } else { "" };
        Line::from(vec![Span::styled(
            format!("{}Time's up! Press Enter to complete the task", bell),
            expired_style(),
        )])
    } else {
        let ends_at = app
            .countdown
            .end_timestamp()
            .and_then(|end| Local.timestamp_millis_opt(end).single())
            .map(|dt| format!("  ·  ends {}", dt.format("%H:%M")))
            .unwrap_or_default();
        Line::from(vec![Span::styled(
            format!("{} planned{}", format_minutes(task.planned_minutes()), ends_at),
            hint_style(theme),
        )])
    };
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), rows[4]);
}
