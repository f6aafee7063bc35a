use crate::app::AppState;
use crate::domain::{format_minutes, Theme};
use crate::report::{TaskStats, RECENT_DAYS};
use crate::ui::styles::{border_style, default_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};

fn card(title: &str, theme: Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(format!(" {} ", title), title_style(theme)))
}

fn stat_line<'a>(label: &'a str, value: String, theme: Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, title_style(theme)),
        Span::styled(value, default_style(theme)),
    ])
}

/// Total tasks, total time and early completions
fn render_overall_card(f: &mut Frame, stats: &TaskStats, theme: Theme, area: Rect) {
    let block = card("Overall", theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let early = match stats.completed_early_percent() {
        Some(percent) => format!("{} ({}%)", stats.completed_early_count, percent),
        None => "0".to_string(),
    };

    let lines = vec![
        stat_line("Total Tasks: ", stats.total_tasks.to_string(), theme),
        stat_line("Total Time: ", format_minutes(stats.total_time_minutes), theme),
        stat_line("Completed Early: ", early, theme),
    ];
    f.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(theme))
        .percent(stats.completed_early_percent().unwrap_or(0).clamp(0, 100) as u16)
        .label("");
    f.render_widget(gauge, chunks[1]);
}

/// Average duration and most productive day
fn render_time_card(f: &mut Frame, stats: &TaskStats, theme: Theme, area: Rect) {
    let block = card("Time Management", theme);

    let most_productive = match stats.most_productive_day {
        Some(day) => format!(
            "{} ({} tasks)",
            day.format("%a %b %-d, %Y"),
            stats.most_productive_count()
        ),
        None => "-".to_string(),
    };

    let lines = vec![
        stat_line(
            "Average Duration: ",
            format!("{} minutes", stats.average_duration_minutes),
            theme,
        ),
        stat_line("Most Productive Day: ", most_productive, theme),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Per-day counts, newest first
fn render_recent_days(f: &mut Frame, stats: &TaskStats, theme: Theme, area: Rect) {
    let block = card(&format!("Last {} Days", RECENT_DAYS), theme);
    let recent = stats.recent_days(RECENT_DAYS);

    if recent.is_empty() {
        let empty = Paragraph::new(Line::styled("No completed tasks yet", hint_style(theme)))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let max = recent.iter().map(|(_, count)| *count).max().unwrap_or(1).max(1);
    let rows: Vec<Row> = recent
        .iter()
        .map(|(day, count)| {
            let bar_width = (*count * 20).div_ceil(max);
            Row::new(vec![
                day.format("%a %Y-%m-%d").to_string(),
                count.to_string(),
                "█".repeat(bar_width),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(15), Constraint::Length(6), Constraint::Min(0)],
    )
    .header(Row::new(vec!["Date", "Tasks", ""]).style(title_style(theme)))
    .style(default_style(theme))
    .block(block);

    f.render_widget(table, area);
}

/// Render the statistics view
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();
    let stats = app.stats();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(area);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_overall_card(f, &stats, theme, cards[0]);
    render_time_card(f, &stats, theme, cards[1]);
    render_recent_days(f, &stats, theme, rows[1]);
}
