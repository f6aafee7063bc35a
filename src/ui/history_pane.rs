use crate::app::AppState;
use crate::domain::{Task, Theme};
use crate::ui::styles::{border_style, default_style, early_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Create a line for a completed task
fn create_history_line(task: &Task, theme: Theme) -> Line<'_> {
    let mut spans = Vec::new();

    spans.push(Span::styled(
        format!("{}  ", task.completed_at_formatted()),
        hint_style(theme),
    ));
    spans.push(Span::styled("✓ ", early_style()));
    spans.push(Span::styled(task.text.as_str(), default_style(theme)));
    spans.push(Span::raw("  "));

    let duration = format!("({} / {} min)", task.actual_formatted(), task.planned_minutes());
    if task.finished_early() {
        spans.push(Span::styled(duration, early_style()));
        spans.push(Span::styled(" early", early_style()));
    } else {
        spans.push(Span::styled(duration, hint_style(theme)));
    }

    Line::from(spans)
}

/// Render the completed tasks pane, newest first
pub fn render_history_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();
    let completed = app.store.completed_tasks();

    let items: Vec<ListItem> = completed
        .iter()
        .skip(app.history_scroll_offset)
        .map(|task| ListItem::new(create_history_line(task, theme)))
        .collect();

    let count = completed.len();

    let title = if count == 0 {
        " Completed Tasks (0) ".to_string()
    } else if app.history_scroll_offset > 0 {
        format!(
            " Completed Tasks ({}) [scrolled +{}] ",
            count, app.history_scroll_offset
        )
    } else {
        format!(" Completed Tasks ({}) ", count)
    };

    let list = List::new(items).style(default_style(theme)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(theme))
            .title(Span::styled(title, title_style(theme))),
    );

    f.render_widget(list, area);
}
