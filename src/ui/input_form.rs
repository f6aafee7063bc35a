use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{
    border_style, default_style, error_style, hint_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the new-task form (or the idle prompt when the form is closed)
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();
    let form = &app.input_form;
    let editing = app.ui_mode == UiMode::EditingTask;

    let mut lines = Vec::new();

    if !editing {
        lines.push(Line::raw(""));
        lines.push(Line::styled("  Nothing in focus.", default_style(theme)));
        lines.push(Line::styled(
            "  Press Enter to pick one task and a duration.",
            hint_style(theme),
        ));
    } else {
        // Task text
        lines.push(Line::raw("What will you focus on?"));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.text.as_str(), title_style(theme)),
            Span::styled("█", title_style(theme)), // Cursor
        ]));
        lines.push(Line::raw(""));

        // Duration presets
        let mut presets = vec![Span::raw("Duration: ")];
        for (idx, minutes) in app.presets.iter().enumerate() {
            let label = format!(" {} min ", minutes);
            if idx == form.preset_index {
                presets.push(Span::styled(label, selected_style(theme)));
            } else {
                presets.push(Span::styled(label, default_style(theme)));
            }
            presets.push(Span::raw(" "));
        }
        lines.push(Line::from(presets));
        lines.push(Line::raw(""));

        if let Some(error) = &form.error {
            lines.push(Line::styled(error.as_str(), error_style()));
        } else {
            lines.push(Line::styled(
                "Enter to start  ·  ←/→ duration  ·  Esc to cancel",
                hint_style(theme),
            ));
        }
    }

    let paragraph = Paragraph::new(lines)
        .style(default_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(theme))
                .title(Span::styled(" New Task ", title_style(theme))),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
