pub mod history_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod stats_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::View;
use history_pane::render_history_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::{create_dashboard_layout, create_layout};
use modal::render_confirm_clear_modal;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use stats_pane::render_stats_pane;
use styles::{default_style, hint_style, title_style};
use timer_pane::render_timer_pane;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// App name, current view and theme
fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme();
    let line = Line::from(vec![
        Span::styled(" OneTask ", title_style(theme)),
        Span::styled(format!("· {} ", app.view.title()), default_style(theme)),
        Span::styled(format!("· {} theme", theme.name()), hint_style(theme)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Shown until the snapshot has been loaded
fn render_loading(f: &mut Frame, app: &AppState, area: Rect) {
    let frame = SPINNER[(app.spinner_frame as usize) % SPINNER.len()];
    let paragraph = Paragraph::new(format!("{} Loading tasks...", frame))
        .style(hint_style(app.theme()))
        .alignment(Alignment::Center);
    let row = Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    };
    f.render_widget(paragraph, row);
}

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    // Paint the theme background first
    f.render_widget(Block::default().style(default_style(app.theme())), size);

    render_header(f, app, layout.header_area);
    render_keybindings(f, app, layout.keybindings_area);

    if app.store.is_loading() {
        render_loading(f, app, layout.main_area);
        return;
    }

    match app.view {
        View::Dashboard => {
            let dashboard = create_dashboard_layout(layout.main_area);
            if app.store.active_task().is_some() {
                render_timer_pane(f, app, dashboard.focus_area);
            } else {
                render_input_form(f, app, dashboard.focus_area);
            }
            render_history_pane(f, app, dashboard.history_area);
        }
        View::Statistics => render_stats_pane(f, app, layout.main_area),
    }

    render_confirm_clear_modal(f, app, size);
}
