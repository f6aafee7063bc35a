use crate::app::AppState;
use crate::countdown::CountdownPhase;
use crate::domain::{UiMode, View};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hints for the current mode and view
fn hints(app: &AppState) -> &'static str {
    match app.ui_mode {
        UiMode::EditingTask => " type task   ←/→ duration   Enter start   Esc cancel",
        UiMode::ConfirmClear => " y clear history   n/Esc keep",
        UiMode::Normal if app.store.is_loading() => " q quit",
        UiMode::Normal => match (app.view, app.countdown.phase()) {
            (View::Statistics, _) => " Tab dashboard   t theme   q quit",
            (View::Dashboard, CountdownPhase::Idle) => {
                " Enter/a new task   [/] scroll   c clear   Tab stats   t theme   q quit"
            }
            (View::Dashboard, CountdownPhase::Running) => {
                " Enter/f complete early   [/] scroll   Tab stats   t theme   q quit"
            }
            (View::Dashboard, CountdownPhase::Expired) => {
                " Enter/f complete task   Tab stats   q quit"
            }
        },
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints(app))).style(hint_style(app.theme()));
    f.render_widget(paragraph, area);
}
