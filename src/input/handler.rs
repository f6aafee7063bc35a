use crate::app::AppState;
use crate::countdown::CountdownPhase;
use crate::domain::{UiMode, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits, even while typing
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    if app.store.is_loading() {
        return Ok(matches!(key.code, KeyCode::Char('q') | KeyCode::Esc));
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::ConfirmClear => handle_confirm_clear_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Switch between dashboard and statistics
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_view();
            Ok(false)
        }

        // Add task, or finish the running one
        KeyCode::Enter => {
            match app.countdown.phase() {
                CountdownPhase::Idle => app.start_add_task(),
                CountdownPhase::Running | CountdownPhase::Expired => app.finish_active_task(),
            }
            Ok(false)
        }
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.start_add_task();
            Ok(false)
        }

        // Complete early / acknowledge expiry
        KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Char(' ') => {
            app.finish_active_task();
            Ok(false)
        }

        // Clear history
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.request_clear_history();
            Ok(false)
        }

        // Scroll history using [ and ]
        KeyCode::Char('[') | KeyCode::Up => {
            if app.view == View::Dashboard {
                app.scroll_history_up();
            }
            Ok(false)
        }
        KeyCode::Char(']') | KeyCode::Down => {
            if app.view == View::Dashboard {
                app.scroll_history_down();
            }
            Ok(false)
        }

        // Theme
        KeyCode::Char('t') | KeyCode::Char('T') => {
            if let Err(e) = app.cycle_theme() {
                tracing::warn!(error = %e, "could not save theme");
            }
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Pick duration
        KeyCode::Tab | KeyCode::Right | KeyCode::Down => {
            app.next_preset();
            Ok(false)
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Up => {
            app.previous_preset();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys while confirming history clear
fn handle_confirm_clear_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.confirm_clear_history();
            Ok(false)
        }

        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.cancel_clear_history();
            Ok(false)
        }

        _ => Ok(false),
    }
}
