use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions shared by both views
pub struct MainLayout {
    pub header_area: Rect,
    pub main_area: Rect,
    pub keybindings_area: Rect,
}

/// Regions of the dashboard view
pub struct DashboardLayout {
    /// Countdown or new-task form
    pub focus_area: Rect,
    pub history_area: Rect,
}

/// Split the screen into header, body and hint bar
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Active view
            Constraint::Length(1), // Keybindings bar
        ])
        .split(area);

    MainLayout {
        header_area: chunks[0],
        main_area: chunks[1],
        keybindings_area: chunks[2],
    }
}

/// Dashboard: focus card on top, history below
pub fn create_dashboard_layout(area: Rect) -> DashboardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(area);

    DashboardLayout {
        focus_area: chunks[0],
        history_area: chunks[1],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(7),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = create_layout(area);

        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.main_area.height, 38);

        let dashboard = create_dashboard_layout(layout.main_area);
        assert_eq!(dashboard.focus_area.height, 9);
        assert!(dashboard.history_area.height > 0);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 7);
    }
}
