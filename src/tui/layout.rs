//! Layout definitions for the TUI
//!
//! Tab bar on top, the active list on the left, the budget analysis panel on
//! the right, status bar at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Tab bar (Expenses / Categories / Budgets)
    pub tabs: Rect,
    /// Active list
    pub main: Rect,
    /// Spend vs budget panel
    pub analysis: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(40),    // List
                Constraint::Length(44), // Analysis
            ])
            .split(vertical[1]);

        Self {
            tabs: vertical[0],
            main: horizontal[0],
            analysis: horizontal[1],
            status_bar: vertical[2],
        }
    }
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_cover_screen() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.tabs.height, 3);
        assert_eq!(layout.status_bar.y, 39);
        assert_eq!(layout.analysis.width, 44);
        assert_eq!(layout.main.width + layout.analysis.width, 120);
    }

    #[test]
    fn test_fixed_rect_is_clamped() {
        let area = Rect::new(0, 0, 40, 8);
        let popup = centered_rect_fixed(60, 10, area);
        assert_eq!(popup, Rect::new(0, 0, 40, 8));

        let popup = centered_rect_fixed(20, 4, area);
        assert_eq!(popup, Rect::new(10, 2, 20, 4));
    }
}
