use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Split-pane layout
pub struct AppLayout {
    pub search_area: Rect,
    pub list_area: Rect,
    pub report_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Search input: top row
    /// - History list: 40% width (left)
    /// - Report pane: 60% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Search input
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(vertical_chunks[1]);

        Self {
            search_area: vertical_chunks[0],
            list_area: horizontal_chunks[0],
            report_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}
