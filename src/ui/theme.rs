use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue: resting elements
    pub secondary: Color, // Orange: comparisons
    pub comment: Color,   // Grey
    pub success: Color,   // Green: sorted positions and MST edges
    pub error: Color,     // Red: active swaps
    pub accent: Color,    // Purple: heapify visits
    pub root: Color,      // Teal: heap root
    pub status_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    accent: Color::Rgb(203, 166, 247),
    root: Color::Rgb(148, 226, 213),
    status_bg: Color::Rgb(50, 50, 70),
};
