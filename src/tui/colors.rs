//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Screen background accents, header and status bar
pub const SLATE: Color = Color::Rgb(40, 44, 52);
/// Brand purple used for the header and the focused input
pub const PURPLE: Color = Color::Rgb(136, 84, 208);
/// Completed tasks
pub const DONE_GREEN: Color = Color::Rgb(27, 163, 97);
/// Destructive confirmation
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Alerts
pub const AMBER: Color = Color::Rgb(255, 191, 0);
