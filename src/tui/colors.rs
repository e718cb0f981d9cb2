// Colour palette
use ratatui::style::Color;

pub const BG_DARK: Color = Color::Rgb(10, 12, 30);
pub const TEXT_PRIMARY: Color = Color::Rgb(235, 235, 245);
pub const TEXT_SECONDARY: Color = Color::Rgb(160, 165, 190);
pub const TEXT_MUTED: Color = Color::Rgb(100, 104, 130);
pub const BORDER_COLOR: Color = Color::Rgb(60, 66, 110);
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(255, 232, 31);
pub const ACCENT_LABEL: Color = Color::Rgb(135, 190, 235);
/// Background of the revealed swipe action
pub const ACCENT_ACTION: Color = Color::Rgb(255, 140, 0);
