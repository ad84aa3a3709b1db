// Centralized theme - all colors and styles live here

use ratatui::style::{Color, Modifier, Style};

/// App background
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Sticky overlay background - subtle lift from black
pub const BG_OVERLAY: Color = Color::Rgb(24, 24, 28);

/// Primary text - off-white for readability
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

/// Secondary/muted text (timestamps, hints)
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Dimmed text for placeholders
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

/// Host accent - muted amber
pub const ACCENT_HOST: Color = Color::Rgb(214, 157, 86);

/// Pinned-message accent - gold
pub const ACCENT_PIN: Color = Color::Rgb(212, 190, 90);

/// Live push connection indicator - muted green
pub const ACCENT_LIVE: Color = Color::Rgb(106, 153, 85);

/// Degraded (polling) indicator - muted orange
pub const ACCENT_DEGRADED: Color = Color::Rgb(206, 145, 120);

const USER_PALETTE: [Color; 6] = [
    Color::Rgb(86, 156, 214),
    Color::Rgb(156, 120, 214),
    Color::Rgb(78, 176, 160),
    Color::Rgb(214, 120, 130),
    Color::Rgb(120, 170, 100),
    Color::Rgb(190, 150, 90),
];

/// Deterministic per-sender color so authors stay recognizable across frames.
pub fn user_color(sender: &str) -> Color {
    let hash: usize = sender.bytes().map(|b| b as usize).sum();
    USER_PALETTE[hash % USER_PALETTE.len()]
}

pub fn author_style(sender: &str, is_host: bool) -> Style {
    let color = if is_host { ACCENT_HOST } else { user_color(sender) };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
