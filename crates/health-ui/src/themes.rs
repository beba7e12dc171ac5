use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Styles used by the chart and table views.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub warning: Style,

    // ── Chart ────────────────────────────────────────────────────────────────
    pub axis: Style,
    /// Average steps line.
    pub series_steps: Style,
    /// Average sleep line.
    pub series_sleep: Style,
    /// Average water line.
    pub series_water: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            warning: Style::default().fg(Color::Yellow),

            axis: Style::default().fg(Color::Gray),
            series_steps: Style::default().fg(Color::Cyan),
            series_sleep: Style::default().fg(Color::Magenta),
            series_water: Style::default().fg(Color::Green),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and saturated accents for the series so
    /// lines stay visible on a white canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            warning: Style::default().fg(Color::Yellow),

            axis: Style::default().fg(Color::DarkGray),
            series_steps: Style::default().fg(Color::Blue),
            series_sleep: Style::default().fg(Color::Magenta),
            series_water: Style::default().fg(Color::Green),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette,
    /// without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            warning: Style::default().fg(Color::Yellow),

            axis: Style::default().fg(Color::White),
            series_steps: Style::default().fg(Color::Cyan),
            series_sleep: Style::default().fg(Color::Magenta),
            series_water: Style::default().fg(Color::Green),

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names (including `"auto"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
