//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{AlarmState, Severity};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for titles and highlights.
    pub highlight: Color,
    /// Color for normal-tier bars and the quiet button.
    pub normal: Color,
    /// Color for warning-tier bars and the steady warning button.
    pub warning: Color,
    /// Color for alarm-tier bars and the blinking button.
    pub alarm: Color,
    /// Dimmed background of the blinking button's "on" phase.
    pub alarm_dim: Color,
    /// Default text color on the button.
    pub button_text: Color,
    /// Color for borders and empty history slots.
    pub border: Color,
    /// Style for the window title.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            normal: Color::Green,
            warning: Color::Yellow,
            alarm: Color::Red,
            alarm_dim: Color::Rgb(51, 0, 0),
            button_text: Color::Black,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            normal: Color::Green,
            warning: Color::Yellow,
            alarm: Color::Red,
            alarm_dim: Color::Rgb(51, 0, 0),
            button_text: Color::Black,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Foreground style for a severity tier.
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Normal => Style::default().fg(self.normal),
            Severity::Warning => Style::default().fg(self.warning),
            Severity::Alarm => Style::default().fg(self.alarm).add_modifier(Modifier::BOLD),
        }
    }

    /// Background and text colors of the monitor button.
    pub fn button_colors(&self, state: AlarmState) -> (Color, Color) {
        match state {
            AlarmState::Quiet => (self.normal, self.button_text),
            AlarmState::SteadyWarn => (self.warning, self.button_text),
            AlarmState::BlinkOn => (self.alarm_dim, self.alarm),
            AlarmState::BlinkOff => (self.alarm, self.button_text),
        }
    }

    pub fn button_style(&self, state: AlarmState) -> Style {
        let (bg, fg) = self.button_colors(state);
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
    }
}
