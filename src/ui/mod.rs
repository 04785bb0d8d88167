//! Terminal rendering of the monitor using ratatui.
//!
//! [`ViewBinder`] pushes the monitor's numbers onto the screen: a button whose
//! colors follow the alarm state, and a window (hidden until the button is
//! clicked) with the history bar chart and a status label.

pub mod panel;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::widget::ServerMonitor;

/// Maps monitor state onto the button and window widgets.
#[derive(Debug, Clone)]
pub struct ViewBinder {
    pub theme: Theme,
    window_visible: bool,
    button_area: Rect,
}

impl ViewBinder {
    /// Create a binder with the window hidden.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            window_visible: false,
            button_area: Rect::default(),
        }
    }

    /// Show the window if hidden, hide it if shown.
    pub fn toggle_window(&mut self) {
        self.window_visible = !self.window_visible;
    }

    pub fn is_window_visible(&self) -> bool {
        self.window_visible
    }

    /// Whether a terminal cell lies on the button as last rendered.
    pub fn button_hit(&self, column: u16, row: u16) -> bool {
        let area = self.button_area;
        column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height)
    }

    /// Render the button, and the window below it when visible.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, monitor: &ServerMonitor) {
        self.button_area = Rect::new(area.x, area.y, panel::BUTTON_WIDTH.min(area.width), 1);
        panel::render_button(frame, self.button_area, &self.theme, monitor.alarm_state());

        if self.window_visible && area.height > 1 {
            let window = Rect::new(
                area.x,
                area.y + 1,
                panel::WINDOW_WIDTH.min(area.width),
                panel::WINDOW_HEIGHT.min(area.height - 1),
            );
            panel::render_window(frame, window, &self.theme, monitor);
        }
    }
}

/// Render the whole screen: monitor widgets on top, status bar at the bottom.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [content, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    app.binder.render(frame, content, &app.monitor);
    render_status_bar(frame, app, status);
}

/// Render the status bar with the source, sim time and controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph = Paragraph::new(format!(" {} ", msg))
            .style(Style::default().fg(app.binder.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "m:window p:pause e:export q:quit";

    let status = if let Some(ref err) = app.load_error {
        format!(" {} | Error: {} | {}", app.source_description(), err, controls)
    } else if !app.monitor.is_active() {
        format!(" {} | Paused | {}", app.source_description(), controls)
    } else if let Some(time) = app.host_time {
        let servers = app.monitor.view().map_or(0, |v| v.batch.len());
        format!(
            " {} | t={} | {} servers | {}",
            app.source_description(),
            time,
            servers,
            controls
        )
    } else {
        format!(" {} | Waiting for host... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MonitorConfig;
    use crate::source::{ChannelSource, HostSnapshot, ItemSnapshot, ServerSnapshot};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_button_and_window() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::with_theme(Box::new(source), MonitorConfig::default(), Theme::dark());
        tx.send(Some(HostSnapshot {
            time: 0,
            servers: vec![ServerSnapshot {
                name: "web".to_string(),
                id: 1,
                capacity: 100.0,
                node_count: 1,
                items: vec![ItemSnapshot {
                    load_requirement: 10.0,
                }],
            }],
        }))
        .unwrap();
        app.tick(Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Monitor"));
        assert!(!text.contains("Servers in Normal State"));
        assert!(app.binder.button_hit(0, 0));

        app.toggle_window();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Server Monitor"));
        assert!(text.contains("Servers in Normal State: 1"));
        assert!(text.contains("Total Utilization: 22%"));
    }

    #[test]
    fn test_window_starts_hidden_and_toggles() {
        let mut binder = ViewBinder::new(Theme::dark());
        assert!(!binder.is_window_visible());
        binder.toggle_window();
        assert!(binder.is_window_visible());
        binder.toggle_window();
        assert!(!binder.is_window_visible());
    }

    #[test]
    fn test_button_hit_uses_rendered_area() {
        let mut binder = ViewBinder::new(Theme::dark());
        // Nothing rendered yet
        assert!(!binder.button_hit(0, 0));

        binder.button_area = Rect::new(0, 0, panel::BUTTON_WIDTH, 1);
        assert!(binder.button_hit(0, 0));
        assert!(binder.button_hit(panel::BUTTON_WIDTH - 1, 0));
        assert!(!binder.button_hit(panel::BUTTON_WIDTH, 0));
        assert!(!binder.button_hit(3, 1));
    }
}
