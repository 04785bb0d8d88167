//! Monitor button and history window rendering.
//!
//! The numbers shown here come straight from [`ServerMonitor`]; this module
//! only maps them onto widgets.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::data::{AlarmState, HistoryRing, Severity, SeverityCounts};
use crate::widget::{MonitorView, ServerMonitor};

pub const BUTTON_LABEL: &str = "Monitor";
pub const BUTTON_WIDTH: u16 = 12;
pub const WINDOW_TITLE: &str = " Server Monitor ";
pub const WINDOW_WIDTH: u16 = 74;
pub const WINDOW_HEIGHT: u16 = 14;

/// Height and color of one history bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBar {
    /// Utilization in whole percent.
    pub percent: u64,
    /// Aggregate tier, `None` for a slot that has not been filled yet.
    pub tier: Option<Severity>,
}

/// Lines of the status label under the chart.
pub fn status_lines(view: Option<&MonitorView>) -> Vec<String> {
    let (counts, percent) = view
        .map(|v| (v.current.counts, v.current.percent()))
        .unwrap_or((SeverityCounts::default(), 0.0));

    vec![
        format!("Servers in Normal State: {}", counts.normal),
        format!("Servers in Warning State: {}", counts.warning),
        format!("Servers in Alarm State: {}", counts.alarm),
        format!("Total Utilization: {}%", percent),
    ]
}

/// One bar per history slot, oldest first.
///
/// Before the ring exists every slot is empty.
pub fn history_bars(history: Option<&HistoryRing>, slots: usize) -> Vec<SlotBar> {
    let empty = SlotBar {
        percent: 0,
        tier: None,
    };
    let Some(ring) = history else {
        return vec![empty; slots];
    };

    ring.slots()
        .map(|slot| match slot {
            Some(entry) => SlotBar {
                percent: (entry.aggregate.utilization * 100.0).round().max(0.0) as u64,
                tier: Some(entry.aggregate.tier),
            },
            None => empty,
        })
        .collect()
}

/// Render the monitor button, colored by the alarm state.
pub fn render_button(frame: &mut Frame, area: Rect, theme: &Theme, state: AlarmState) {
    let button = Paragraph::new(BUTTON_LABEL)
        .alignment(Alignment::Center)
        .style(theme.button_style(state));
    frame.render_widget(button, area);
}

/// Render the history window: bar chart on top, status label below.
pub fn render_window(frame: &mut Frame, area: Rect, theme: &Theme, monitor: &ServerMonitor) {
    let block = Block::default()
        .title(WINDOW_TITLE)
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [chart_area, label_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(4)]).areas(inner);

    let slots = history_bars(monitor.history(), monitor.config().history_len);
    let bars: Vec<Bar> = slots
        .iter()
        .map(|slot| {
            let style = match slot.tier {
                Some(tier) => theme.severity_style(tier),
                None => Style::default().fg(theme.border),
            };
            Bar::default().value(slot.percent).text_value(String::new()).style(style)
        })
        .collect();

    let count = slots.len().max(1) as u16;
    let bar_width = ((chart_area.width + 1) / count).saturating_sub(1).max(1);
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(100);
    frame.render_widget(chart, chart_area);

    let lines: Vec<Line> = status_lines(monitor.view()).into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(lines), label_area);
}
