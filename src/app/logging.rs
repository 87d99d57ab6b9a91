//! Activity-log records and their rendering.
//!
//! The log is the app's sole reporting channel: progress notes, warnings,
//! and per-action errors all land here as plain lines. Nothing in it is
//! fatal or retried.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Severity of one activity-log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn color(self) -> Color {
        match self {
            LogLevel::Info => Color::Reset,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }
}

/// One timestamped entry in the activity panel.
#[derive(Clone, Debug)]
pub struct LogLine {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogLine {
    /// Render as a ratatui line: dim timestamp, level-colored message.
    pub fn render(&self) -> Line<'_> {
        Line::from(vec![
            Span::styled(
                format!("{} ", self.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                self.message.as_str(),
                Style::default().fg(self.level.color()),
            ),
        ])
    }
}
