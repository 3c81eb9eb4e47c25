//! Status bar component.
//!
//! Shows the latest transient message (sort result, unknown method) and
//! falls back to keyboard hints once it expires.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// The kind of status message, which determines its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Informational message.
    Info,
    /// Something was skipped.
    Warning,
    /// An operation failed.
    Error,
}

impl StatusKind {
    /// Get the icon for this kind.
    pub fn icon(&self) -> &'static str {
        match self {
            StatusKind::Info => "ℹ",
            StatusKind::Warning => "⚠",
            StatusKind::Error => "✗",
        }
    }

    /// Get the color for this kind.
    pub fn color(&self) -> Color {
        match self {
            StatusKind::Info => Color::Blue,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        }
    }
}

/// A status message with an expiry.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text.
    pub text: String,
    /// The kind of message.
    pub kind: StatusKind,
    created_at: Instant,
    duration: Duration,
}

impl StatusMessage {
    /// Create a message shown for `duration`.
    pub fn new(text: impl Into<String>, kind: StatusKind, duration: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Check if the message has expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Bottom line of the screen.
pub struct StatusBar {
    message: Option<StatusMessage>,
    hints: &'static str,
}

impl StatusBar {
    /// Create a status bar showing `hints` when idle.
    pub fn new(hints: &'static str) -> Self {
        Self {
            message: None,
            hints,
        }
    }

    /// Show an info message for three seconds.
    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::new(text, StatusKind::Info, Duration::from_secs(3)));
    }

    /// Show a warning for five seconds.
    pub fn warning(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::new(
            text,
            StatusKind::Warning,
            Duration::from_secs(5),
        ));
    }

    /// Show an error for five seconds.
    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::new(text, StatusKind::Error, Duration::from_secs(5)));
    }

    /// The current message, if any and not expired.
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref().filter(|m| !m.is_expired())
    }

    /// Drop an expired message. Call on every tick.
    pub fn tick(&mut self) {
        if self.message.as_ref().is_some_and(StatusMessage::is_expired) {
            self.message = None;
        }
    }

    /// Render the status bar.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = match self.message() {
            Some(message) => Line::from(vec![
                Span::styled(message.kind.icon(), Style::default().fg(message.kind.color())),
                Span::raw(" "),
                Span::styled(message.text.clone(), Style::default().fg(message.kind.color())),
            ]),
            None => Line::from(hint_spans(self.hints)),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Split hint text into spans, highlighting the `[key]` parts.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_spans_multiple_keys() {
        let spans = hint_spans("[j/k] scroll  [Enter] sort  [q] quit");
        // [j/k], " scroll  ", [Enter], " sort  ", [q], " quit"
        assert_eq!(spans.len(), 6);
        assert_eq!(spans[0].content, "[j/k]");
        assert_eq!(spans[5].content, " quit");
    }

    #[test]
    fn test_hint_spans_unclosed_bracket() {
        let spans = hint_spans("a [b");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "a [b");
    }

    #[test]
    fn test_hint_spans_empty() {
        assert!(hint_spans("").is_empty());
    }

    #[test]
    fn test_message_replaces_previous() {
        let mut bar = StatusBar::new("[q] quit");
        bar.info("sorted");
        bar.error("no sort method");
        let message = bar.message().unwrap();
        assert_eq!(message.kind, StatusKind::Error);
        assert_eq!(message.text, "no sort method");
    }

    #[test]
    fn test_expired_message_dropped_on_tick() {
        let mut bar = StatusBar::new("");
        bar.message = Some(StatusMessage::new("old", StatusKind::Info, Duration::ZERO));
        std::thread::sleep(Duration::from_millis(2));
        assert!(bar.message().is_none());
        bar.tick();
        assert!(bar.message.is_none());
    }
}
