use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{BackendStatus, Pane};
use crate::config::ThemeConfig;

/// Key hints for the focused pane
pub fn key_hints(pane: Pane) -> &'static [(&'static str, &'static str)] {
    match pane {
        Pane::Sidebar => &[
            ("j/k", "view"),
            ("l", "tickets"),
            ("Tab", "next view"),
            ("R", "refresh"),
            ("q", "quit"),
        ],
        Pane::List => &[
            ("h/l", "pane"),
            ("j/k", "nav"),
            ("Tab", "view"),
            ("a", "reply"),
            ("f", "follow-up"),
            ("d", "done"),
            ("c", "correct"),
            ("R", "refresh"),
            ("q", "quit"),
        ],
        Pane::Detail => &[
            ("j/k", "scroll"),
            ("h", "back"),
            ("a", "reply"),
            ("f", "follow-up"),
            ("d", "done"),
            ("q", "quit"),
        ],
    }
}

/// Right-hand connectivity badge
pub fn backend_label(status: BackendStatus, refreshing: bool) -> &'static str {
    if refreshing {
        return "Syncing";
    }
    match status {
        BackendStatus::Unknown => "Connecting",
        BackendStatus::Connected => "Online",
        BackendStatus::Disconnected => "Offline",
    }
}

pub fn render_help(
    f: &mut Frame,
    area: Rect,
    pane: Pane,
    status: Option<&str>,
    backend: BackendStatus,
    refreshing: bool,
    theme: &ThemeConfig,
) {
    let key_style = Style::default().fg(theme.primary());
    let text_style = Style::default().fg(theme.fg_subtle());

    let mut spans = Vec::new();
    for (key, action) in key_hints(pane) {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}  ", action), text_style));
    }

    // Add status message if present
    if let Some(msg) = status {
        spans.push(Span::styled("│  ", Style::default().fg(theme.border())));
        spans.push(Span::styled(msg, Style::default().fg(theme.success())));
    }

    let label = backend_label(backend, refreshing);
    let indicator_color = match (backend, refreshing) {
        (_, true) => theme.warning(),
        (BackendStatus::Connected, _) => theme.success(),
        (BackendStatus::Disconnected, _) => theme.error(),
        (BackendStatus::Unknown, _) => theme.fg_muted(),
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(label.len() as u16 + 3)])
        .split(area);

    let bar_style = Style::default().bg(theme.bg_panel());
    f.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), chunks[0]);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("● ", Style::default().fg(indicator_color)),
            Span::styled(label, Style::default().fg(theme.fg())),
        ]))
        .style(bar_style),
        chunks[1],
    );
}
