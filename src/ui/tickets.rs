use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use super::Pane;
use crate::config::{LayoutConfig, ThemeConfig};
use crate::triage::{Priority, Ticket};

pub fn render_tickets(
    f: &mut Frame,
    area: Rect,
    tickets: &[&Ticket],
    state: &mut ListState,
    title: &str,
    focused: bool,
    theme: &ThemeConfig,
    layout: &LayoutConfig,
) {
    // Available width: area minus borders (2) minus highlight symbol (2)
    let avail_width = area.width.saturating_sub(4) as usize;

    // Fixed: unread marker (1) + priority tag (4) + spacing
    let date_width = layout.date_width;
    let from_width = layout
        .from_width
        .min(avail_width.saturating_sub(date_width + 8) / 3);
    let subject_width = avail_width.saturating_sub(date_width + from_width + 8);

    let items: Vec<ListItem> = tickets
        .iter()
        .map(|t| {
            let unread = if t.status.is_read() { " " } else { "*" };
            let row_style = if t.status.is_read() {
                Style::default().fg(theme.fg_muted())
            } else {
                Style::default().fg(theme.fg())
            };
            let line = Line::from(vec![
                Span::styled(unread, Style::default().fg(theme.unread())),
                Span::styled(
                    format!("{:<4}", priority_tag(&t.priority)),
                    Style::default().fg(theme.priority(&t.priority)),
                ),
                Span::styled(
                    format!(
                        " {:dw$} {:fw$} {}",
                        truncate(&t.date_display(), date_width),
                        truncate(&t.sender, from_width),
                        truncate(&t.subject, subject_width),
                        dw = date_width,
                        fw = from_width,
                    ),
                    row_style,
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Pane::new(title, focused, theme).block())
        .highlight_style(
            Style::default()
                .bg(theme.selected_bg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, state);
}

/// Short column tag
pub fn priority_tag(priority: &Priority) -> &'static str {
    match priority {
        Priority::Urgent => "URG",
        Priority::Important => "IMP",
        Priority::Low => "LOW",
        Priority::Other(_) => "---",
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if max < 4 {
        return s.chars().take(max).collect();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        format!("{:width$}", s, width = max)
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
