use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use super::Pane;
use crate::config::ThemeConfig;
use crate::triage::{Ticket, View, ViewController};

/// One sidebar row: label on the left, badge right-aligned
pub fn sidebar_row(label: &str, badge: Option<usize>, width: usize) -> String {
    match badge {
        Some(n) => {
            let count = n.to_string();
            let room = width.saturating_sub(count.len() + 1);
            let label: String = label.chars().take(room).collect();
            format!("{:<room$} {}", label, count, room = room)
        }
        None => label.chars().take(width).collect(),
    }
}

pub fn render_sidebar(
    f: &mut Frame,
    area: Rect,
    views: &ViewController,
    tickets: &[Ticket],
    state: &mut ListState,
    focused: bool,
    theme: &ThemeConfig,
) {
    // Borders (2) + highlight symbol (2)
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = views
        .views()
        .iter()
        .map(|view| {
            let label = views.label(view);
            let style = match view {
                View::Dashboard | View::GlobalInbox => Style::default().fg(theme.fg()),
                View::Department(_) => Style::default().fg(theme.fg_subtle()),
            };
            let row = sidebar_row(&label, views.badge(view, tickets), width);
            ListItem::new(Line::from(Span::styled(row, style)))
        })
        .collect();

    let list = List::new(items)
        .block(Pane::new(" Views ", focused, theme).block())
        .highlight_style(
            Style::default()
                .bg(theme.selected_bg())
                .fg(theme.primary())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, state);
}
