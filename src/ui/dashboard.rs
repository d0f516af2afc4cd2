use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use super::Pane;
use crate::config::ThemeConfig;
use crate::triage::{DashboardStats, Priority};

/// Fill ratio of a category bar relative to the largest category
pub fn bar_ratio(count: usize, max: usize) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (count as f64 / max as f64).clamp(0.0, 1.0)
}

fn stat_card(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: usize,
    color: Color,
    theme: &ThemeConfig,
) {
    let block = Pane::new(format!(" {} ", label), false, theme).block();
    let text = Paragraph::new(Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, area);
}

pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    stats: &DashboardStats,
    focused: bool,
    theme: &ThemeConfig,
) {
    let block = Pane::new(" Dashboard ", focused, theme).block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // stat cards
            Constraint::Length(1), // spacing
            Constraint::Length(1), // heading
            Constraint::Min(0),    // category bars
        ])
        .split(inner);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);
    stat_card(f, cards[0], "Total", stats.total, theme.fg(), theme);
    stat_card(f, cards[1], "Urgent", stats.urgent, theme.priority(&Priority::Urgent), theme);
    stat_card(f, cards[2], "Negative", stats.negative, theme.error(), theme);

    let heading = Paragraph::new(Line::from(Span::styled(
        "Tickets by category",
        Style::default().fg(theme.primary()),
    )));
    f.render_widget(heading, rows[2]);

    let max = stats.max_count();
    let bar_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); stats.categories.len()])
        .split(rows[3]);

    for (entry, row) in stats.categories.iter().zip(bar_rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(0)])
            .split(*row);

        let label = Paragraph::new(Line::from(Span::styled(
            entry.category.as_str(),
            Style::default().fg(theme.fg_subtle()),
        )));
        f.render_widget(label, cols[0]);

        let gauge = Gauge::default()
            .ratio(bar_ratio(entry.count, max))
            .label(entry.count.to_string())
            .gauge_style(
                Style::default()
                    .fg(theme.category(entry.category))
                    .bg(theme.bg_element()),
            )
            .use_unicode(true);
        f.render_widget(gauge, cols[1]);
    }
}
