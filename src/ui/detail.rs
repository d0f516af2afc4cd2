use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::Pane;
use crate::config::ThemeConfig;
use crate::triage::Ticket;

/// Byte offset of the earliest http:// or https:// link
fn next_url(s: &str) -> Option<usize> {
    [s.find("http://"), s.find("https://")]
        .into_iter()
        .flatten()
        .min()
}

/// Style body text with underlined URLs
fn style_body(content: &str, theme: &ThemeConfig) -> Vec<Line<'static>> {
    let url_style = Style::default()
        .fg(theme.secondary())
        .add_modifier(Modifier::UNDERLINED);

    content
        .lines()
        .map(|line_str| {
            let mut spans = Vec::new();
            let mut last_end = 0;
            let mut search_start = 0;

            while let Some(start) = next_url(&line_str[search_start..]) {
                let abs_start = search_start + start;
                let url_end = line_str[abs_start..]
                    .find(|c: char| {
                        c.is_whitespace() || c == '>' || c == ')' || c == ']' || c == '"'
                    })
                    .map(|i| abs_start + i)
                    .unwrap_or(line_str.len());

                if abs_start > last_end {
                    spans.push(Span::raw(line_str[last_end..abs_start].to_string()));
                }
                spans.push(Span::styled(
                    line_str[abs_start..url_end].to_string(),
                    url_style,
                ));

                last_end = url_end;
                search_start = url_end;
            }

            if last_end < line_str.len() {
                spans.push(Span::raw(line_str[last_end..].to_string()));
            }
            if spans.is_empty() {
                spans.push(Span::raw(line_str.to_string()));
            }

            Line::from(spans)
        })
        .collect()
}

fn field(label: &'static str, value: String, theme: &ThemeConfig) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(theme.fg_muted())),
        Span::styled(value, Style::default().fg(theme.fg())),
    ])
}

/// Header fields, the AI analysis, then the drafted body
pub fn detail_lines(ticket: &Ticket, theme: &ThemeConfig) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            ticket.subject.clone(),
            Style::default()
                .fg(theme.fg())
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        field("From", ticket.sender.clone(), theme),
        field("Date", ticket.date_long(), theme),
        field("Reference", ticket.ticket_reference.clone(), theme),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Category"), Style::default().fg(theme.fg_muted())),
            Span::styled(
                ticket.category.to_string(),
                Style::default().fg(theme.category(ticket.category)),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Priority"), Style::default().fg(theme.fg_muted())),
            Span::styled(
                ticket.priority.to_string(),
                Style::default()
                    .fg(theme.priority(&ticket.priority))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        field("Department", ticket.suggested_department.clone(), theme),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Sentiment"), Style::default().fg(theme.fg_muted())),
            Span::styled(
                ticket.sentiment.clone(),
                Style::default().fg(if ticket.is_negative() {
                    theme.error()
                } else {
                    theme.fg()
                }),
            ),
        ]),
        field(
            "Status",
            if ticket.status.is_read() { "Done" } else { "Open" }.to_string(),
            theme,
        ),
        Line::raw(""),
        Line::from(Span::styled(
            "AI analysis",
            Style::default().fg(theme.primary()),
        )),
        Line::from(Span::styled(
            ticket.reasoning.clone(),
            Style::default().fg(theme.fg_subtle()),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Message",
            Style::default().fg(theme.primary()),
        )),
    ];
    lines.extend(style_body(&ticket.body, theme));
    lines
}

pub fn render_detail(
    f: &mut Frame,
    area: Rect,
    ticket: Option<&Ticket>,
    scroll: u16,
    focused: bool,
    theme: &ThemeConfig,
) {
    let (title, lines) = match ticket {
        Some(t) => (format!(" {} ", t.ticket_reference), detail_lines(t, theme)),
        None => (
            " Ticket ".to_string(),
            vec![Line::from(Span::styled(
                "No ticket selected",
                Style::default().fg(theme.fg_muted()),
            ))],
        ),
    };

    let paragraph = Paragraph::new(lines)
        .block(Pane::new(title, focused, theme).block())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::sample_tickets;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_urls_are_split_into_own_span() {
        let theme = ThemeConfig::default();
        let lines = style_body("see https://example.org/form) today", &theme);
        assert_eq!(lines.len(), 1);
        let spans: Vec<&str> = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(spans, vec!["see ", "https://example.org/form", ") today"]);
    }

    #[test]
    fn test_earliest_url_wins() {
        let theme = ThemeConfig::default();
        let lines = style_body("https://a http://b", &theme);
        let spans: Vec<&str> = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(spans, vec!["https://a", " ", "http://b"]);
        assert_eq!(next_url("see http://x or https://y"), Some(4));
        assert_eq!(next_url("no links"), None);
    }

    #[test]
    fn test_detail_lines_show_analysis() {
        let theme = ThemeConfig::default();
        let ticket = &sample_tickets()[0];
        let lines: Vec<String> = detail_lines(ticket, &theme).iter().map(text).collect();
        assert_eq!(lines[0], "URGENT: Eviction Notice Help Needed");
        assert!(lines.iter().any(|l| l.contains("Unknown Date")));
        assert!(lines.iter().any(|l| l.contains("Keyword 'Eviction'")));
        assert_eq!(lines.last().map(String::as_str), Some("I received an eviction notice today..."));
    }
}
