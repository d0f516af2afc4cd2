use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::Dialog;
use crate::app::Modal;
use crate::config::ThemeConfig;
use crate::triage::Category;

pub fn render_modal(f: &mut Frame, area: Rect, modal: &Modal, theme: &ThemeConfig) {
    match modal {
        Modal::AutoReply { ticket_id, draft } => {
            render_draft(f, area, ticket_id, draft, theme)
        }
        Modal::Feedback {
            ticket_id,
            selection,
        } => render_feedback(f, area, ticket_id, *selection, theme),
    }
}

fn hint_line(pairs: &[(&'static str, &'static str)], theme: &ThemeConfig) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, action) in pairs {
        spans.push(Span::styled(*key, Style::default().fg(theme.primary())));
        spans.push(Span::styled(
            format!(" {}  ", action),
            Style::default().fg(theme.fg_subtle()),
        ));
    }
    Line::from(spans)
}

fn render_draft(f: &mut Frame, area: Rect, ticket_id: &str, draft: &str, theme: &ThemeConfig) {
    let dialog = Dialog::new(" Suggested reply ", theme);
    let dialog_area = dialog.centered_rect(72, 18, area);
    f.render_widget(Clear, dialog_area);

    let block = dialog.block();
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // ticket
            Constraint::Length(1), // spacing
            Constraint::Min(1),    // draft
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Ticket ", Style::default().fg(theme.fg_muted())),
        Span::styled(ticket_id.to_string(), Style::default().fg(theme.fg())),
    ]));
    f.render_widget(header, chunks[0]);

    let body = Paragraph::new(draft.to_string())
        .style(Style::default().fg(theme.fg()))
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[2]);

    f.render_widget(
        Paragraph::new(hint_line(&[("Enter", "send"), ("Esc", "close")], theme)),
        chunks[3],
    );
}

fn render_feedback(
    f: &mut Frame,
    area: Rect,
    ticket_id: &str,
    selection: usize,
    theme: &ThemeConfig,
) {
    let title = format!(" Correct category for {} ", ticket_id);
    let dialog = Dialog::new(&title, theme);
    let dialog_area = dialog.centered_rect(48, Category::ALL.len() as u16 + 4, area);
    f.render_widget(Clear, dialog_area);

    let block = dialog.block();
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|c| {
            ListItem::new(Line::from(Span::styled(
                c.as_str(),
                Style::default().fg(theme.category(*c)),
            )))
        })
        .collect();
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(theme.selected_bg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(selection));
    f.render_stateful_widget(list, chunks[0], &mut state);

    f.render_widget(
        Paragraph::new(hint_line(
            &[("j/k", "choose"), ("Enter", "submit"), ("Esc", "cancel")],
            theme,
        )),
        chunks[1],
    );
}
