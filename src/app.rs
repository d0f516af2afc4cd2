use ratatui::{layout::Rect, widgets::ListState};
use std::sync::Arc;

use crate::backend::{BackendEvent, RefreshOutcome, RefreshRequest};
use crate::config::Config;
use crate::triage::{
    apply_action, sample_tickets, ActionOutcome, Category, DashboardStats, ResolvedView, Ticket,
    TicketAction, TicketSource, TicketStore, View, ViewController,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pane {
    Sidebar,
    List,
    Detail,
}

/// Connectivity indicator in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Unknown,
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Drafted reply for a ticket; Enter sends it
    AutoReply { ticket_id: String, draft: String },
    /// Pick the category the classifier should have chosen
    Feedback { ticket_id: String, selection: usize },
}

/// Work for the background worker, produced by confirming a modal
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    SendReply { ticket_id: String },
    SendFeedback { ticket_id: String, category: Category },
}

pub struct App {
    pub config: Arc<Config>,
    pub views: ViewController,
    pub store: TicketStore,
    pub view: View,
    pub sidebar_state: ListState,
    pub list_state: ListState,
    /// Id of the selected ticket; survives re-sorting and refreshes
    pub selected_id: Option<String>,
    pub focused_pane: Pane,
    pub modal: Option<Modal>,
    pub backend_status: BackendStatus,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub detail_scroll: u16,
    // Mouse tracking - pane areas
    pub sidebar_area: Rect,
    pub list_area: Rect,
}

impl App {
    pub fn new(config: Arc<Config>) -> Self {
        let views = config.view_controller();
        let mut sidebar_state = ListState::default();
        // Agents land in the global inbox
        sidebar_state.select(Some(1));

        Self {
            config,
            views,
            store: TicketStore::default(),
            view: View::GlobalInbox,
            sidebar_state,
            list_state: ListState::default(),
            selected_id: None,
            focused_pane: Pane::List,
            modal: None,
            backend_status: BackendStatus::Unknown,
            should_quit: false,
            status_message: None,
            detail_scroll: 0,
            sidebar_area: Rect::default(),
            list_area: Rect::default(),
        }
    }

    /// Ordered tickets for the current view
    pub fn visible(&self) -> ResolvedView<'_> {
        self.views
            .resolve(&self.view, self.store.tickets(), self.selected_id.as_deref())
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        let id = self.selected_id.as_deref()?;
        self.store.get(id)
    }

    pub fn dashboard(&self) -> DashboardStats {
        self.views.dashboard(self.store.tickets())
    }

    /// Re-resolve the view and pin the list cursor to the selected ticket
    pub fn sync_selection(&mut self) {
        let (selected, id) = {
            let resolved = self.visible();
            let id = resolved.selected_ticket().map(|t| t.id.clone());
            (resolved.selected, id)
        };
        if id != self.selected_id {
            self.detail_scroll = 0;
        }
        self.list_state.select(selected);
        self.selected_id = id;
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn select_row(&mut self, row: usize) {
        let id = self.visible().tickets.get(row).map(|t| t.id.clone());
        if id.is_some() {
            self.selected_id = id;
            self.detail_scroll = 0;
            self.list_state.select(Some(row));
        }
    }

    pub fn next(&mut self) {
        let len = self.visible().tickets.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.select_row(i);
    }

    pub fn previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.select_row(i);
    }

    pub fn set_view(&mut self, view: View) {
        if let Some(idx) = self.views.views().iter().position(|v| *v == view) {
            self.sidebar_state.select(Some(idx));
        }
        self.view = view;
        self.sync_selection();
    }

    pub fn next_view(&mut self) {
        let views = self.views.views();
        let i = self.sidebar_state.selected().unwrap_or(0);
        let next = (i + 1).min(views.len() - 1);
        self.set_view(views[next].clone());
    }

    pub fn previous_view(&mut self) {
        let views = self.views.views();
        let i = self.sidebar_state.selected().unwrap_or(0);
        self.set_view(views[i.saturating_sub(1)].clone());
    }

    pub fn begin_refresh(&mut self, request: RefreshRequest) {
        match request {
            RefreshRequest::Started => self.set_status("Refreshing..."),
            RefreshRequest::AlreadyRunning => self.set_status("Refresh already running"),
        }
    }

    /// Swap in the result of a refresh. A failure shows the sample set.
    pub fn apply_refresh(&mut self, outcome: RefreshOutcome) {
        match outcome {
            RefreshOutcome::Loaded(tickets) => {
                let count = tickets.len();
                self.store.replace_all(tickets, TicketSource::Live);
                self.backend_status = BackendStatus::Connected;
                self.set_status(&format!("Loaded {} tickets", count));
            }
            RefreshOutcome::Empty => {
                self.backend_status = BackendStatus::Connected;
                self.set_status("No new tickets");
            }
            RefreshOutcome::Failed(_) => {
                self.store.replace_all(sample_tickets(), TicketSource::Sample);
                self.backend_status = BackendStatus::Disconnected;
                self.set_status("Backend offline, showing sample tickets");
            }
        }
        self.sync_selection();
    }

    /// Route a finished background call to the right place
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Refreshed(outcome) => self.apply_refresh(outcome),
            BackendEvent::ReplySent { ticket_id, result } => match result {
                Ok(()) => self.set_status(&format!("Reply sent for {}", ticket_id)),
                Err(e) => self.set_status(&format!("Reply failed: {}", e)),
            },
            BackendEvent::FeedbackSent {
                ticket_id,
                category,
                result,
            } => match result {
                Ok(()) => self.set_status(&format!("Feedback for {}: {}", ticket_id, category)),
                Err(e) => self.set_status(&format!("Feedback failed: {}", e)),
            },
        }
    }

    /// Apply an agent action to the selected ticket
    pub fn perform(&mut self, action: TicketAction) -> Option<ActionOutcome> {
        let id = self.selected_id.clone()?;
        let outcome = apply_action(&mut self.store, &id, action)?;
        match &outcome {
            ActionOutcome::Draft(draft) => {
                self.modal = Some(Modal::AutoReply {
                    ticket_id: id,
                    draft: draft.clone(),
                });
            }
            ActionOutcome::Acknowledged(msg) | ActionOutcome::Closed(msg) => self.set_status(msg),
        }
        self.sync_selection();
        Some(outcome)
    }

    pub fn open_feedback(&mut self) {
        if let Some(ticket) = self.selected_ticket() {
            let selection = Category::ALL
                .iter()
                .position(|c| *c == ticket.category)
                .unwrap_or(0);
            self.modal = Some(Modal::Feedback {
                ticket_id: ticket.id.clone(),
                selection,
            });
        }
    }

    /// Move the feedback picker; no-op for other modals
    pub fn move_feedback(&mut self, forward: bool) {
        if let Some(Modal::Feedback { selection, .. }) = &mut self.modal {
            let len = Category::ALL.len();
            *selection = if forward {
                (*selection + 1) % len
            } else {
                (*selection + len - 1) % len
            };
        }
    }

    /// Close the open modal, returning the job it asked for
    pub fn confirm_modal(&mut self) -> Option<Job> {
        match self.modal.take()? {
            Modal::AutoReply { ticket_id, .. } => {
                self.set_status("Sending reply...");
                Some(Job::SendReply { ticket_id })
            }
            Modal::Feedback {
                ticket_id,
                selection,
            } => {
                self.set_status("Sending feedback...");
                Some(Job::SendFeedback {
                    ticket_id,
                    category: Category::ALL[selection],
                })
            }
        }
    }

    pub fn dismiss_modal(&mut self) {
        self.modal = None;
    }

    pub fn detail_scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(3);
    }

    pub fn detail_scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(3);
    }

    /// Update pane areas (called during render)
    pub fn set_pane_areas(&mut self, sidebar: Rect, list: Rect) {
        self.sidebar_area = sidebar;
        self.list_area = list;
    }

    /// Handle click at (x, y) - selects a view or a ticket row
    pub fn handle_click(&mut self, x: u16, y: u16) {
        if contains(self.sidebar_area, x, y) {
            self.focused_pane = Pane::Sidebar;
            let row = y.saturating_sub(self.sidebar_area.y + 1) as usize; // +1 for top border
            if let Some(view) = self.views.views().get(row).cloned() {
                self.set_view(view);
            }
        } else if contains(self.list_area, x, y) {
            self.focused_pane = Pane::List;
            let visual_row = y.saturating_sub(self.list_area.y + 1) as usize;
            self.select_row(visual_row + self.list_state.offset());
        } else {
            self.focused_pane = Pane::Detail;
        }
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::{normalize_response, Status};
    use serde_json::json;

    fn loaded_app() -> App {
        let mut app = App::new(Arc::new(Config::default()));
        let tickets = normalize_response(json!({"data": [
            {"ticket_id": "low", "priority": "low", "category": "Food", "created_at": "2024-01-01T10:00"},
            {"ticket_id": "urgent", "priority": "urgent", "category": "Housing", "created_at": "2024-01-01T09:00"},
            {"ticket_id": "mid", "priority": "important", "category": "Finance"}
        ]}));
        app.apply_refresh(RefreshOutcome::Loaded(tickets));
        app
    }

    #[test]
    fn test_refresh_selects_top_ticket() {
        let app = loaded_app();
        assert_eq!(app.backend_status, BackendStatus::Connected);
        assert_eq!(app.selected_id.as_deref(), Some("urgent"));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_failed_refresh_shows_sample() {
        let mut app = loaded_app();
        app.apply_refresh(RefreshOutcome::Failed("timeout".into()));
        assert_eq!(app.backend_status, BackendStatus::Disconnected);
        assert_eq!(app.store.source(), TicketSource::Sample);
        assert_eq!(app.selected_id.as_deref(), Some("MOCK-1"));
    }

    #[test]
    fn test_empty_refresh_keeps_tickets() {
        let mut app = loaded_app();
        app.apply_refresh(RefreshOutcome::Empty);
        assert_eq!(app.store.len(), 3);
        assert_eq!(app.backend_status, BackendStatus::Connected);
    }

    #[test]
    fn test_navigation_and_views() {
        let mut app = loaded_app();
        app.next();
        assert_eq!(app.selected_id.as_deref(), Some("mid"));
        app.next();
        app.next();
        assert_eq!(app.selected_id.as_deref(), Some("low"));

        app.set_view(View::Department("finance".into()));
        assert_eq!(app.selected_id.as_deref(), Some("mid"));
        assert_eq!(app.sidebar_state.selected(), Some(4));

        app.set_view(View::Dashboard);
        assert_eq!(app.selected_id, None);
        assert!(app.visible().tickets.is_empty());

        app.next_view();
        assert_eq!(app.view, View::GlobalInbox);
        app.previous_view();
        app.previous_view();
        assert_eq!(app.view, View::Dashboard);
    }

    #[test]
    fn test_mark_done_keeps_selection() {
        let mut app = loaded_app();
        app.next();
        let outcome = app.perform(TicketAction::MarkDone);
        assert!(matches!(outcome, Some(ActionOutcome::Closed(_))));
        assert_eq!(app.selected_id.as_deref(), Some("mid"));
        assert_eq!(app.store.get("mid").map(|t| t.status), Some(Status::Read));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Ticket mid closed successfully!")
        );
    }

    #[test]
    fn test_auto_reply_opens_modal_and_confirms() {
        let mut app = loaded_app();
        app.perform(TicketAction::AutoReply);
        assert!(matches!(app.modal, Some(Modal::AutoReply { .. })));
        assert_eq!(
            app.confirm_modal(),
            Some(Job::SendReply {
                ticket_id: "urgent".into()
            })
        );
        assert_eq!(app.modal, None);
        assert_eq!(app.store.get("urgent").map(|t| t.status), Some(Status::Unread));
    }

    #[test]
    fn test_feedback_picker() {
        let mut app = loaded_app();
        app.open_feedback();
        // starts on the ticket's current category (Housing is first)
        assert_eq!(
            app.modal,
            Some(Modal::Feedback {
                ticket_id: "urgent".into(),
                selection: 0
            })
        );
        app.move_feedback(false);
        assert_eq!(
            app.confirm_modal(),
            Some(Job::SendFeedback {
                ticket_id: "urgent".into(),
                category: Category::General
            })
        );
    }

    #[test]
    fn test_backend_events_set_status() {
        let mut app = loaded_app();
        app.handle_backend_event(BackendEvent::ReplySent {
            ticket_id: "urgent".into(),
            result: Err("down".into()),
        });
        assert_eq!(app.status_message.as_deref(), Some("Reply failed: down"));
    }

    #[test]
    fn test_refresh_request_status() {
        let mut app = App::new(Arc::new(Config::default()));
        app.begin_refresh(RefreshRequest::Started);
        assert_eq!(app.status_message.as_deref(), Some("Refreshing..."));
        app.begin_refresh(RefreshRequest::AlreadyRunning);
        assert_eq!(app.status_message.as_deref(), Some("Refresh already running"));
    }
}
