use super::normalize::DEFAULT_BODY;
use super::store::TicketStore;
use super::types::{Status, Ticket};

/// What an agent can do to the selected ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAction {
    /// Surface the drafted reply
    AutoReply,
    /// Put the ticket on hold for missing documents (no status change)
    FollowUp,
    /// Close the ticket
    MarkDone,
}

/// Field changes for a single ticket. Status is the only mutable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketPatch {
    pub status: Option<Status>,
}

impl TicketPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// Returns true if the ticket changed
    pub fn apply(&self, ticket: &mut Ticket) -> bool {
        match self.status {
            Some(status) if ticket.status != status => {
                ticket.status = status;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Draft(String),
    Acknowledged(String),
    Closed(String),
}

impl ActionOutcome {
    pub fn message(&self) -> &str {
        match self {
            ActionOutcome::Draft(text)
            | ActionOutcome::Acknowledged(text)
            | ActionOutcome::Closed(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub patch: Option<TicketPatch>,
    pub outcome: ActionOutcome,
}

/// Decide what an action does to a ticket without touching it
pub fn transition(ticket: &Ticket, action: TicketAction) -> Transition {
    match action {
        TicketAction::AutoReply => {
            let draft = if ticket.body == DEFAULT_BODY {
                "No draft available.".to_string()
            } else {
                ticket.body.clone()
            };
            Transition {
                patch: None,
                outcome: ActionOutcome::Draft(draft),
            }
        }
        TicketAction::FollowUp => Transition {
            patch: None,
            outcome: ActionOutcome::Acknowledged(format!(
                "Ticket {} put on hold for missing documents.",
                ticket.ticket_reference
            )),
        },
        TicketAction::MarkDone => Transition {
            patch: Some(TicketPatch::status(Status::Read)),
            outcome: ActionOutcome::Closed(format!(
                "Ticket {} closed successfully!",
                ticket.ticket_reference
            )),
        },
    }
}

/// Run an action against the ticket with `id`. `None` if no such ticket.
pub fn apply_action(
    store: &mut TicketStore,
    id: &str,
    action: TicketAction,
) -> Option<ActionOutcome> {
    let Transition { patch, outcome } = transition(store.get(id)?, action);
    if let Some(patch) = patch {
        store.update_one(id, patch);
    }
    tracing::info!(ticket = id, ?action, "applied ticket action");
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::store::TicketSource;
    use crate::triage::test_support::ticket;
    use crate::triage::types::Category;

    fn store() -> TicketStore {
        let mut store = TicketStore::default();
        store.replace_all(
            vec![
                ticket("1", Category::Housing, "urgent", None),
                ticket("2", Category::Food, "low", None),
            ],
            TicketSource::Live,
        );
        store
    }

    #[test]
    fn test_mark_done_reads_only_that_ticket() {
        let mut store = store();
        let outcome = apply_action(&mut store, "1", TicketAction::MarkDone);
        assert_eq!(
            outcome,
            Some(ActionOutcome::Closed("Ticket TKT-1 closed successfully!".into()))
        );
        assert_eq!(store.get("1").map(|t| t.status), Some(Status::Read));
        assert_eq!(store.get("2").map(|t| t.status), Some(Status::Unread));
    }

    #[test]
    fn test_mark_done_is_one_way() {
        let mut store = store();
        apply_action(&mut store, "1", TicketAction::MarkDone);
        apply_action(&mut store, "1", TicketAction::MarkDone);
        assert_eq!(store.get("1").map(|t| t.status), Some(Status::Read));
    }

    #[test]
    fn test_follow_up_and_auto_reply_leave_status() {
        let mut store = store();
        let before = store.snapshot();

        let ack = apply_action(&mut store, "2", TicketAction::FollowUp).unwrap();
        assert_eq!(ack.message(), "Ticket TKT-2 put on hold for missing documents.");
        let draft = apply_action(&mut store, "2", TicketAction::AutoReply).unwrap();
        assert_eq!(draft, ActionOutcome::Draft("body 2".into()));

        assert_eq!(*before, *store.snapshot());
    }

    #[test]
    fn test_auto_reply_placeholder_body() {
        let mut t = ticket("x", Category::General, "low", None);
        t.body = DEFAULT_BODY.to_string();
        assert_eq!(
            transition(&t, TicketAction::AutoReply).outcome,
            ActionOutcome::Draft("No draft available.".into())
        );
    }

    #[test]
    fn test_unknown_ticket() {
        let mut store = store();
        assert_eq!(apply_action(&mut store, "nope", TicketAction::MarkDone), None);
    }

    #[test]
    fn test_patch_reports_change() {
        let mut t = ticket("x", Category::General, "low", None);
        assert!(TicketPatch::status(Status::Read).apply(&mut t));
        assert!(!TicketPatch::status(Status::Read).apply(&mut t));
        assert!(!TicketPatch::default().apply(&mut t));
    }
}
