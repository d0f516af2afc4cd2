use std::sync::Arc;

use super::status::TicketPatch;
use super::types::{Category, Priority, Status, Ticket};

/// Where the current collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketSource {
    /// Nothing loaded yet
    #[default]
    Startup,
    /// Last refresh succeeded
    Live,
    /// Last refresh failed; showing the built-in sample set
    Sample,
}

/// Owner of the in-memory ticket collection.
///
/// `replace_all` and `update_one` are the only ways to change it. Updates are
/// copy-on-write, so a `snapshot` taken earlier never changes underneath its
/// holder.
#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    tickets: Arc<Vec<Ticket>>,
    source: TicketSource,
}

impl TicketStore {
    pub fn new(tickets: Vec<Ticket>, source: TicketSource) -> Self {
        Self {
            tickets: Arc::new(tickets),
            source,
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn snapshot(&self) -> Arc<Vec<Ticket>> {
        Arc::clone(&self.tickets)
    }

    pub fn source(&self) -> TicketSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Swap in a whole new collection in one step
    pub fn replace_all(&mut self, tickets: Vec<Ticket>, source: TicketSource) {
        tracing::debug!(count = tickets.len(), ?source, "replacing ticket collection");
        self.tickets = Arc::new(tickets);
        self.source = source;
    }

    /// Patch the first ticket with `id`. Returns true if anything changed.
    pub fn update_one(&mut self, id: &str, patch: TicketPatch) -> bool {
        let Some(idx) = self.tickets.iter().position(|t| t.id == id) else {
            return false;
        };
        // Skip the copy when the patch is a no-op
        let mut probe = self.tickets[idx].clone();
        if !patch.apply(&mut probe) {
            return false;
        }
        Arc::make_mut(&mut self.tickets)[idx] = probe;
        true
    }
}

/// Shown when the classifier cannot be reached
pub fn sample_tickets() -> Vec<Ticket> {
    vec![Ticket {
        id: "MOCK-1".to_string(),
        sender: "Alex Dupont".to_string(),
        subject: "URGENT: Eviction Notice Help Needed".to_string(),
        body: "I received an eviction notice today...".to_string(),
        category: Category::Housing,
        priority: Priority::Urgent,
        created_at: None,
        status: Status::Unread,
        ticket_reference: "TKT-1121-001".to_string(),
        reasoning: "Keyword 'Eviction' detected regarding accommodation safety.".to_string(),
        suggested_department: "Housing Office".to_string(),
        sentiment: "Negative".to_string(),
    }]
}
