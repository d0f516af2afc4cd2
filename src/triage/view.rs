use super::aggregate::{Aggregator, DashboardStats};
use super::routing::Router;
use super::scheduler::Scheduler;
use super::types::Ticket;

/// Which slice of the ticket collection is on screen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    GlobalInbox,
    Department(String),
}

impl View {
    /// Parse a view key as used on the command line
    pub fn from_key(key: &str) -> Self {
        match key {
            "dashboard" => View::Dashboard,
            "all_inbox" | "inbox" | "all" => View::GlobalInbox,
            id => View::Department(id.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            View::Dashboard => "dashboard",
            View::GlobalInbox => "all_inbox",
            View::Department(id) => id,
        }
    }
}

/// Ordered tickets for a view, plus where the selection landed
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView<'a> {
    pub tickets: Vec<&'a Ticket>,
    pub selected: Option<usize>,
}

impl ResolvedView<'_> {
    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.selected.and_then(|i| self.tickets.get(i).copied())
    }
}

/// Filter-then-sort composition of routing and scheduling per view
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    router: Router,
    scheduler: Scheduler,
    aggregator: Aggregator,
}

impl ViewController {
    pub fn new(router: Router, scheduler: Scheduler, aggregator: Aggregator) -> Self {
        Self {
            router,
            scheduler,
            aggregator,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Resolve a view. `selection` is the id of the ticket the agent had
    /// selected; it keeps its row if still present, otherwise the first row wins.
    pub fn resolve<'a>(
        &self,
        view: &View,
        tickets: &'a [Ticket],
        selection: Option<&str>,
    ) -> ResolvedView<'a> {
        let ordered = match view {
            View::Dashboard => Vec::new(),
            View::GlobalInbox => self.scheduler.order(tickets),
            View::Department(id) => self.scheduler.order(self.router.queue_for(id, tickets)),
        };

        let selected = selection
            .and_then(|id| ordered.iter().position(|t| t.id == id))
            .or(if ordered.is_empty() { None } else { Some(0) });

        ResolvedView {
            tickets: ordered,
            selected,
        }
    }

    pub fn dashboard(&self, tickets: &[Ticket]) -> DashboardStats {
        self.aggregator.dashboard(tickets)
    }

    /// Sidebar entries in display order
    pub fn views(&self) -> Vec<View> {
        let mut views = vec![View::Dashboard, View::GlobalInbox];
        views.extend(
            self.router
                .departments()
                .iter()
                .map(|d| View::Department(d.id.clone())),
        );
        views
    }

    pub fn label(&self, view: &View) -> String {
        match view {
            View::Dashboard => "Dashboard".to_string(),
            View::GlobalInbox => "All Tickets".to_string(),
            View::Department(id) => self
                .router
                .department(id)
                .map(|d| d.label.clone())
                .unwrap_or_else(|| id.clone()),
        }
    }

    /// Sidebar badge; the dashboard has none
    pub fn badge(&self, view: &View, tickets: &[Ticket]) -> Option<usize> {
        match view {
            View::Dashboard => None,
            View::GlobalInbox => Some(self.router.count_for(None, tickets)),
            View::Department(id) => Some(
                self.router
                    .department(id)
                    .map(|d| self.router.count_for(Some(&d.categories), tickets))
                    .unwrap_or(0),
            ),
        }
    }
}
