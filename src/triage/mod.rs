pub mod aggregate;
pub mod normalize;
pub mod routing;
pub mod scheduler;
pub mod status;
pub mod store;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{Aggregator, CategoryCount, DashboardStats};
pub use normalize::{normalize, normalize_response, RawEnvelope, RawTicket};
pub use routing::{default_departments, Department, Router, RoutingError};
pub use scheduler::{PriorityWeights, Scheduler};
pub use status::{apply_action, ActionOutcome, TicketAction, TicketPatch};
pub use store::{sample_tickets, TicketSource, TicketStore};
pub use types::{Category, Priority, Status, Ticket};
pub use view::{ResolvedView, View, ViewController};
