use chrono::{DateTime, Utc};
use proptest::prelude::*;

use super::normalize::parse_timestamp;
use super::types::{Category, Priority, Status, Ticket};

/// Build a ticket with only the fields triage cares about set
pub fn ticket(id: &str, category: Category, priority: &str, created_at: Option<&str>) -> Ticket {
    Ticket {
        id: id.to_string(),
        sender: "someone@example.edu".to_string(),
        subject: format!("subject {}", id),
        body: format!("body {}", id),
        category,
        priority: Priority::from_label(Some(priority)),
        created_at: created_at.and_then(parse_timestamp),
        status: Status::Unread,
        ticket_reference: format!("TKT-{}", id),
        reasoning: String::new(),
        suggested_department: String::new(),
        sentiment: "Neutral".to_string(),
    }
}

fn arb_created_at() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    // A narrow range so equal timestamps show up often
    prop::option::weighted(0.8, 0i64..6).prop_map(|slot| {
        slot.and_then(|minutes| DateTime::from_timestamp(1_700_000_000 + minutes * 60, 0))
    })
}

/// Tickets with unique ids ("0", "1", ...) and a mix of every priority kind
pub fn arb_tickets() -> impl Strategy<Value = Vec<Ticket>> {
    let fields = (
        0usize..Category::ALL.len(),
        prop::sample::select(vec!["urgent", "important", "low", "URGENT", "critical"]),
        arb_created_at(),
        prop::bool::ANY,
    );
    prop::collection::vec(fields, 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cat, priority, created_at, negative))| {
                let mut t = ticket(&i.to_string(), Category::ALL[cat], priority, None);
                t.created_at = created_at;
                if negative {
                    t.sentiment = "Negative".to_string();
                }
                t
            })
            .collect()
    })
}
