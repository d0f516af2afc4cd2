use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::{Priority, Ticket};

/// Sort weights per priority; higher sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub urgent: u8,
    pub important: u8,
    pub low: u8,
    /// Any label the classifier invents
    pub other: u8,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            urgent: 3,
            important: 2,
            low: 1,
            other: 0,
        }
    }
}

impl PriorityWeights {
    /// urgent > important > low > other must hold for the queue to make sense
    pub fn is_strictly_ordered(&self) -> bool {
        self.urgent > self.important && self.important > self.low && self.low > self.other
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    weights: PriorityWeights,
}

impl Scheduler {
    pub fn new(weights: PriorityWeights) -> Self {
        Self { weights }
    }

    pub fn weight(&self, priority: &Priority) -> u8 {
        match priority {
            Priority::Urgent => self.weights.urgent,
            Priority::Important => self.weights.important,
            Priority::Low => self.weights.low,
            Priority::Other(_) => self.weights.other,
        }
    }

    /// Heavier first, then newer first. Unknown dates (`None`) are oldest.
    pub fn compare(&self, a: &Ticket, b: &Ticket) -> Ordering {
        self.weight(&b.priority)
            .cmp(&self.weight(&a.priority))
            .then_with(|| b.created_at.cmp(&a.created_at))
    }

    /// Stable sort: exact ties keep their input order
    pub fn order<'a, I>(&self, tickets: I) -> Vec<&'a Ticket>
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        let mut ordered: Vec<&Ticket> = tickets.into_iter().collect();
        ordered.sort_by(|a, b| self.compare(a, b));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::test_support::{arb_tickets, ticket};
    use crate::triage::types::Category;
    use proptest::prelude::*;

    fn ids<'a>(tickets: &[&'a Ticket]) -> Vec<&'a str> {
        tickets.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_weights() {
        let s = Scheduler::default();
        assert_eq!(s.weight(&Priority::Urgent), 3);
        assert_eq!(s.weight(&Priority::Important), 2);
        assert_eq!(s.weight(&Priority::Low), 1);
        assert_eq!(s.weight(&Priority::Other("meh".into())), 0);
    }

    #[test]
    fn test_urgent_beats_recency() {
        let tickets = vec![
            ticket("low", Category::General, "low", Some("2024-01-01T10:00")),
            ticket("urgent", Category::General, "urgent", Some("2024-01-01T09:00")),
        ];
        assert_eq!(ids(&Scheduler::default().order(&tickets)), vec!["urgent", "low"]);
    }

    #[test]
    fn test_newer_first_within_priority() {
        let tickets = vec![
            ticket("t1", Category::General, "urgent", Some("2024-01-01T09:00")),
            ticket("t2", Category::General, "urgent", Some("2024-01-01T10:00")),
        ];
        assert_eq!(ids(&Scheduler::default().order(&tickets)), vec!["t2", "t1"]);

        let already_sorted = vec![tickets[1].clone(), tickets[0].clone()];
        assert_eq!(
            ids(&Scheduler::default().order(&already_sorted)),
            vec!["t2", "t1"]
        );
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let tickets = vec![
            ticket("a", Category::Food, "important", Some("2024-05-05T12:00")),
            ticket("b", Category::Housing, "IMPORTANT", Some("2024-05-05T12:00")),
            ticket("c", Category::Admin, "important", Some("2024-05-05T12:00")),
        ];
        assert_eq!(ids(&Scheduler::default().order(&tickets)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_date_is_oldest() {
        let tickets = vec![
            ticket("unknown", Category::General, "low", Some("garbage")),
            ticket("ancient", Category::General, "low", Some("1960-01-01")),
        ];
        assert_eq!(
            ids(&Scheduler::default().order(&tickets)),
            vec!["ancient", "unknown"]
        );
    }

    #[test]
    fn test_unrecognized_priority_sorts_last() {
        let tickets = vec![
            ticket("weird", Category::General, "critical", Some("2024-01-02")),
            ticket("low", Category::General, "low", Some("2024-01-01")),
        ];
        assert_eq!(ids(&Scheduler::default().order(&tickets)), vec!["low", "weird"]);
    }

    #[test]
    fn test_custom_weights() {
        let weights = PriorityWeights {
            urgent: 1,
            important: 9,
            low: 0,
            other: 0,
        };
        assert!(!weights.is_strictly_ordered());
        assert!(PriorityWeights::default().is_strictly_ordered());
        let tickets = vec![
            ticket("u", Category::General, "urgent", None),
            ticket("i", Category::General, "important", None),
        ];
        assert_eq!(ids(&Scheduler::new(weights).order(&tickets)), vec!["i", "u"]);
    }

    proptest! {
        #[test]
        fn proptest_order_is_sorted_and_stable(tickets in arb_tickets()) {
            let scheduler = Scheduler::default();
            let ordered = scheduler.order(&tickets);
            prop_assert_eq!(ordered.len(), tickets.len());

            for pair in ordered.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let (wa, wb) = (scheduler.weight(&a.priority), scheduler.weight(&b.priority));
                prop_assert!(wa <= 3 && wb <= 3);
                prop_assert!(wa >= wb);
                if wa == wb {
                    prop_assert!(a.created_at >= b.created_at);
                    if a.created_at == b.created_at {
                        // generated ids are input positions
                        let ia: usize = a.id.parse().unwrap();
                        let ib: usize = b.id.parse().unwrap();
                        prop_assert!(ia < ib);
                    }
                }
            }
        }
    }
}
