use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Category {
    Housing,
    Food,
    Finance,
    Admin,
    Transportation,
    Internal,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 7] = [
        Category::Housing,
        Category::Food,
        Category::Finance,
        Category::Admin,
        Category::Transportation,
        Category::Internal,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Finance => "Finance",
            Category::Admin => "Admin",
            Category::Transportation => "Transportation",
            Category::Internal => "Internal",
            Category::General => "General",
        }
    }

    /// Parse a classifier label, falling back to General for anything unrecognized
    pub fn from_label(label: Option<&str>) -> Self {
        label
            .and_then(|l| l.parse().ok())
            .unwrap_or(Category::General)
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket priority. Unrecognized labels are kept (lowercased) so they can be
/// displayed, but rank below `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Priority {
    Urgent,
    Important,
    Low,
    Other(String),
}

impl Priority {
    /// Parse a classifier label; a missing label means `Low`
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Priority::Low;
        };
        match label.trim().to_lowercase().as_str() {
            "urgent" => Priority::Urgent,
            "important" => Priority::Important,
            "low" => Priority::Low,
            other => Priority::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Important => "important",
            Priority::Low => "low",
            Priority::Other(s) => s,
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::Urgent)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Unread,
    Read,
}

impl Status {
    pub fn is_read(&self) -> bool {
        matches!(self, Status::Read)
    }
}

pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Canonical ticket. Only `status` ever changes after normalization, and only
/// through the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: String,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub category: Category,
    pub priority: Priority,
    /// `None` is the unknown-date sentinel; it sorts older than any real date
    pub created_at: Option<DateTime<Utc>>,
    pub status: Status,
    pub ticket_reference: String,
    pub reasoning: String,
    pub suggested_department: String,
    pub sentiment: String,
}

impl Ticket {
    pub fn is_negative(&self) -> bool {
        self.sentiment == "Negative"
    }

    /// Short date for list rows: "Jan 15 10:30", or the unknown-date label
    pub fn date_display(&self) -> String {
        match self.created_at {
            Some(ts) => ts.format("%b %d %H:%M").to_string(),
            None => UNKNOWN_DATE.to_string(),
        }
    }

    /// Full date for the detail pane
    pub fn date_long(&self) -> String {
        match self.created_at {
            Some(ts) => ts.format("%Y-%m-%d %H:%M UTC").to_string(),
            None => UNKNOWN_DATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("housing".parse::<Category>(), Ok(Category::Housing));
        assert_eq!(" FOOD ".parse::<Category>(), Ok(Category::Food));
        assert!("Unknown".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_fallback() {
        assert_eq!(Category::from_label(Some("Unknown")), Category::General);
        assert_eq!(Category::from_label(None), Category::General);
        assert_eq!(Category::from_label(Some("Finance")), Category::Finance);
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(Priority::from_label(Some("URGENT")), Priority::Urgent);
        assert_eq!(Priority::from_label(Some("Important")), Priority::Important);
        assert_eq!(Priority::from_label(None), Priority::Low);
        assert_eq!(
            Priority::from_label(Some("Critical")),
            Priority::Other("critical".to_string())
        );
        assert_eq!(Priority::from_label(Some("Critical")).as_str(), "critical");
    }
}
