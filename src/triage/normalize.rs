use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{Category, Priority, Status, Ticket};

pub const DEFAULT_SENDER: &str = "Unknown";
pub const DEFAULT_SUBJECT: &str = "(No Subject)";
pub const DEFAULT_BODY: &str = "...";
pub const DEFAULT_REFERENCE: &str = "N/A";
pub const DEFAULT_REASONING: &str = "Analysis pending...";
pub const DEFAULT_DEPARTMENT: &str = "General Desk";
pub const DEFAULT_SENTIMENT: &str = "Neutral";

/// Outer shapes the classifier webhook is known to answer with
#[derive(Debug, Clone, PartialEq)]
pub enum RawEnvelope {
    /// `[{"data": [...]}, ...]`
    Nested(Vec<Value>),
    /// `{"data": [...]}`
    Wrapped(Vec<Value>),
    /// `[...]`
    Bare(Vec<Value>),
    Empty,
}

impl RawEnvelope {
    /// Pick the first shape that yields a non-empty record list.
    /// Order: nested data array, wrapped data array, bare array.
    pub fn resolve(value: Value) -> Self {
        match value {
            Value::Array(mut items) => {
                let nested = match items.first_mut().and_then(|first| first.get_mut("data")) {
                    Some(Value::Array(inner)) if !inner.is_empty() => Some(std::mem::take(inner)),
                    _ => None,
                };
                if let Some(inner) = nested {
                    RawEnvelope::Nested(inner)
                } else if items.is_empty() {
                    RawEnvelope::Empty
                } else {
                    RawEnvelope::Bare(items)
                }
            }
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(inner)) if !inner.is_empty() => RawEnvelope::Wrapped(inner),
                _ => RawEnvelope::Empty,
            },
            _ => RawEnvelope::Empty,
        }
    }

    pub fn into_records(self) -> Vec<Value> {
        match self {
            RawEnvelope::Nested(items) | RawEnvelope::Wrapped(items) | RawEnvelope::Bare(items) => {
                items
            }
            RawEnvelope::Empty => Vec::new(),
        }
    }
}

/// One record as the classifier sends it. Every field is optional and
/// loosely typed; see `lenient_text`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTicket {
    #[serde(deserialize_with = "lenient_text")]
    pub ticket_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub from_email: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub subject: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub final_email_body: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub priority: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub reasoning: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub suggested_department: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub sentiment: Option<String>,
}

/// Strings pass through (empty means absent), numbers become their decimal
/// text, everything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

impl RawTicket {
    /// Never fails: a record that is not an object becomes an empty record
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn into_ticket(self, index: usize) -> Ticket {
        let status = if self.status.as_deref() == Some("DONE") {
            Status::Read
        } else {
            Status::Unread
        };

        Ticket {
            id: self
                .ticket_id
                .clone()
                .unwrap_or_else(|| format!("TEMP-{}", index)),
            sender: self.from_email.unwrap_or_else(|| DEFAULT_SENDER.to_string()),
            subject: self.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            body: self
                .final_email_body
                .or(self.content)
                .unwrap_or_else(|| DEFAULT_BODY.to_string()),
            category: Category::from_label(self.category.as_deref()),
            priority: Priority::from_label(self.priority.as_deref()),
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            status,
            ticket_reference: self
                .ticket_id
                .unwrap_or_else(|| DEFAULT_REFERENCE.to_string()),
            reasoning: self
                .reasoning
                .unwrap_or_else(|| DEFAULT_REASONING.to_string()),
            suggested_department: self
                .suggested_department
                .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
            sentiment: self
                .sentiment
                .unwrap_or_else(|| DEFAULT_SENTIMENT.to_string()),
        }
    }
}

/// Normalize raw records one-to-one, keeping their order
pub fn normalize(records: Vec<Value>) -> Vec<Ticket> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| RawTicket::from_value(record).into_ticket(index))
        .collect()
}

/// Unwrap a full webhook response and normalize whatever records it holds
pub fn normalize_response(value: Value) -> Vec<Ticket> {
    normalize(RawEnvelope::resolve(value).into_records())
}

/// Parse an ISO-ish timestamp. Naive forms are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    const ZONED_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M%z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M%z",
    ];
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    // `%z` has no spelling for a literal Z
    let zoned = match raw.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        Some(rest) => format!("{}+0000", rest),
        None => raw.to_string(),
    };
    for format in ZONED_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(&zoned, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
