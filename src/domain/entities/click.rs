//! Click entity representing a single resolution of a short code.

use chrono::{DateTime, Utc};

/// A recorded click.
///
/// `short_code` is not a foreign key: clicks outlive the record they point at
/// so the audit history survives deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: i64,
    pub short_code: String,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Input data for recording a click.
///
/// `clicked_at` is captured when the redirect is served, not when the
/// background worker persists the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub short_code: String,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
