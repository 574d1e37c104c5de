//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;

/// Longest user agent kept with a click.
pub const MAX_USER_AGENT_LENGTH: usize = 500;

/// Longest client address kept with a click (an IPv6 literal fits).
pub const MAX_IP_ADDRESS_LENGTH: usize = 45;

/// Client metadata captured from the redirect request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl ClientInfo {
    pub fn new(user_agent: Option<&str>, ip_address: Option<String>) -> Self {
        Self {
            user_agent: user_agent.map(|s| truncate_chars(s, MAX_USER_AGENT_LENGTH)),
            ip_address: ip_address.map(|s| truncate_chars(&s, MAX_IP_ADDRESS_LENGTH)),
        }
    }
}

/// An in-memory click waiting to be persisted.
///
/// Sent from the resolution path to the background worker over a bounded
/// channel so the redirect response never waits on analytics writes.
///
/// # Usage Flow
///
/// 1. Created by [`crate::application::services::RedirectService`] after a successful resolution
/// 2. Sent to the channel with `try_send` (dropped when the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Converted to [`NewClick`] for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
    pub clicked_at: DateTime<Utc>,
    pub client: ClientInfo,
}

impl ClickEvent {
    /// Creates an event stamped with the current time.
    pub fn new(code: impl Into<String>, client: ClientInfo) -> Self {
        Self {
            code: code.into(),
            clicked_at: Utc::now(),
            client,
        }
    }

    pub fn to_new_click(&self) -> NewClick {
        NewClick {
            short_code: self.code.clone(),
            clicked_at: self.clicked_at,
            user_agent: self.client.user_agent.clone(),
            ip_address: self.client.ip_address.clone(),
        }
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation_full() {
        let event = ClickEvent::new(
            "0000001",
            ClientInfo::new(Some("Mozilla/5.0"), Some("192.168.1.1".to_string())),
        );

        assert_eq!(event.code, "0000001");
        assert_eq!(event.client.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(event.client.ip_address.as_deref(), Some("192.168.1.1"));
    }

    #[test]
    fn test_click_event_creation_minimal() {
        let event = ClickEvent::new("0000002", ClientInfo::default());

        assert!(event.client.user_agent.is_none());
        assert!(event.client.ip_address.is_none());
    }

    #[test]
    fn test_long_user_agent_truncated() {
        let user_agent = "x".repeat(MAX_USER_AGENT_LENGTH + 20);
        let client = ClientInfo::new(Some(&user_agent), None);

        assert_eq!(
            client.user_agent.unwrap().chars().count(),
            MAX_USER_AGENT_LENGTH
        );
    }

    #[test]
    fn test_to_new_click_keeps_timestamp() {
        let event = ClickEvent::new(
            "0000003",
            ClientInfo::new(Some("curl/8.0"), Some("::1".to_string())),
        );
        let new_click = event.to_new_click();

        assert_eq!(new_click.short_code, "0000003");
        assert_eq!(new_click.clicked_at, event.clicked_at);
        assert_eq!(new_click.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(new_click.ip_address.as_deref(), Some("::1"));
    }
}
