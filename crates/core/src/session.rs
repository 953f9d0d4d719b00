//! Session snapshot shared across the access layer.

use chrono::{DateTime, Utc};

use crate::{Capabilities, Role};

/// Snapshot of the authenticated browser session.
///
/// Replaced wholesale on every refresh — never merged — so a logout followed
/// by a failed refresh cannot leak a previous user's capability flags.
///
/// Invariant: an unauthenticated session never carries a CSRF token. The
/// token field is private and every constructor enforces this.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    /// Whether a server round-trip has completed at least once since load.
    pub checked: bool,
    pub authenticated: bool,
    pub username: String,
    pub role: Role,
    pub capabilities: Capabilities,
    csrf_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Session as reported by a completed server round-trip.
    pub fn checked(
        authenticated: bool,
        username: impl Into<String>,
        role: Role,
        capabilities: Capabilities,
        csrf_token: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let csrf_token = if authenticated {
            csrf_token.into()
        } else {
            String::new()
        };

        Self {
            checked: true,
            authenticated,
            username: username.into(),
            role,
            capabilities,
            csrf_token,
            expires_at,
        }
    }

    /// A round-trip completed (or was attempted) but no usable session exists.
    pub fn unauthenticated() -> Self {
        Self {
            checked: true,
            ..Self::default()
        }
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Capability flags after applying role overrides.
    pub fn effective_capabilities(&self) -> Capabilities {
        self.capabilities.effective(self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unchecked_and_empty() {
        let session = Session::default();
        assert!(!session.checked);
        assert!(!session.authenticated);
        assert_eq!(session.csrf_token(), "");
    }

    #[test]
    fn unauthenticated_report_drops_csrf_token() {
        let session = Session::checked(
            false,
            "alice",
            Role::Anonymous,
            Capabilities::NONE,
            "stale-token",
            None,
        );
        assert!(session.checked);
        assert_eq!(session.csrf_token(), "");
    }

    #[test]
    fn authenticated_report_keeps_csrf_token() {
        let session = Session::checked(
            true,
            "alice",
            Role::User,
            Capabilities::NONE,
            "tok-1",
            None,
        );
        assert_eq!(session.csrf_token(), "tok-1");
    }

    #[test]
    fn effective_capabilities_follow_role() {
        let session = Session::checked(
            true,
            "root",
            Role::Admin,
            Capabilities::NONE,
            "tok-2",
            None,
        );
        assert_eq!(session.effective_capabilities(), Capabilities::ALL);
    }
}
