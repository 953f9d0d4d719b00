//! Process-wide session store.

use std::sync::Arc;

use tokio::sync::RwLock;

use meterdesk_client::{ApiClient, ApiError, types::AuthMeResp};
use meterdesk_core::{Capabilities, Role, Session};

/// Single owner of the authenticated [`Session`].
///
/// The only mutator is [`SessionStore::refresh`]; `login` and `logout` both
/// funnel through it, so the snapshot always reflects the server's
/// authoritative view rather than whatever a credential exchange returned.
pub struct SessionStore {
    client: Arc<ApiClient>,
    session: RwLock<Session>,
}

impl SessionStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            session: RwLock::new(Session::default()),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current snapshot. Cheap to clone; replaced wholesale by every refresh.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Re-check the session against the server and overwrite the snapshot.
    ///
    /// On failure the previous snapshot is left untouched and the pipeline's
    /// error propagates unchanged.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let me = self.client.auth_me().await?;
        *self.session.write().await = session_from_report(me);
        Ok(())
    }

    /// Exchange credentials, then refresh unconditionally.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.client.auth_login(username, password).await?;
        self.refresh().await
    }

    /// Terminate the server session, then refresh; the snapshot is expected
    /// to report `authenticated = false` afterwards.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.auth_logout().await?;
        self.refresh().await
    }

    /// Record a completed-but-failed first check (used by the route guard,
    /// which absorbs refresh errors instead of blocking navigation).
    pub(crate) async fn mark_checked_unauthenticated(&self) {
        *self.session.write().await = Session::unauthenticated();
    }
}

/// Build the replacement snapshot from a session-check report.
///
/// Absent wire fields have already defaulted to their empty forms in the DTO;
/// the [`Session`] constructor drops the CSRF token for unauthenticated
/// reports.
fn session_from_report(me: AuthMeResp) -> Session {
    Session::checked(
        me.authenticated,
        me.username,
        Role::from_wire(&me.role),
        Capabilities {
            view_board: me.can_view_board,
            view_nodes: me.can_view_nodes,
            review_requests: me.can_review_requests,
        },
        me.csrf_token,
        me.expires_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_maps_role_and_capabilities() {
        let session = session_from_report(AuthMeResp {
            authenticated: true,
            username: "pat".into(),
            role: "power_user".into(),
            can_view_nodes: true,
            csrf_token: "tok".into(),
            ..AuthMeResp::default()
        });

        assert!(session.checked);
        assert_eq!(session.role, Role::PowerUser);
        assert!(session.capabilities.view_nodes);
        assert!(!session.capabilities.view_board);
        assert_eq!(session.csrf_token(), "tok");
    }

    #[test]
    fn unauthenticated_report_yields_tokenless_session() {
        let session = session_from_report(AuthMeResp {
            authenticated: false,
            csrf_token: "stale".into(),
            ..AuthMeResp::default()
        });

        assert!(session.checked);
        assert!(!session.authenticated);
        assert_eq!(session.csrf_token(), "");
        assert_eq!(session.role, Role::Anonymous);
    }

    #[test]
    fn mapping_is_deterministic() {
        let report = AuthMeResp {
            authenticated: true,
            username: "pat".into(),
            role: "admin".into(),
            csrf_token: "tok".into(),
            ..AuthMeResp::default()
        };
        assert_eq!(
            session_from_report(report.clone()),
            session_from_report(report)
        );
    }
}
