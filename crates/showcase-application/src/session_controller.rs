//! Session lifecycle on top of the SDK.

use std::sync::Arc;

use showcase_core::session::validate_user_id;
use showcase_core::{CxClient, EventCategory, Session, SessionStartError, UserAttributes};
use tokio::sync::watch;

use crate::analytics_log::AnalyticsLog;
use crate::published::Published;

/// Owns the (at most one) active session.
///
/// The session is published as a single `Option<Session>`, so observers never
/// see an active flag without a user id or the other way round.
pub struct SessionController {
    client: Arc<dyn CxClient>,
    session: Published<Option<Session>>,
}

impl SessionController {
    pub fn new(client: Arc<dyn CxClient>) -> Self {
        Self {
            client,
            session: Published::new(None),
        }
    }

    /// Performs the SDK half of a session start.
    ///
    /// This touches no view state and can run on any task. Its result must be
    /// handed to [`complete_start`](Self::complete_start) on the UI context.
    pub async fn request_start(
        client: &dyn CxClient,
        user_id: &str,
        attributes: Option<&UserAttributes>,
    ) -> Result<(), SessionStartError> {
        validate_user_id(user_id)?;
        client.start_user_session(user_id, attributes).await
    }

    /// Starts a session and applies the outcome.
    ///
    /// There is no retry. A failure is recorded in the log and returned; the
    /// caller decides whether to offer another attempt.
    pub async fn start_session(
        &mut self,
        log: &AnalyticsLog,
        user_id: String,
        attributes: Option<UserAttributes>,
    ) -> Result<(), SessionStartError> {
        let result = Self::request_start(self.client.as_ref(), &user_id, attributes.as_ref()).await;
        self.complete_start(log, user_id, attributes, result)
    }

    /// Applies the outcome of [`request_start`](Self::request_start).
    pub fn complete_start(
        &mut self,
        log: &AnalyticsLog,
        user_id: String,
        attributes: Option<UserAttributes>,
        result: Result<(), SessionStartError>,
    ) -> Result<(), SessionStartError> {
        match result.and_then(|()| Session::new(user_id, attributes)) {
            Ok(session) => {
                tracing::info!("[SessionController] Session started for user: {}", session.user_id);
                log.push(EventCategory::SessionStarted, format!("User: {}", session.user_id));
                self.session.set_if_changed(Some(session));
                Ok(())
            }
            Err(err) => {
                tracing::warn!("[SessionController] Failed to start session: {}", err);
                log.push(EventCategory::SessionError, err.to_string());
                Err(err)
            }
        }
    }

    /// Ends the session. Always succeeds, even when no session is active.
    pub fn end_session(&mut self, log: &AnalyticsLog) {
        self.client.end_user_session();
        self.session.set_if_changed(None);
        log.push(EventCategory::SessionEnded, "User logged out");
        tracing::info!("[SessionController] Session ended");
    }

    pub fn client(&self) -> &Arc<dyn CxClient> {
        &self.client
    }

    pub fn is_active(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.user_id.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeCxClient;

    fn premium() -> Option<UserAttributes> {
        Some(UserAttributes::from([("role".to_string(), "premium".to_string())]))
    }

    #[tokio::test]
    async fn test_start_session_success() {
        let client = FakeCxClient::new();
        let mut controller = SessionController::new(client.clone());
        let log = AnalyticsLog::new();

        controller
            .start_session(&log, "u1".to_string(), premium())
            .await
            .unwrap();

        assert!(controller.is_active());
        assert_eq!(controller.current_user_id().as_deref(), Some("u1"));
        assert_eq!(
            controller.session().unwrap().attributes.unwrap()["role"],
            "premium"
        );
        assert_eq!(client.started_users(), vec!["u1"]);

        let event = log.latest().unwrap();
        assert_eq!(event.category, EventCategory::SessionStarted);
        assert_eq!(event.detail, "User: u1");
    }

    #[tokio::test]
    async fn test_network_failure_leaves_session_inactive() {
        let client = FakeCxClient::new();
        client.fail_next_start(SessionStartError::network("The network connection was lost"));
        let mut controller = SessionController::new(client.clone());
        let log = AnalyticsLog::new();

        let err = controller
            .start_session(&log, "u1".to_string(), premium())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionStartError::Network(_)));
        assert!(!controller.is_active());
        assert!(controller.current_user_id().is_none());
        assert_eq!(log.len(), 1);
        let event = log.latest().unwrap();
        assert_eq!(event.category, EventCategory::SessionError);
        assert!(event.detail.contains("The network connection was lost"));
    }

    #[tokio::test]
    async fn test_empty_user_id_never_reaches_sdk() {
        let client = FakeCxClient::new();
        let mut controller = SessionController::new(client.clone());
        let log = AnalyticsLog::new();

        let err = controller
            .start_session(&log, String::new(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionStartError::Validation(_)));
        assert!(client.started_users().is_empty());
        assert!(!controller.is_active());
        assert_eq!(log.latest().unwrap().category, EventCategory::SessionError);
    }

    #[tokio::test]
    async fn test_end_session_clears_identity() {
        let client = FakeCxClient::new();
        let mut controller = SessionController::new(client.clone());
        let log = AnalyticsLog::new();
        controller
            .start_session(&log, "u1".to_string(), None)
            .await
            .unwrap();
        let mut rx = controller.subscribe();

        controller.end_session(&log);

        assert!(!controller.is_active());
        assert!(controller.current_user_id().is_none());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
        assert_eq!(client.ended(), 1);
        let event = log.latest().unwrap();
        assert_eq!(event.category, EventCategory::SessionEnded);
        assert_eq!(event.detail, "User logged out");
    }

    #[test]
    fn test_end_session_without_active_session() {
        let client = FakeCxClient::new();
        let mut controller = SessionController::new(client.clone());
        let log = AnalyticsLog::new();

        controller.end_session(&log);

        assert!(!controller.is_active());
        assert_eq!(client.ended(), 1);
        assert_eq!(log.len(), 1);
    }
}
