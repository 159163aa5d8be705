//! In-memory SDK client.
//!
//! Serves the content listed in the mock-mode configuration and reports
//! callbacks to the registered listener, without any backend. Tests and the
//! demo shell can also script availability changes, dismissals, errors and
//! start failures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use showcase_core::config::{MockModeConfig, SdkConfig};
use showcase_core::{
    Content, CxClient, CxEventListener, DisplayDecision, PresentationType, SdkError,
    SessionStartError, UserAttributes,
};

#[derive(Default)]
struct ClientState {
    user_id: Option<String>,
    content: Vec<Content>,
    showing: Option<Content>,
    start_failures: VecDeque<SessionStartError>,
    listener: Option<Arc<dyn CxEventListener>>,
}

pub struct InMemoryCxClient {
    organization_code: String,
    mock_mode: MockModeConfig,
    debug_mode: AtomicBool,
    state: Mutex<ClientState>,
}

impl InMemoryCxClient {
    pub fn new(config: &SdkConfig) -> Self {
        tracing::info!(
            "[InMemoryCxClient] Configured for organization '{}' (mock mode: {}, {} seeded item(s))",
            config.organization_code,
            config.mock_mode.enabled,
            config.mock_mode.content.len()
        );
        Self {
            organization_code: config.organization_code.clone(),
            mock_mode: config.mock_mode.clone(),
            debug_mode: AtomicBool::new(config.debug_mode),
            state: Mutex::new(ClientState::default()),
        }
    }

    pub fn organization_code(&self) -> &str {
        &self.organization_code
    }

    pub fn active_user(&self) -> Option<String> {
        self.state().user_id.clone()
    }

    /// Makes the next session start fail with `error`.
    pub fn fail_next_start(&self, error: SessionStartError) {
        self.state().start_failures.push_back(error);
    }

    /// Adds a content item and announces it, as a backend push would.
    pub fn publish_content(&self, content: Content) {
        self.state().content.push(content.clone());
        if let Some(listener) = self.listener() {
            listener.on_content_received(vec![content]);
            listener.on_content_changed();
        }
    }

    /// Removes the content item with `id`. Returns whether it existed.
    pub fn retract_content(&self, id: &str) -> bool {
        let removed = {
            let mut state = self.state();
            let before = state.content.len();
            state.content.retain(|content| content.id != id);
            before != state.content.len()
        };
        if removed {
            self.notify_changed();
        }
        removed
    }

    /// Closes the content on screen, as the user would.
    pub fn dismiss_content(&self) -> bool {
        let dismissed = self.state().showing.take();
        match (dismissed, self.listener()) {
            (Some(content), Some(listener)) => {
                self.trace(format_args!("dismissed {}", content.id));
                listener.on_content_dismissed();
                true
            }
            (dismissed, _) => dismissed.is_some(),
        }
    }

    /// Reports a generic SDK error to the listener.
    pub fn report_error(&self, message: impl Into<String>) {
        if let Some(listener) = self.listener() {
            listener.on_error(SdkError::new(message));
        }
    }

    pub fn showing(&self) -> Option<Content> {
        self.state().showing.clone()
    }

    fn state(&self) -> MutexGuard<'_, ClientState> {
        // State stays consistent even if a listener panicked mid-callback
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn listener(&self) -> Option<Arc<dyn CxEventListener>> {
        self.state().listener.clone()
    }

    fn notify_changed(&self) {
        if let Some(listener) = self.listener() {
            listener.on_content_changed();
        }
    }

    fn trace(&self, message: std::fmt::Arguments<'_>) {
        if self.debug_mode() {
            tracing::info!("[InMemoryCxClient] {}", message);
        } else {
            tracing::trace!("[InMemoryCxClient] {}", message);
        }
    }

    /// Runs the display sequence for `content`.
    ///
    /// Popups are consumed once shown; on-demand content stays available.
    fn present(&self, content: Content) {
        let listener = self.listener();
        let decision = listener
            .as_ref()
            .map_or(DisplayDecision::Allow, |l| l.on_will_show_content(&content));
        if decision == DisplayDecision::Cancel {
            self.trace(format_args!("display of {} cancelled by listener", content.id));
            return;
        }

        let consumed = content.presentation_type == PresentationType::Popup;
        {
            let mut state = self.state();
            if consumed {
                state.content.retain(|c| c.id != content.id);
            }
            state.showing = Some(content.clone());
        }
        self.trace(format_args!("showing {} for {}", content.id, content.trigger_point));

        if let Some(listener) = listener {
            listener.on_did_show_content(&content);
            if consumed {
                listener.on_content_changed();
            }
        }
    }
}

#[async_trait]
impl CxClient for InMemoryCxClient {
    async fn start_user_session(
        &self,
        user_id: &str,
        attributes: Option<&UserAttributes>,
    ) -> Result<(), SessionStartError> {
        if let Some(error) = self.state().start_failures.pop_front() {
            return Err(error);
        }
        if user_id.trim().is_empty() {
            return Err(SessionStartError::validation("userId is required"));
        }
        if !self.mock_mode.enabled {
            return Err(SessionStartError::network(format!(
                "no backend reachable for organization '{}'",
                self.organization_code
            )));
        }

        let content: Vec<Content> = self
            .mock_mode
            .content
            .iter()
            .enumerate()
            .map(|(index, seed)| seed.to_content(index))
            .collect();
        {
            let mut state = self.state();
            state.user_id = Some(user_id.to_string());
            state.content = content.clone();
            state.showing = None;
        }
        self.trace(format_args!(
            "session started for {} with {} attribute(s)",
            user_id,
            attributes.map_or(0, |attrs| attrs.len())
        ));

        if let Some(listener) = self.listener() {
            listener.on_content_received(content);
            listener.on_content_changed();
        }
        Ok(())
    }

    fn end_user_session(&self) {
        let had_session = {
            let mut state = self.state();
            state.content.clear();
            state.showing = None;
            state.user_id.take().is_some()
        };
        if had_session {
            self.notify_changed();
        }
    }

    fn trigger_point(&self, code: &str) {
        let popup = {
            let state = self.state();
            if state.user_id.is_none() {
                None
            } else {
                state
                    .content
                    .iter()
                    .find(|content| content.matches(code, Some(PresentationType::Popup)))
                    .cloned()
            }
        };
        match popup {
            Some(content) => self.present(content),
            None => self.trace(format_args!("no popup content for {}", code)),
        }
    }

    fn has_content(&self, trigger_point: &str, presentation_type: Option<PresentationType>) -> bool {
        self.state()
            .content
            .iter()
            .any(|content| content.matches(trigger_point, presentation_type))
    }

    fn has_user_triggered_content_for_trigger_point(&self, trigger_point: &str) -> bool {
        self.has_content(trigger_point, Some(PresentationType::Button))
    }

    fn show_user_triggered_content(&self, trigger_point: Option<&str>) {
        let candidate = self
            .state()
            .content
            .iter()
            .filter(|content| content.presentation_type == PresentationType::Button)
            .filter(|content| trigger_point.is_none_or(|code| content.trigger_point == code))
            .next_back()
            .cloned();
        match candidate {
            Some(content) => self.present(content),
            None => self.trace(format_args!(
                "no user-triggered content for {}",
                trigger_point.unwrap_or("most recent")
            )),
        }
    }

    fn set_listener(&self, listener: Arc<dyn CxEventListener>) {
        self.state().listener = Some(listener);
    }

    fn debug_mode(&self) -> bool {
        self.debug_mode.load(Ordering::Relaxed)
    }

    fn set_debug_mode(&self, enabled: bool) {
        self.debug_mode.store(enabled, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::config::SeededContent;

    #[derive(Default)]
    struct RecordingListener {
        calls: Mutex<Vec<String>>,
        cancel: bool,
    }

    impl RecordingListener {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    impl CxEventListener for RecordingListener {
        fn on_error(&self, error: SdkError) {
            self.record(format!("error:{}", error));
        }
        fn on_content_received(&self, content: Vec<Content>) {
            self.record(format!("received:{}", content.len()));
        }
        fn on_will_show_content(&self, content: &Content) -> DisplayDecision {
            self.record(format!("will_show:{}", content.trigger_point));
            if self.cancel {
                DisplayDecision::Cancel
            } else {
                DisplayDecision::Allow
            }
        }
        fn on_did_show_content(&self, content: &Content) {
            self.record(format!("did_show:{}", content.trigger_point));
        }
        fn on_content_dismissed(&self) {
            self.record("dismissed");
        }
        fn on_content_changed(&self) {
            self.record("changed");
        }
    }

    fn config() -> SdkConfig {
        SdkConfig {
            organization_code: "test-org".to_string(),
            debug_mode: false,
            mock_mode: MockModeConfig {
                enabled: true,
                content: vec![
                    SeededContent {
                        trigger_point: "savings-promotion".to_string(),
                        presentation_type: PresentationType::Popup,
                        title: None,
                    },
                    SeededContent {
                        trigger_point: "account-dashboard".to_string(),
                        presentation_type: PresentationType::Button,
                        title: None,
                    },
                ],
            },
        }
    }

    fn client_with_listener(cancel: bool) -> (InMemoryCxClient, Arc<RecordingListener>) {
        let client = InMemoryCxClient::new(&config());
        let listener = Arc::new(RecordingListener {
            cancel,
            ..Default::default()
        });
        client.set_listener(listener.clone());
        (client, listener)
    }

    #[tokio::test]
    async fn test_start_loads_seeded_content() {
        let (client, listener) = client_with_listener(false);
        assert!(!client.has_content("savings-promotion", None));

        client.start_user_session("u1", None).await.unwrap();

        assert_eq!(client.active_user().as_deref(), Some("u1"));
        assert!(client.has_content("savings-promotion", Some(PresentationType::Popup)));
        assert!(client.has_user_triggered_content_for_trigger_point("account-dashboard"));
        assert_eq!(listener.calls(), vec!["received:2", "changed"]);
    }

    #[tokio::test]
    async fn test_scripted_start_failure() {
        let (client, listener) = client_with_listener(false);
        client.fail_next_start(SessionStartError::network("offline"));

        let err = client.start_user_session("u1", None).await.unwrap_err();
        assert_eq!(err, SessionStartError::network("offline"));
        assert!(client.active_user().is_none());
        assert!(listener.calls().is_empty());

        client.start_user_session("u1", None).await.unwrap();
        assert!(client.active_user().is_some());
    }

    #[tokio::test]
    async fn test_mock_mode_disabled_is_network_error() {
        let mut sdk = config();
        sdk.mock_mode.enabled = false;
        let client = InMemoryCxClient::new(&sdk);

        let err = client.start_user_session("u1", None).await.unwrap_err();
        assert!(matches!(err, SessionStartError::Network(_)));
    }

    #[tokio::test]
    async fn test_trigger_point_shows_and_consumes_popup() {
        let (client, listener) = client_with_listener(false);
        client.start_user_session("u1", None).await.unwrap();

        client.trigger_point("savings-promotion");

        assert!(!client.has_content("savings-promotion", None));
        assert_eq!(
            listener.calls()[2..].to_vec(),
            vec!["will_show:savings-promotion", "did_show:savings-promotion", "changed"]
        );
        assert!(client.dismiss_content());
        assert_eq!(listener.calls().last().unwrap(), "dismissed");
        assert!(!client.dismiss_content());
    }

    #[tokio::test]
    async fn test_cancelled_display_keeps_content() {
        let (client, listener) = client_with_listener(true);
        client.start_user_session("u1", None).await.unwrap();

        client.trigger_point("savings-promotion");

        assert!(client.has_content("savings-promotion", None));
        assert!(client.showing().is_none());
        assert_eq!(listener.calls().last().unwrap(), "will_show:savings-promotion");
    }

    #[tokio::test]
    async fn test_show_user_triggered_content_keeps_it_available() {
        let (client, listener) = client_with_listener(false);
        client.start_user_session("u1", None).await.unwrap();

        client.show_user_triggered_content(None);

        assert!(client.has_user_triggered_content_for_trigger_point("account-dashboard"));
        assert_eq!(client.showing().unwrap().trigger_point, "account-dashboard");
        assert_eq!(listener.calls().last().unwrap(), "did_show:account-dashboard");
    }

    #[test]
    fn test_trigger_point_without_session_is_ignored() {
        let (client, listener) = client_with_listener(false);
        client.trigger_point("savings-promotion");
        assert!(listener.calls().is_empty());
    }

    #[tokio::test]
    async fn test_end_session_clears_content() {
        let (client, listener) = client_with_listener(false);
        client.start_user_session("u1", None).await.unwrap();

        client.end_user_session();
        client.end_user_session();

        assert!(client.active_user().is_none());
        assert!(!client.has_user_triggered_content_for_trigger_point("account-dashboard"));
        assert_eq!(listener.calls(), vec!["received:2", "changed", "changed"]);
    }

    #[test]
    fn test_publish_retract_and_errors() {
        let (client, listener) = client_with_listener(false);
        client.publish_content(Content::new("c-1", "low-balance-alert", PresentationType::Popup));
        assert!(client.has_content("low-balance-alert", None));
        assert!(client.retract_content("c-1"));
        assert!(!client.retract_content("c-1"));
        client.report_error("rate limited");

        assert_eq!(
            listener.calls(),
            vec!["received:1", "changed", "changed", "error:rate limited"]
        );
    }

    #[test]
    fn test_debug_mode_toggle() {
        let client = InMemoryCxClient::new(&config());
        assert!(!client.debug_mode());
        client.set_debug_mode(true);
        assert!(client.debug_mode());
    }
}
