//! Hand-written SDK double shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use showcase_core::{
    Content, CxClient, CxEventListener, PresentationType, SessionStartError, UserAttributes,
};

#[derive(Default)]
struct FakeState {
    content: Vec<Content>,
    start_results: VecDeque<Result<(), SessionStartError>>,
    started_users: Vec<String>,
    ended: usize,
    triggered: Vec<String>,
    shown: Vec<Option<String>>,
    has_content_queries: usize,
    listener: Option<Arc<dyn CxEventListener>>,
    debug: bool,
}

#[derive(Default)]
pub(crate) struct FakeCxClient {
    state: Mutex<FakeState>,
}

impl FakeCxClient {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn set_content(&self, content: Vec<Content>) {
        self.state.lock().unwrap().content = content;
    }

    pub(crate) fn fail_next_start(&self, error: SessionStartError) {
        self.state.lock().unwrap().start_results.push_back(Err(error));
    }

    pub(crate) fn started_users(&self) -> Vec<String> {
        self.state.lock().unwrap().started_users.clone()
    }

    pub(crate) fn ended(&self) -> usize {
        self.state.lock().unwrap().ended
    }

    pub(crate) fn triggered(&self) -> Vec<String> {
        self.state.lock().unwrap().triggered.clone()
    }

    pub(crate) fn shown(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().shown.clone()
    }

    pub(crate) fn has_content_queries(&self) -> usize {
        self.state.lock().unwrap().has_content_queries
    }

    pub(crate) fn listener(&self) -> Option<Arc<dyn CxEventListener>> {
        self.state.lock().unwrap().listener.clone()
    }
}

pub(crate) fn popup(trigger_point: &str) -> Content {
    Content::new(format!("popup-{trigger_point}"), trigger_point, PresentationType::Popup)
}

pub(crate) fn button(trigger_point: &str) -> Content {
    Content::new(format!("button-{trigger_point}"), trigger_point, PresentationType::Button)
}

#[async_trait]
impl CxClient for FakeCxClient {
    async fn start_user_session(
        &self,
        user_id: &str,
        _attributes: Option<&UserAttributes>,
    ) -> Result<(), SessionStartError> {
        let mut state = self.state.lock().unwrap();
        let result = state.start_results.pop_front().unwrap_or(Ok(()));
        if result.is_ok() {
            state.started_users.push(user_id.to_string());
        }
        result
    }

    fn end_user_session(&self) {
        self.state.lock().unwrap().ended += 1;
    }

    fn trigger_point(&self, code: &str) {
        self.state.lock().unwrap().triggered.push(code.to_string());
    }

    fn has_content(&self, trigger_point: &str, presentation_type: Option<PresentationType>) -> bool {
        let mut state = self.state.lock().unwrap();
        state.has_content_queries += 1;
        state
            .content
            .iter()
            .any(|content| content.matches(trigger_point, presentation_type))
    }

    fn has_user_triggered_content_for_trigger_point(&self, trigger_point: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .content
            .iter()
            .any(|content| content.matches(trigger_point, Some(PresentationType::Button)))
    }

    fn show_user_triggered_content(&self, trigger_point: Option<&str>) {
        self.state
            .lock()
            .unwrap()
            .shown
            .push(trigger_point.map(str::to_string));
    }

    fn set_listener(&self, listener: Arc<dyn CxEventListener>) {
        self.state.lock().unwrap().listener = Some(listener);
    }

    fn debug_mode(&self) -> bool {
        self.state.lock().unwrap().debug
    }

    fn set_debug_mode(&self, enabled: bool) {
        self.state.lock().unwrap().debug = enabled;
    }
}
