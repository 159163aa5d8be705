//! SDK client and listener contracts.
//!
//! The adapter never talks to a global SDK instance. A [`CxClient`] is
//! injected into the view model, which lets tests and the demo shell swap in
//! an in-memory client.

use async_trait::async_trait;
use std::sync::Arc;

use crate::content::{Content, PresentationType};
use crate::error::{SdkError, SessionStartError};
use crate::session::UserAttributes;

/// Answer returned from the pre-display hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayDecision {
    /// Let the SDK display the content
    Allow,
    /// Suppress this display
    Cancel,
}

/// Callback interface the SDK invokes as content and session state evolve.
///
/// Callbacks may arrive on any SDK thread, so implementations must not touch
/// UI-owned state directly.
pub trait CxEventListener: Send + Sync {
    fn on_error(&self, error: SdkError);

    fn on_content_received(&self, content: Vec<Content>);

    /// Called right before content is shown. Returning
    /// [`DisplayDecision::Cancel`] suppresses the display.
    fn on_will_show_content(&self, content: &Content) -> DisplayDecision;

    fn on_did_show_content(&self, content: &Content);

    fn on_content_dismissed(&self);

    /// Content availability changed for one or more trigger points.
    fn on_content_changed(&self);
}

/// Operations the adapter consumes from the customer-experience SDK.
#[async_trait]
pub trait CxClient: Send + Sync {
    /// Starts a user session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionStartError`] on network or validation failure.
    async fn start_user_session(
        &self,
        user_id: &str,
        attributes: Option<&UserAttributes>,
    ) -> Result<(), SessionStartError>;

    fn end_user_session(&self);

    /// Fire-and-forget notification that the user reached `code`.
    fn trigger_point(&self, code: &str);

    fn has_content(&self, trigger_point: &str, presentation_type: Option<PresentationType>)
    -> bool;

    fn has_user_triggered_content_for_trigger_point(&self, trigger_point: &str) -> bool;

    /// Displays on-demand content for `trigger_point`, or the most recent
    /// on-demand content when `None`.
    fn show_user_triggered_content(&self, trigger_point: Option<&str>);

    /// Registers the listener, replacing any previous one.
    fn set_listener(&self, listener: Arc<dyn CxEventListener>);

    fn debug_mode(&self) -> bool;

    fn set_debug_mode(&self, enabled: bool);
}
