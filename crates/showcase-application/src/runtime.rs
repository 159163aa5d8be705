//! UI-affinity runtime.
//!
//! All view state lives in one task, the [`UiContext`]. It drains two inboxes:
//! SDK callbacks (pushed by the [`BridgeListener`] from whatever thread the
//! SDK uses) and UI commands from [`ViewModelHandle`]s. Pending callbacks are
//! always applied before the next command, so callbacks the SDK fires while
//! handling one command are visible to the command after it.
//!
//! A session start awaits the SDK on the caller's task; only its outcome is
//! sent to the context, which then applies it.

use std::sync::Arc;

use showcase_core::error::Result;
use showcase_core::{
    CxClient, DisplayPolicy, PresentationType, SessionStartError, ShowcaseError, UserAttributes,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::listener::{BridgeListener, SdkCallback};
use crate::session_controller::SessionController;
use crate::view_model::{ShowcaseViewModel, ViewBindings, ViewSnapshot};

#[derive(Debug)]
pub enum UiCommand {
    CompleteSessionStart {
        user_id: String,
        attributes: Option<UserAttributes>,
        result: std::result::Result<(), SessionStartError>,
        reply: oneshot::Sender<std::result::Result<(), SessionStartError>>,
    },
    EndSession,
    TriggerPoint(String),
    ShowUserTriggeredContent(Option<String>),
    SetupContentRefresh {
        trigger_points: Vec<String>,
        presentation_type: Option<PresentationType>,
    },
    SetupButtonContentMonitoring(String),
    ClearAnalytics,
    Snapshot(oneshot::Sender<ViewSnapshot>),
    Shutdown,
}

/// Owner of the view model. Runs until shut down.
pub struct UiContext {
    view_model: ShowcaseViewModel,
    callbacks: mpsc::UnboundedReceiver<SdkCallback>,
    commands: mpsc::UnboundedReceiver<UiCommand>,
}

impl UiContext {
    /// Registers the bridge listener with `client` and spawns the context.
    ///
    /// The context stops on [`ViewModelHandle::shutdown`] or once every
    /// handle has been dropped.
    pub fn spawn(
        client: Arc<dyn CxClient>,
        policy: Arc<dyn DisplayPolicy>,
    ) -> (ViewModelHandle, JoinHandle<()>) {
        let (callback_sender, callbacks) = mpsc::unbounded_channel();
        client.set_listener(Arc::new(BridgeListener::forwarding_to(
            callback_sender,
            policy,
        )));

        let (sender, commands) = mpsc::unbounded_channel();
        let view_model = ShowcaseViewModel::new(client.clone());
        let handle = ViewModelHandle {
            sender,
            client,
            bindings: view_model.bindings(),
        };
        let context = Self {
            view_model,
            callbacks,
            commands,
        };

        (handle, tokio::spawn(context.run()))
    }

    async fn run(mut self) {
        tracing::debug!("[UiContext] Started");
        loop {
            tokio::select! {
                biased;
                Some(callback) = self.callbacks.recv() => {
                    self.view_model.handle_callback(callback);
                }
                command = self.commands.recv() => match command {
                    Some(command) => {
                        if !self.dispatch(command) {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
        tracing::debug!("[UiContext] Stopped");
    }

    /// Applies one command. Returns `false` once shutdown was requested.
    fn dispatch(&mut self, command: UiCommand) -> bool {
        match command {
            UiCommand::CompleteSessionStart {
                user_id,
                attributes,
                result,
                reply,
            } => {
                let outcome = self
                    .view_model
                    .complete_session_start(user_id, attributes, result);
                // The caller may have stopped waiting
                let _ = reply.send(outcome);
            }
            UiCommand::EndSession => self.view_model.end_session(),
            UiCommand::TriggerPoint(code) => self.view_model.trigger_point(&code),
            UiCommand::ShowUserTriggeredContent(trigger_point) => self
                .view_model
                .show_user_triggered_content(trigger_point.as_deref()),
            UiCommand::SetupContentRefresh {
                trigger_points,
                presentation_type,
            } => self
                .view_model
                .setup_content_refresh(trigger_points, presentation_type),
            UiCommand::SetupButtonContentMonitoring(trigger_point) => self
                .view_model
                .setup_button_content_monitoring(trigger_point),
            UiCommand::ClearAnalytics => self.view_model.clear_analytics(),
            UiCommand::Snapshot(reply) => {
                // The caller may have stopped waiting
                let _ = reply.send(self.view_model.snapshot());
            }
            UiCommand::Shutdown => return false,
        }
        true
    }
}

/// Cloneable front door to a running [`UiContext`].
#[derive(Clone)]
pub struct ViewModelHandle {
    sender: mpsc::UnboundedSender<UiCommand>,
    client: Arc<dyn CxClient>,
    bindings: ViewBindings,
}

impl ViewModelHandle {
    fn send(&self, command: UiCommand) -> Result<()> {
        self.sender
            .send(command)
            .map_err(|_| ShowcaseError::context_closed("view model is no longer running"))
    }

    /// Starts a session.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::SessionStart`] when the SDK rejects the start
    /// (the failure is also recorded in the log), or
    /// [`ShowcaseError::ContextClosed`] when the context is gone.
    pub async fn start_session(
        &self,
        user_id: impl Into<String>,
        attributes: Option<UserAttributes>,
    ) -> Result<()> {
        let user_id = user_id.into();
        let result =
            SessionController::request_start(self.client.as_ref(), &user_id, attributes.as_ref())
                .await;

        let (reply, outcome) = oneshot::channel();
        self.send(UiCommand::CompleteSessionStart {
            user_id,
            attributes,
            result,
            reply,
        })?;
        outcome
            .await
            .map_err(|_| ShowcaseError::context_closed("session start outcome dropped"))?
            .map_err(ShowcaseError::from)
    }

    pub fn end_session(&self) -> Result<()> {
        self.send(UiCommand::EndSession)
    }

    pub fn trigger_point(&self, code: impl Into<String>) -> Result<()> {
        self.send(UiCommand::TriggerPoint(code.into()))
    }

    pub fn show_user_triggered_content(&self, trigger_point: Option<String>) -> Result<()> {
        self.send(UiCommand::ShowUserTriggeredContent(trigger_point))
    }

    pub fn setup_content_refresh(
        &self,
        trigger_points: Vec<String>,
        presentation_type: Option<PresentationType>,
    ) -> Result<()> {
        self.send(UiCommand::SetupContentRefresh {
            trigger_points,
            presentation_type,
        })
    }

    pub fn setup_button_content_monitoring(&self, trigger_point: impl Into<String>) -> Result<()> {
        self.send(UiCommand::SetupButtonContentMonitoring(
            trigger_point.into(),
        ))
    }

    pub fn clear_analytics(&self) -> Result<()> {
        self.send(UiCommand::ClearAnalytics)
    }

    /// Direct SDK query; reads no view state.
    pub fn has_content(&self, code: &str, presentation_type: Option<PresentationType>) -> bool {
        self.client.has_content(code, presentation_type)
    }

    pub fn debug_mode(&self) -> bool {
        self.client.debug_mode()
    }

    pub fn set_debug_mode(&self, enabled: bool) {
        self.client.set_debug_mode(enabled);
    }

    /// Copies the current view state.
    ///
    /// Every command sent before this call, and every callback those
    /// commands caused, has been applied when it returns.
    pub async fn snapshot(&self) -> Result<ViewSnapshot> {
        let (reply, snapshot) = oneshot::channel();
        self.send(UiCommand::Snapshot(reply))?;
        snapshot
            .await
            .map_err(|_| ShowcaseError::context_closed("snapshot dropped"))
    }

    pub fn bindings(&self) -> ViewBindings {
        self.bindings.clone()
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(UiCommand::Shutdown)
    }
}
