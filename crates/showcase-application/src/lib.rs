//! Application layer for the CX showcase.
//!
//! This crate bridges the event-driven SDK into observable view state: the
//! session controller, the event bridge, the view model that combines them,
//! and the single-context runtime that owns it.

pub mod analytics_log;
pub mod event_bridge;
pub mod listener;
pub mod published;
pub mod runtime;
pub mod session_controller;
pub mod view_model;

#[cfg(test)]
mod test_support;

pub use analytics_log::AnalyticsLog;
pub use event_bridge::{EventBridge, UserTriggeredContentState};
pub use listener::{BridgeListener, SdkCallback};
pub use published::Published;
pub use runtime::{UiContext, ViewModelHandle};
pub use session_controller::SessionController;
pub use view_model::{ShowcaseViewModel, ViewBindings, ViewSnapshot};
