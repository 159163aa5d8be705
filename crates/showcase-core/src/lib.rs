//! Domain layer for the CX showcase.
//!
//! Holds the data model, the SDK contracts and the monitoring state machine.
//! Nothing here depends on a runtime or a UI binding mechanism.

pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod event;
pub mod monitor;
pub mod policy;
pub mod session;

pub use client::{CxClient, CxEventListener, DisplayDecision};
pub use content::{Content, PresentationType};
pub use error::{Result, SdkError, SessionStartError, ShowcaseError};
pub use event::{AnalyticsEvent, EventCategory};
pub use monitor::{ButtonSubscription, ContentMonitor, TriggerPointSubscription};
pub use policy::{AlwaysAllow, DisplayPolicy, SuppressTriggerPoints};
pub use session::{Session, UserAttributes};

/// Maximum number of entries kept in the analytics log.
pub const MAX_ANALYTICS_EVENTS: usize = 50;
