//! SDK listener subscription.
//!
//! [`BridgeListener`] is the one object registered with the SDK. It turns each
//! callback into a typed [`SdkCallback`] and pushes it into a sink, usually
//! the UI context's inbox. It never touches view state itself: callbacks may
//! run on any SDK thread.

use std::sync::Arc;

use showcase_core::{
    AlwaysAllow, Content, CxEventListener, DisplayDecision, DisplayPolicy, SdkError,
};
use tokio::sync::mpsc;

/// A callback received from the SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkCallback {
    Error(SdkError),
    ContentReceived(Vec<Content>),
    /// Pre-display hook, carrying the decision already returned to the SDK
    WillShowContent {
        content: Content,
        decision: DisplayDecision,
    },
    DidShowContent(Content),
    ContentDismissed,
    ContentChanged,
}

type Sink = Box<dyn Fn(SdkCallback) + Send + Sync>;

pub struct BridgeListener {
    sink: Sink,
    policy: Arc<dyn DisplayPolicy>,
}

impl BridgeListener {
    /// Creates a listener that hands every callback to `sink`.
    pub fn new<F>(sink: F, policy: Arc<dyn DisplayPolicy>) -> Self
    where
        F: Fn(SdkCallback) + Send + Sync + 'static,
    {
        Self {
            sink: Box::new(sink),
            policy,
        }
    }

    /// Creates a listener that forwards callbacks into an unbounded channel.
    pub fn forwarding_to<M>(sender: mpsc::UnboundedSender<M>, policy: Arc<dyn DisplayPolicy>) -> Self
    where
        M: From<SdkCallback> + Send + 'static,
    {
        Self::new(
            move |callback| {
                if sender.send(M::from(callback)).is_err() {
                    tracing::debug!("[BridgeListener] Receiver dropped, callback discarded");
                }
            },
            policy,
        )
    }

    /// Same as [`forwarding_to`](Self::forwarding_to) with the default
    /// always-allow policy.
    pub fn allow_all<M>(sender: mpsc::UnboundedSender<M>) -> Self
    where
        M: From<SdkCallback> + Send + 'static,
    {
        Self::forwarding_to(sender, Arc::new(AlwaysAllow))
    }
}

impl CxEventListener for BridgeListener {
    fn on_error(&self, error: SdkError) {
        (self.sink)(SdkCallback::Error(error));
    }

    fn on_content_received(&self, content: Vec<Content>) {
        (self.sink)(SdkCallback::ContentReceived(content));
    }

    fn on_will_show_content(&self, content: &Content) -> DisplayDecision {
        let decision = self.policy.decide(content);
        (self.sink)(SdkCallback::WillShowContent {
            content: content.clone(),
            decision,
        });
        decision
    }

    fn on_did_show_content(&self, content: &Content) {
        (self.sink)(SdkCallback::DidShowContent(content.clone()));
    }

    fn on_content_dismissed(&self) {
        (self.sink)(SdkCallback::ContentDismissed);
    }

    fn on_content_changed(&self) {
        (self.sink)(SdkCallback::ContentChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::{PresentationType, SuppressTriggerPoints};

    #[test]
    fn test_forwards_every_callback_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel::<SdkCallback>();
        let listener = BridgeListener::allow_all(tx);
        let content = Content::new("c-1", "account-dashboard", PresentationType::Popup);

        listener.on_error(SdkError::new("timeout"));
        listener.on_content_received(vec![content.clone()]);
        assert_eq!(listener.on_will_show_content(&content), DisplayDecision::Allow);
        listener.on_did_show_content(&content);
        listener.on_content_dismissed();
        listener.on_content_changed();

        assert_eq!(rx.try_recv().unwrap(), SdkCallback::Error(SdkError::new("timeout")));
        assert_eq!(rx.try_recv().unwrap(), SdkCallback::ContentReceived(vec![content.clone()]));
        assert_eq!(
            rx.try_recv().unwrap(),
            SdkCallback::WillShowContent {
                content: content.clone(),
                decision: DisplayDecision::Allow,
            }
        );
        assert_eq!(rx.try_recv().unwrap(), SdkCallback::DidShowContent(content));
        assert_eq!(rx.try_recv().unwrap(), SdkCallback::ContentDismissed);
        assert_eq!(rx.try_recv().unwrap(), SdkCallback::ContentChanged);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_policy_decides_will_show() {
        let (tx, mut rx) = mpsc::unbounded_channel::<SdkCallback>();
        let policy = Arc::new(SuppressTriggerPoints::new(["credit-card-offer"]));
        let listener = BridgeListener::forwarding_to(tx, policy);
        let content = Content::new("c-9", "credit-card-offer", PresentationType::Popup);

        assert_eq!(listener.on_will_show_content(&content), DisplayDecision::Cancel);
        assert!(matches!(
            rx.try_recv().unwrap(),
            SdkCallback::WillShowContent { decision: DisplayDecision::Cancel, .. }
        ));
    }

    #[test]
    fn test_dropped_receiver_is_tolerated() {
        let (tx, rx) = mpsc::unbounded_channel::<SdkCallback>();
        drop(rx);
        let listener = BridgeListener::allow_all(tx);
        listener.on_content_changed();
    }
}
