//! Post-commit notifications.
//!
//! Writes announce themselves through a [`Notifier`] after their transaction
//! has committed. Delivery runs on its own task: a slow or failing sink never
//! delays the response, and never undoes the write.
//!
//! ```text
//! handler ── commit ──► respond 200
//!               │
//!               └── tokio::spawn ──► Notifier::notify(event)
//!                                      └── Err → warn!, dropped
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

/// What happened to which RFQ, and on whose behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RfqEvent {
    Created { rfq_id: i64, principal: String },
    Updated { rfq_id: i64, principal: String },
}

impl RfqEvent {
    pub fn rfq_id(&self) -> i64 {
        match self {
            RfqEvent::Created { rfq_id, .. } | RfqEvent::Updated { rfq_id, .. } => *rfq_id,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Notification failed: {0}")]
pub struct NotifyError(pub String);

/// A sink for RFQ events (mail relay, webhook, message bus...).
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn notify(&self, event: &RfqEvent) -> Result<(), NotifyError>;
}

/// Default sink: records the event in the log.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, event: &RfqEvent) -> Result<(), NotifyError> {
        match event {
            RfqEvent::Created { rfq_id, principal } => {
                info!(rfq_id, principal = %principal, "RFQ created");
            }
            RfqEvent::Updated { rfq_id, principal } => {
                info!(rfq_id, principal = %principal, "RFQ updated");
            }
        }
        Ok(())
    }
}

/// Fire-and-forget delivery of `event`.
pub fn dispatch(notifier: Arc<dyn Notifier>, event: RfqEvent) {
    tokio::spawn(async move {
        if let Err(e) = notifier.notify(&event).await {
            warn!(rfq_id = event.rfq_id(), error = %e, "Dropping RFQ notification");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    struct Failing;

    #[async_trait]
    impl Notifier for Failing {
        async fn notify(&self, _event: &RfqEvent) -> Result<(), NotifyError> {
            Err(NotifyError("relay down".to_string()))
        }
    }

    struct Channel(mpsc::UnboundedSender<RfqEvent>);

    #[async_trait]
    impl Notifier for Channel {
        async fn notify(&self, event: &RfqEvent) -> Result<(), NotifyError> {
            self.0
                .send(event.clone())
                .map_err(|e| NotifyError(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_dispatch_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let event = RfqEvent::Updated {
            rfq_id: 4,
            principal: "alice".to_string(),
        };

        dispatch(Arc::new(Channel(tx)), event.clone());

        assert_eq!(rx.recv().await, Some(event));
    }

    #[tokio::test]
    async fn test_failing_sink_is_contained() {
        dispatch(
            Arc::new(Failing),
            RfqEvent::Created {
                rfq_id: 1,
                principal: "bob".to_string(),
            },
        );
        tokio::task::yield_now().await;
    }

    #[test]
    fn test_event_json_shape() {
        let event = RfqEvent::Created {
            rfq_id: 9,
            principal: "carol".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "created");
        assert_eq!(json["rfqId"], 9);
    }
}
