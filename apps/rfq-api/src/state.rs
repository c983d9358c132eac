//! Shared application state.

use std::future::Future;
use std::sync::Arc;

use rfq_db::Database;
use tracing::warn;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::notify::{Notifier, TracingNotifier};

/// Handed to every handler. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// State with the logging notifier.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Replaces the notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Runs `work` under the configured request deadline.
    ///
    /// On expiry the future is dropped: its pooled connection goes back to the
    /// pool and an open transaction rolls back.
    pub async fn with_deadline<T, F>(&self, operation: &'static str, work: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        match tokio::time::timeout(self.config.request_timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.config.request_timeout.as_millis() as u64,
                    "Request deadline exceeded"
                );
                Err(ApiError::Timeout(operation))
            }
        }
    }
}
