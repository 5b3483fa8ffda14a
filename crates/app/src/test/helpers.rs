//! Test doubles shared across service tests.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{
    customers::CustomerUuid,
    notifications::{NotificationError, Notifier},
};

/// One captured notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SentNotification {
    pub customer: CustomerUuid,
    pub subject: String,
    pub body: String,
}

/// Notifier that records every message for later assertions.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentNotification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        customer: CustomerUuid,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentNotification {
                customer,
                subject: subject.to_string(),
                body: body.to_string(),
            });

        Ok(())
    }
}
