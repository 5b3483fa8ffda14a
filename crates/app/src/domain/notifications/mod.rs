//! Notifications
//!
//! Status changes notify the customer through a [`Notifier`]. Delivery is
//! strictly best-effort: the order write has already committed by the time
//! a notification goes out, and a failed send is logged and dropped.

pub mod messages;

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

use crate::domain::customers::CustomerUuid;

/// Sends happen inline after the order write commits; this caps how long
/// a stalled endpoint can delay the response.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("failed to build the notification client")]
    Client(#[source] reqwest::Error),

    #[error("failed to deliver notification")]
    Transport(#[from] reqwest::Error),

    #[error("notification endpoint returned {status}")]
    UnexpectedResponse { status: u16 },
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message to one customer.
    async fn notify(
        &self,
        customer: CustomerUuid,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError>;
}

/// Notifier that only writes to the log. The default when no webhook is
/// configured.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(
        &self,
        customer: CustomerUuid,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        tracing::info!(%customer, subject, body, "customer notification");

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    customer: CustomerUuid,
    subject: &'a str,
    body: &'a str,
}

/// Notifier that POSTs each message as JSON to a configured endpoint,
/// typically the host platform's messaging gateway.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, NotificationError> {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotificationError::Client)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(
        &self,
        customer: CustomerUuid,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&WebhookPayload {
                customer,
                subject,
                body,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotificationError::UnexpectedResponse {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}
