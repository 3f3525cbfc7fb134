//! Notification dispatcher client
//!
//! Hands email messages to the notification service. Delivery itself is
//! the collaborator's problem; `Ok` only means the handoff succeeded.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{DelegateError, NotificationDispatcher};

#[derive(Debug, Serialize)]
struct EmailMessage<'a> {
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

pub struct HttpNotificationDispatcher {
    client: Client,
    service_url: String,
}

impl HttpNotificationDispatcher {
    pub fn new(service_url: String) -> Self {
        Self {
            client: Client::new(),
            service_url,
        }
    }
}

#[async_trait]
impl NotificationDispatcher for HttpNotificationDispatcher {
    async fn send_email(
        &self,
        address: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), DelegateError> {
        let message = EmailMessage {
            email: address,
            subject,
            message: body,
        };

        self.client
            .post(format!("{}/api/v0/notifications/email", self.service_url))
            .json(&message)
            .send()
            .await
            .map_err(|e| DelegateError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| DelegateError::Transport(e.to_string()))?;

        Ok(())
    }
}
