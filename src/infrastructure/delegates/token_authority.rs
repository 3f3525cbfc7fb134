//! Token authority client
//!
//! Requests bearer session tokens from the external token service. The
//! service is opaque: this client only knows the issue endpoint and the
//! `{"token": ...}` response shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{DelegateError, TokenAuthority, TokenClaims};
use crate::config::TokenServiceConfig;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

pub struct HttpTokenAuthority {
    client: Client,
    config: TokenServiceConfig,
}

impl HttpTokenAuthority {
    pub fn new(config: TokenServiceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn issue_url(&self) -> String {
        format!(
            "http://{}:{}/api/v0/auth/generateToken",
            self.config.host, self.config.port
        )
    }
}

#[async_trait]
impl TokenAuthority for HttpTokenAuthority {
    async fn issue(&self, claims: &TokenClaims) -> Result<String, DelegateError> {
        if !self.config.enabled {
            return Err(DelegateError::Disabled);
        }

        let response = self
            .client
            .post(self.issue_url())
            .json(&serde_json::json!({ "data": claims }))
            .send()
            .await
            .map_err(|e| DelegateError::Transport(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| DelegateError::Transport(e.to_string()))?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| DelegateError::BadResponse(e.to_string()))?;

        Ok(body.token)
    }
}
