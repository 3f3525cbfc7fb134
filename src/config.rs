//! Configuration module
//!
//! All settings come from the environment with sensible defaults, so the
//! service boots unconfigured in development.

use crate::infrastructure::crypto::password::DEFAULT_WORK_FACTOR;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// External token service endpoint
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// The authority is only reached when this is on; issuance fails
    /// with an absent token otherwise.
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "localhost".to_string(),
            port: 8081,
        }
    }
}

/// Notification service endpoint and dispatch flag
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Recovery emails are only dispatched when this is on.
    pub send_email: bool,
    pub service_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            send_email: false,
            service_url: "http://localhost:8082".to_string(),
        }
    }
}

/// Security settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// bcrypt work factor for credential digests
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_WORK_FACTOR,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub token_service: TokenServiceConfig,
    pub notifications: NotificationConfig,
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: ServerConfig {
                host: env_or("HOST", defaults.server.host),
                port: env_parsed("PORT", defaults.server.port),
            },
            security: SecurityConfig {
                bcrypt_cost: env_parsed("BCRYPT_COST", defaults.security.bcrypt_cost),
            },
            token_service: TokenServiceConfig {
                enabled: env_parsed("TOKEN_SERVICE_ENABLED", defaults.token_service.enabled),
                host: env_or("TOKEN_SERVICE_URL", defaults.token_service.host),
                port: env_parsed("TOKEN_SERVICE_PORT", defaults.token_service.port),
            },
            notifications: NotificationConfig {
                send_email: env_parsed("SEND_EMAIL", defaults.notifications.send_email),
                service_url: env_or(
                    "NOTIFICATION_SERVICE_URL",
                    defaults.notifications.service_url,
                ),
            },
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.security.bcrypt_cost, 10);
        assert!(!cfg.notifications.send_email);
    }
}
