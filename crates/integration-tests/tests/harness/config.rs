//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use verdict_config::{Config, HealthConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                },
                ..Config::default()
            },
        }
    }

    /// Disclose stack frames where the error kind allows it
    pub fn with_stacktrace(mut self) -> Self {
        self.config.errors.enable_stacktrace = true;
        self
    }

    /// Add an inline message template
    pub fn with_message(mut self, key: &str, template: &str) -> Self {
        self.config.messages.entries.insert(key.to_owned(), template.to_owned());
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
