use std::path::Path;

use anyhow::Context;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion or parsing
    /// fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).context("config variable expansion failed")?;

        let config: Self = toml::from_str(&expanded).context("failed to parse config")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_health()?;
        self.validate_messages()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_health(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        Ok(())
    }

    fn validate_messages(&self) -> anyhow::Result<()> {
        for (key, template) in &self.messages.entries {
            if key.is_empty() {
                anyhow::bail!("messages.entries contains an empty key");
            }
            if template.is_empty() {
                anyhow::bail!("messages.entries.\"{key}\" must not be empty");
            }
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        if self.telemetry.log_filter.trim().is_empty() {
            anyhow::bail!("telemetry.log_filter must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::{Config, LogFormat};

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();

        assert!(!config.errors.enable_stacktrace);
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert_eq!(config.server.listen_address().to_string(), "0.0.0.0:3000");
        assert_eq!(config.telemetry.log_filter, "info");
        assert_eq!(config.telemetry.format, LogFormat::Text);
        assert!(config.messages.catalog.is_none());
    }

    #[test]
    fn full_config() {
        let toml = r#"
            [server]
            listen_address = "127.0.0.1:8080"

            [server.health]
            path = "/status"

            [errors]
            enable_stacktrace = true

            [messages]
            catalog = "messages/en.toml"

            [messages.entries]
            "access.denied.exception" = "You may not do that"
            "order.closed" = "Order {0} is closed"

            [telemetry]
            log_filter = "warn,verdict_resolver=debug"
            format = "json"
        "#;

        let config = Config::from_toml_str(toml).unwrap();

        assert!(config.errors.enable_stacktrace);
        assert_eq!(config.server.listen_address().port(), 8080);
        assert_eq!(config.server.health.path, "/status");
        assert_eq!(
            config.messages.catalog.as_deref(),
            Some(std::path::Path::new("messages/en.toml"))
        );
        assert_eq!(
            config.messages.entries.keys().collect::<Vec<_>>(),
            ["access.denied.exception", "order.closed"]
        );
        assert_eq!(config.telemetry.format, LogFormat::Json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = Config::from_toml_str("[errors]\nenable_stacktraces = true\n").unwrap_err();
        assert!(format!("{error:#}").contains("enable_stacktraces"));
    }

    #[test]
    fn stacktrace_flag_from_environment() {
        temp_env::with_var("VERDICT_STACKTRACE", Some("true"), || {
            let config = Config::from_toml_str(
                "[errors]\nenable_stacktrace = {{ env.VERDICT_STACKTRACE | default(\"false\") }}\n",
            )
            .unwrap();
            assert!(config.errors.enable_stacktrace);
        });
    }

    #[test]
    fn relative_health_path_fails_validation() {
        let error = Config::from_toml_str("[server.health]\npath = \"health\"\n").unwrap_err();
        assert!(error.to_string().contains("server.health.path"));
    }

    #[test]
    fn empty_message_template_fails_validation() {
        let error = Config::from_toml_str("[messages.entries]\n\"order.closed\" = \"\"\n").unwrap_err();
        assert!(error.to_string().contains("order.closed"));
    }

    #[test]
    fn blank_log_filter_fails_validation() {
        let error = Config::from_toml_str("[telemetry]\nlog_filter = \" \"\n").unwrap_err();
        assert!(error.to_string().contains("log_filter"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[errors]\nenable_stacktrace = true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.errors.enable_stacktrace);
    }

    #[test]
    fn load_reports_missing_file() {
        let error = Config::load(std::path::Path::new("/nonexistent/verdict.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/verdict.toml"));
    }
}
