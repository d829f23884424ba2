//! Message catalog for Verdict
//!
//! Maps message keys to templates with positional `{0}`, `{1}`, …
//! placeholders. The catalog is the default [`MessageLookup`] handed to the
//! resolver; hosts with their own localization can inject a different one.

#![allow(clippy::must_use_candidate)]

mod render;

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use verdict_config::MessagesConfig;
use verdict_core::{ErrorCode, MessageLookup};

use render::render;

/// English text for every baseline error code
const BUILTIN: [(ErrorCode, &str); 12] = [
    (ErrorCode::UNEXPECTED, "An unexpected error occurred"),
    (ErrorCode::ENTITY_NOT_FOUND, "The requested entity was not found"),
    (
        ErrorCode::STALE_OBJECT,
        "The data was changed by someone else. Reload it and try again",
    ),
    (ErrorCode::LOCK_OBJECT, "The data is locked by another operation"),
    (ErrorCode::ACCESS_DENIED, "Access denied"),
    (ErrorCode::INVALID_REQUEST, "The request is invalid"),
    (ErrorCode::SECURITY, "A security error occurred"),
    (ErrorCode::SERVICE_NOT_FOUND, "The requested module is not available"),
    (ErrorCode::VALIDATION, "Validation failed"),
    (ErrorCode::RESOURCE_NOT_FOUND, "The requested resource was not found"),
    (ErrorCode::FILE_NOT_FOUND, "The requested file was not found"),
    (ErrorCode::IO, "An input/output error occurred"),
];

/// Immutable set of message templates
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Catalog without any templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with English text for the baseline error codes
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|(code, text)| (code.code_message(), *text))
            .collect()
    }

    /// Parse templates from TOML
    ///
    /// Nested tables are flattened with `.`, so `[order] closed = "…"` and
    /// `"order.closed" = "…"` define the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not TOML or a value is not a string
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let table: toml::Table = toml::from_str(raw).context("failed to parse message catalog")?;

        let mut catalog = Self::new();
        catalog.flatten("", table)?;
        Ok(catalog)
    }

    /// Read templates from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read message catalog {}", path.display()))?;

        Self::from_toml_str(&raw).with_context(|| format!("invalid message catalog {}", path.display()))
    }

    /// Layer the configured sources over the built-in catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog file cannot be loaded
    pub fn from_config(config: &MessagesConfig) -> anyhow::Result<Self> {
        let mut catalog = Self::builtin();

        if let Some(ref path) = config.catalog {
            catalog = catalog.merge(Self::load(path)?);
        }

        let inline: Self = config.entries.iter().collect();
        let catalog = catalog.merge(inline);

        tracing::debug!(templates = catalog.len(), "message catalog loaded");

        Ok(catalog)
    }

    /// Combine two catalogs; templates from `other` win
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.templates.extend(other.templates);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Raw template for a key
    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Render the template for `key`, if the catalog has one
    pub fn format(&self, key: &str, args: &[&str]) -> Option<String> {
        self.template(key).map(|template| render(template, args))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn flatten(&mut self, prefix: &str, table: toml::Table) -> anyhow::Result<()> {
        for (name, value) in table {
            let key = if prefix.is_empty() { name } else { format!("{prefix}.{name}") };

            match value {
                toml::Value::String(template) => {
                    self.templates.insert(key, template);
                }
                toml::Value::Table(nested) => self.flatten(&key, nested)?,
                other => anyhow::bail!("message `{key}` must be a string, found {}", other.type_str()),
            }
        }

        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for MessageCatalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        }
    }
}

impl MessageLookup for MessageCatalog {
    /// Unknown keys resolve to the key itself
    fn get_message(&self, key: &str, args: &[&str]) -> String {
        self.format(key, args).unwrap_or_else(|| {
            tracing::debug!(key, "no message template for key");
            key.to_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_covers_every_baseline_code() {
        let catalog = MessageCatalog::builtin();

        for code in ErrorCode::BASELINE {
            assert!(
                catalog.template(code.code_message()).is_some(),
                "missing template for {code}"
            );
        }
        assert_eq!(catalog.len(), ErrorCode::BASELINE.len());
    }

    #[test]
    fn lookup_renders_arguments() {
        let catalog: MessageCatalog = [("order.closed", "Order {0} was closed by {1}")].into_iter().collect();

        assert_eq!(
            catalog.get_message("order.closed", &["#42", "support"]),
            "Order #42 was closed by support"
        );
    }

    #[test]
    fn unknown_key_resolves_to_itself() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.get_message("no.such.key", &[""]), "no.such.key");
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let catalog = MessageCatalog::from_toml_str(
            r#"
            "payment.declined" = "Card declined"

            [order]
            closed = "Order closed"

            [order.item]
            missing = "Item {0} is gone"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.template("payment.declined"), Some("Card declined"));
        assert_eq!(catalog.template("order.closed"), Some("Order closed"));
        assert_eq!(catalog.format("order.item.missing", &["sku-1"]).as_deref(), Some("Item sku-1 is gone"));
    }

    #[test]
    fn non_string_values_are_rejected() {
        let error = MessageCatalog::from_toml_str("[order]\nretries = 3\n").unwrap_err();
        assert!(error.to_string().contains("order.retries"));
    }

    #[test]
    fn later_layers_win() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\"access.denied.exception\" = \"Forbidden\"\n\"order.closed\" = \"Closed\"").unwrap();

        let mut config = MessagesConfig {
            catalog: Some(file.path().to_path_buf()),
            ..MessagesConfig::default()
        };
        config.entries.insert("order.closed".to_owned(), "Order closed".to_owned());

        let catalog = MessageCatalog::from_config(&config).unwrap();

        assert_eq!(catalog.template("access.denied.exception"), Some("Forbidden"));
        assert_eq!(catalog.template("order.closed"), Some("Order closed"));
        assert_eq!(catalog.template("io.exception"), Some("An input/output error occurred"));
    }

    #[test]
    fn missing_catalog_file_fails() {
        let config = MessagesConfig {
            catalog: Some("/nonexistent/messages.toml".into()),
            ..MessagesConfig::default()
        };

        let error = MessageCatalog::from_config(&config).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/messages.toml"));
    }
}
