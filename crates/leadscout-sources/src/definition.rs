//! Declarative source definitions.
//!
//! A definition names a source, says whether it is enabled, selects the
//! adapter type that serves it and carries a free-form settings table that
//! only the adapter interprets.

use crate::error::{Result, SourceError};
use leadscout_core::SourceId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One entry of a source list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Registry identifier
    pub id: SourceId,
    /// Human-readable name, also used to key raw captures
    pub name: String,
    /// Disabled sources are never constructed
    #[serde(default)]
    pub enabled: bool,
    /// Adapter type selector, e.g. `clay` or `internal-db`
    pub adapter: String,
    /// Adapter-specific settings
    #[serde(default)]
    pub settings: toml::Table,
}

impl SourceDefinition {
    /// Create an enabled definition with empty settings.
    #[must_use]
    pub fn new(id: SourceId, name: impl Into<String>, adapter: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            enabled: true,
            adapter: adapter.into(),
            settings: toml::Table::new(),
        }
    }

    /// Add a setting.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Mark the definition enabled or disabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Validate the definition for completeness.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(self.config_error("source name cannot be empty"));
        }

        if self.adapter.trim().is_empty() {
            return Err(self.config_error("adapter type cannot be empty"));
        }

        Ok(())
    }

    /// Read a string setting, resolving `${VAR}` placeholders from the
    /// environment.
    ///
    /// Returns `None` for a missing or blank value and for a placeholder
    /// whose variable is unset.
    #[must_use]
    pub fn setting_str(&self, key: &str) -> Option<String> {
        let raw = self.settings.get(key)?.as_str()?;

        let value = match placeholder_var(raw) {
            Some(var) => std::env::var(var).ok()?,
            None => raw.to_string(),
        };

        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Read a non-negative integer setting.
    ///
    /// # Errors
    /// Returns a configuration error if the value is present but is not a
    /// non-negative integer.
    pub fn setting_u64(&self, key: &str) -> Result<Option<u64>> {
        match self.settings.get(key) {
            None => Ok(None),
            Some(toml::Value::Integer(n)) => u64::try_from(*n)
                .map(Some)
                .map_err(|_| self.config_error(&format!("{key} must be non-negative, got {n}"))),
            Some(other) => Err(self.config_error(&format!(
                "{key} must be an integer, got {}",
                other.type_str()
            ))),
        }
    }

    /// Build a configuration error scoped to this source.
    #[must_use]
    pub fn config_error(&self, reason: &str) -> SourceError {
        SourceError::Configuration {
            source_id: self.id.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Variable name of a whole-value `${VAR}` placeholder.
fn placeholder_var(value: &str) -> Option<&str> {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"^\$\{([A-Za-z_][A-Za-z0-9_]*)\}$").expect("valid regex"));

    regex
        .captures(value.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clay_definition() -> SourceDefinition {
        SourceDefinition::new(SourceId::new("clay").expect("valid source ID"), "Clay", "clay")
    }

    #[test]
    fn test_definition_from_toml() {
        let toml_str = r#"
id = "clay"
name = "Clay"
enabled = true
adapter = "clay"

[settings]
base_url = "https://api.clay.com/v1"
timeout_secs = 30
"#;
        let def: SourceDefinition = toml::from_str(toml_str).expect("parse definition");
        assert_eq!(def.id.as_str(), "clay");
        assert!(def.enabled);
        assert_eq!(
            def.setting_str("base_url").as_deref(),
            Some("https://api.clay.com/v1")
        );
        assert_eq!(def.setting_u64("timeout_secs").expect("read timeout"), Some(30));
    }

    #[test]
    fn test_enabled_defaults_to_false() {
        let toml_str = r#"
id = "clay"
name = "Clay"
adapter = "clay"
"#;
        let def: SourceDefinition = toml::from_str(toml_str).expect("parse definition");
        assert!(!def.enabled);
        assert!(def.settings.is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut def = clay_definition();
        def.name = "  ".to_string();
        assert!(matches!(
            def.validate(),
            Err(SourceError::Configuration { .. })
        ));

        let mut def = clay_definition();
        def.adapter = String::new();
        assert!(def.validate().is_err());

        assert!(clay_definition().validate().is_ok());
    }

    #[test]
    fn test_setting_str_resolves_placeholder() {
        std::env::set_var("LEADSCOUT_TEST_DEF_KEY", "secret-123");
        let def = clay_definition().with_setting("api_key", "${LEADSCOUT_TEST_DEF_KEY}");
        assert_eq!(def.setting_str("api_key").as_deref(), Some("secret-123"));
        std::env::remove_var("LEADSCOUT_TEST_DEF_KEY");
    }

    #[test]
    fn test_setting_str_unresolved_placeholder_is_absent() {
        let def = clay_definition().with_setting("api_key", "${LEADSCOUT_TEST_UNSET_VAR}");
        assert_eq!(def.setting_str("api_key"), None);

        let blank = clay_definition().with_setting("api_key", "   ");
        assert_eq!(blank.setting_str("api_key"), None);
    }

    #[test]
    fn test_setting_u64_rejects_wrong_type() {
        let def = clay_definition().with_setting("timeout_secs", "thirty");
        assert!(def.setting_u64("timeout_secs").is_err());

        let negative = clay_definition().with_setting("timeout_secs", -5);
        assert!(negative.setting_u64("timeout_secs").is_err());

        assert_eq!(
            clay_definition().setting_u64("timeout_secs").expect("missing is ok"),
            None
        );
    }
}
