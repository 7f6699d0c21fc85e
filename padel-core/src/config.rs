//! Wizard configuration loaded from JSON.
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid wizard config: {0}")]
    Invalid(String),
}

/// Delays that sequence the exit and entry animations of a step change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTimings {
    pub exit_ms: u32,
    pub settle_ms: u32,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            exit_ms: 300,
            settle_ms: 50,
        }
    }
}

impl TransitionTimings {
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            exit_ms: 0,
            settle_ms: 0,
        }
    }

    #[must_use]
    pub fn exit(self) -> Duration {
        Duration::from_millis(u64::from(self.exit_ms))
    }

    #[must_use]
    pub fn settle(self) -> Duration {
        Duration::from_millis(u64::from(self.settle_ms))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub anon_key: String,
}

/// Remote procedure and post-submission route for one wizard flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub procedure: String,
    pub redirect: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub timings: TransitionTimings,
    /// Prefix for every draft key in local storage.
    pub storage_namespace: String,
    pub backend: BackendConfig,
    pub onboarding: FlowConfig,
    pub tournament: FlowConfig,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl WizardConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            timings: TransitionTimings::default(),
            storage_namespace: String::from("padel.draft"),
            backend: BackendConfig::default(),
            onboarding: FlowConfig {
                procedure: String::from("complete_user_onboarding"),
                redirect: String::from("/home"),
            },
            tournament: FlowConfig {
                procedure: String::from("create_tournament"),
                redirect: String::from("/tournaments"),
            },
        }
    }

    /// Parse and validate a config document. Missing sections fall back to
    /// [`WizardConfig::default_config`].
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or when a required name is blank.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first blank setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("storage_namespace", &self.storage_namespace),
            ("onboarding.procedure", &self.onboarding.procedure),
            ("onboarding.redirect", &self.onboarding.redirect),
            ("tournament.procedure", &self.tournament.procedure),
            ("tournament.redirect", &self.tournament.redirect),
        ];
        match checks.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ConfigError::Invalid(format!("{name} must not be blank"))),
            None => Ok(()),
        }
    }

    /// Apply build-time overrides for the backend endpoint.
    #[must_use]
    pub fn with_backend_overrides(
        mut self,
        base_url: Option<&str>,
        anon_key: Option<&str>,
    ) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.backend.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = anon_key.filter(|k| !k.trim().is_empty()) {
            self.backend.anon_key = key.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WizardConfig::from_json(r#"{"timings":{"exit_ms":120}}"#).unwrap();
        assert_eq!(config.timings.exit_ms, 120);
        assert_eq!(config.timings.settle_ms, 50);
        assert_eq!(config.onboarding.procedure, "complete_user_onboarding");
    }

    #[test]
    fn blank_procedure_is_rejected() {
        let err = WizardConfig::from_json(
            r#"{"tournament":{"procedure":" ","redirect":"/tournaments"}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("tournament.procedure"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            WizardConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn overrides_trim_trailing_slash_and_skip_blanks() {
        let config = WizardConfig::default_config()
            .with_backend_overrides(Some("https://api.example.test/"), Some(""));
        assert_eq!(config.backend.base_url, "https://api.example.test");
        assert!(config.backend.anon_key.is_empty());
    }
}
