//! Build-time configuration for the web front-end.
//!
//! `static/wizard.json` is embedded at compile time. `PADEL_API_URL` and
//! `PADEL_ANON_KEY` override the backend endpoint, and `PUBLIC_URL` sets the
//! router base when the app is hosted under a subdirectory.
use padel_core::WizardConfig;

const EMBEDDED: &str = include_str!("../static/wizard.json");

/// Embedded config with build-time overrides applied. Falls back to the
/// built-in defaults if the embedded document is invalid.
#[must_use]
pub fn load_config() -> WizardConfig {
    config_from(EMBEDDED)
        .with_backend_overrides(option_env!("PADEL_API_URL"), option_env!("PADEL_ANON_KEY"))
}

fn config_from(json: &str) -> WizardConfig {
    WizardConfig::from_json(json).unwrap_or_else(|err| {
        log::error!("falling back to default wizard config: {err}");
        WizardConfig::default_config()
    })
}

/// Base path for the router (e.g. `/app` when hosted under a subdirectory).
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = WizardConfig::from_json(EMBEDDED).expect("embedded config");
        assert_eq!(config.storage_namespace, "padel.draft");
        assert_eq!(config.tournament.redirect, "/tournaments");
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        assert_eq!(config_from("[]"), WizardConfig::default_config());
    }

    #[test]
    fn router_base_is_trimmed() {
        assert_eq!(router_base_with_base("/app/"), Some(String::from("/app")));
        assert_eq!(router_base_with_base("  "), None);
    }
}
