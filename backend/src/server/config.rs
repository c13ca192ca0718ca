//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI flags, `SKILLSETU_*` environment variables and config
//! files over the defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use backend::domain::{SessionContext, UserId, UserValidationError};
use backend::outbound::gemini::GeminiSourceConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// First user in the bundled seed.
const DEFAULT_CURRENT_USER_ID: &str = "6f1c2a4e-8d3b-4c5a-9e7f-1a2b3c4d5e01";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_SUGGESTION_TIMEOUT_SECS: u64 = 30;

fn default_seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("directory.json")
}

/// Errors raised when a configured value cannot be interpreted.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid current user id {value:?}: {source}")]
    CurrentUser {
        value: String,
        #[source]
        source: UserValidationError,
    },
    #[error("invalid Gemini base URL {value:?}: {source}")]
    GeminiBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Settings controlling the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SKILLSETU")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// JSON seed loaded into the in-memory directory.
    pub seed_path: Option<PathBuf>,
    /// User acting for every request.
    pub current_user_id: Option<String>,
    /// Gemini API key. Suggestions are unavailable when unset.
    pub gemini_api_key: Option<String>,
    /// Gemini model name.
    pub gemini_model: Option<String>,
    /// Gemini API root.
    pub gemini_base_url: Option<String>,
    /// Whole-request timeout for suggestion calls, in seconds.
    pub suggestion_timeout_secs: Option<u64>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn seed_path(&self) -> PathBuf {
        self.seed_path.clone().unwrap_or_else(default_seed_path)
    }

    pub fn session(&self) -> Result<SessionContext, SettingsError> {
        let value = self
            .current_user_id
            .as_deref()
            .unwrap_or(DEFAULT_CURRENT_USER_ID);
        UserId::new(value)
            .map(SessionContext::new)
            .map_err(|source| SettingsError::CurrentUser {
                value: value.to_owned(),
                source,
            })
    }

    pub fn suggestion_timeout(&self) -> Duration {
        Duration::from_secs(
            self.suggestion_timeout_secs
                .unwrap_or(DEFAULT_SUGGESTION_TIMEOUT_SECS),
        )
    }

    /// Gemini connection settings, or `None` when no API key is configured.
    pub fn gemini(&self) -> Result<Option<GeminiSourceConfig>, SettingsError> {
        let Some(api_key) = self
            .gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        else {
            return Ok(None);
        };
        let raw_url = self
            .gemini_base_url
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_BASE_URL);
        let base_url = Url::parse(raw_url).map_err(|source| SettingsError::GeminiBaseUrl {
            value: raw_url.to_owned(),
            source,
        })?;
        Ok(Some(GeminiSourceConfig {
            base_url,
            model: self
                .gemini_model
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            api_key: Zeroizing::new(api_key.to_owned()),
            timeout: self.suggestion_timeout(),
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "SKILLSETU_BIND_ADDR",
        "SKILLSETU_SEED_PATH",
        "SKILLSETU_CURRENT_USER_ID",
        "SKILLSETU_GEMINI_API_KEY",
        "SKILLSETU_GEMINI_MODEL",
        "SKILLSETU_GEMINI_BASE_URL",
        "SKILLSETU_SUGGESTION_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    fn cleared_env() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    fn with_overrides(
        overrides: &[(&'static str, &str)],
    ) -> Vec<(&'static str, Option<String>)> {
        let mut vars = cleared_env();
        for (name, value) in overrides {
            if let Some(slot) = vars.iter_mut().find(|(var, _)| var == name) {
                slot.1 = Some((*value).to_owned());
            }
        }
        vars
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env());

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid default")
        );
        assert_eq!(settings.seed_path(), default_seed_path());
        assert_eq!(
            settings.session().expect("default user").user_id().to_string(),
            DEFAULT_CURRENT_USER_ID
        );
        assert_eq!(settings.suggestion_timeout(), Duration::from_secs(30));
        assert!(settings.gemini().expect("no key is valid").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with_overrides(&[
            ("SKILLSETU_BIND_ADDR", "127.0.0.1:9000"),
            ("SKILLSETU_SEED_PATH", "/tmp/seed.json"),
            ("SKILLSETU_GEMINI_API_KEY", "secret-key"),
            ("SKILLSETU_GEMINI_MODEL", "gemini-1.5-pro"),
            ("SKILLSETU_GEMINI_BASE_URL", "http://localhost:8089/"),
            ("SKILLSETU_SUGGESTION_TIMEOUT_SECS", "5"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("valid address")
        );
        assert_eq!(settings.seed_path(), PathBuf::from("/tmp/seed.json"));
        let gemini = settings.gemini().expect("valid").expect("key configured");
        assert_eq!(gemini.model, "gemini-1.5-pro");
        assert_eq!(gemini.base_url.as_str(), "http://localhost:8089/");
        assert_eq!(gemini.api_key.as_str(), "secret-key");
        assert_eq!(gemini.timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case("SKILLSETU_BIND_ADDR", "not an address")]
    #[case("SKILLSETU_CURRENT_USER_ID", "alice")]
    fn malformed_values_are_reported(#[case] var: &'static str, #[case] value: &str) {
        let _guard = lock_env(with_overrides(&[(var, value)]));

        let settings = load_from_empty_args();

        let failed = settings.bind_addr().is_err() || settings.session().is_err();
        assert!(failed, "{var}={value} should be rejected");
    }

    #[rstest]
    fn blank_api_key_disables_gemini() {
        let _guard = lock_env(with_overrides(&[("SKILLSETU_GEMINI_API_KEY", "   ")]));
        assert!(load_from_empty_args().gemini().expect("valid").is_none());
    }
}
