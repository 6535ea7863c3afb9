//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and the gate configuration
//! assembled from them.

use crate::common::error::GateError;
use std::path::PathBuf;
use std::time::Duration;

/// Default idle lifetime of a session, in seconds.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1440;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use dashgate::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("DASHGATE_PORT", "GATE_PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Falls back to `default` when neither variable is set or parsing fails.
/// A value that fails to parse is logged at `warn`.
pub fn get_env_with_fallback_parse<T: std::str::FromStr + std::fmt::Display>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    let Some(raw) = get_env_with_fallback(new_name, old_name) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(
                "Invalid value {:?} for '{}', using default {}",
                raw,
                new_name,
                default
            );
            default
        }
    }
}

/// Get a boolean flag (`true/1/yes/on`, case-insensitive) with fallback
pub fn get_env_flag(new_name: &str, old_name: &str) -> bool {
    get_env_with_fallback(new_name, old_name)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

fn require_env(new_name: &str, old_name: &str) -> Result<String, GateError> {
    match get_env_with_fallback(new_name, old_name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(GateError::Config(format!("{new_name} must be set"))),
    }
}

/// Gate configuration
///
/// The credential pair and the dashboard URL are process-wide and never
/// change after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Email accepted by the gate (compared verbatim).
    pub email: String,
    /// Password accepted by the gate (compared verbatim).
    pub password: String,
    /// Opaque embed URL shown in the iframe.
    pub dashboard_url: String,
    /// Append-only audit log, kept outside any served directory.
    pub audit_log_path: PathBuf,
    /// Path the gate is mounted on; also the redirect target.
    pub base_path: String,
    /// Title of both pages.
    pub page_title: String,
    /// Idle lifetime of a session.
    pub session_ttl: Duration,
    /// Take the client IP from `X-Forwarded-For` / `Forwarded` headers.
    pub trust_proxy: bool,
}

impl GateConfig {
    /// Build a configuration with defaults for everything except the
    /// credential pair and the dashboard URL.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        dashboard_url: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            dashboard_url: dashboard_url.into(),
            audit_log_path: default_audit_log_path(),
            base_path: "/".to_string(),
            page_title: "Dashboard Access".to_string(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            trust_proxy: false,
        }
    }

    /// Load the configuration from environment variables.
    pub fn from_env() -> Result<Self, GateError> {
        let email = require_env("DASHGATE_EMAIL", "GATE_EMAIL")?;
        let password = require_env("DASHGATE_PASSWORD", "GATE_PASSWORD")?;
        let dashboard_url = require_env("DASHGATE_DASHBOARD_URL", "GATE_DASHBOARD_URL")?;

        let mut config = Self::new(email.trim(), password, dashboard_url);

        if let Some(path) = get_env_with_fallback("DASHGATE_AUDIT_LOG", "GATE_AUDIT_LOG") {
            config.audit_log_path = PathBuf::from(path);
        }
        config.base_path = normalize_base_path(&get_env_with_fallback_or(
            "DASHGATE_BASE_PATH",
            "GATE_BASE_PATH",
            "/",
        ));
        validate_base_path(&config.base_path)?;
        config.page_title =
            get_env_with_fallback_or("DASHGATE_PAGE_TITLE", "GATE_PAGE_TITLE", "Dashboard Access");
        config.session_ttl = Duration::from_secs(get_env_with_fallback_parse(
            "DASHGATE_SESSION_TTL_SECS",
            "GATE_SESSION_TTL_SECS",
            DEFAULT_SESSION_TTL_SECS,
        ));
        config.trust_proxy = get_env_flag("DASHGATE_TRUST_PROXY", "GATE_TRUST_PROXY");

        Ok(config)
    }

    /// Override the audit log path.
    pub fn with_audit_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.audit_log_path = path.into();
        self
    }

    /// Override the mount path.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalize_base_path(base_path);
        self
    }
}

/// Default audit log location: `~/.dashgate/access_log.txt`
pub fn default_audit_log_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    home.join(".dashgate").join("access_log.txt")
}

/// Normalize a mount path: empty becomes `/`, a leading slash is enforced
/// and a trailing slash is dropped.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Check that a normalized mount path can be used as a route, a `Location`
/// header and a cookie `Path` attribute.
///
/// Only visible ASCII is accepted. `;` and `,` would end the cookie
/// attribute, and `:`, `*`, `{`, `}` are route captures.
pub fn validate_base_path(path: &str) -> Result<(), GateError> {
    let invalid = path
        .chars()
        .find(|c| !c.is_ascii_graphic() || matches!(c, ';' | ',' | ':' | '*' | '{' | '}'));
    match invalid {
        Some(c) => Err(GateError::Config(format!(
            "DASHGATE_BASE_PATH contains an unsupported character {c:?}: {path:?}"
        ))),
        None => Ok(()),
    }
}
