//! Configuration loaded from environment variables (and `.env` via dotenv).

use std::env;
use std::time::Duration;

/// How JIRA is authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: Bearer <token>`, used by Data Center personal access tokens.
    Bearer(String),
    /// Basic auth with an account email and API token, used by JIRA Cloud.
    Basic { user: String, token: String },
}

/// Bounded wait for a freshly created resource to become readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyWait {
    pub attempts: u32,
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for ConsistencyWait {
    fn default() -> Self {
        Self {
            attempts: 10,
            interval: Duration::from_millis(200),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub auth: Auth,
    pub wait: ConsistencyWait,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("JIRA_BASE_URL").map_err(|_| ConfigError::Missing("JIRA_BASE_URL"))?;
        let token = env::var("JIRA_TOKEN").map_err(|_| ConfigError::Missing("JIRA_TOKEN"))?;

        let auth = match env::var("JIRA_USER") {
            Ok(user) if !user.is_empty() => Auth::Basic { user, token },
            _ => Auth::Bearer(token),
        };

        let defaults = ConsistencyWait::default();
        let wait = ConsistencyWait {
            attempts: parse_var("JIRA_CREATE_POLL_ATTEMPTS")?.unwrap_or(defaults.attempts),
            interval: parse_var("JIRA_CREATE_POLL_INTERVAL_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
            timeout: parse_var("JIRA_CREATE_POLL_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            wait,
        })
    }
}

/// Reads an optional numeric variable. Unset means `None`, garbage is an error.
pub fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so every case runs in one test.
    #[test]
    fn from_env_reads_auth_and_wait() {
        env::set_var("JIRA_BASE_URL", "https://jira.example.com/");
        env::set_var("JIRA_TOKEN", "secret");
        env::remove_var("JIRA_USER");
        env::remove_var("JIRA_CREATE_POLL_ATTEMPTS");
        env::remove_var("JIRA_CREATE_POLL_INTERVAL_MS");
        env::remove_var("JIRA_CREATE_POLL_TIMEOUT_MS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "https://jira.example.com");
        assert_eq!(config.auth, Auth::Bearer("secret".to_string()));
        assert_eq!(config.wait, ConsistencyWait::default());

        env::set_var("JIRA_USER", "admin@example.com");
        env::set_var("JIRA_CREATE_POLL_ATTEMPTS", "3");
        env::set_var("JIRA_CREATE_POLL_INTERVAL_MS", "50");
        let config = Config::from_env().unwrap();
        assert_eq!(
            config.auth,
            Auth::Basic {
                user: "admin@example.com".to_string(),
                token: "secret".to_string()
            }
        );
        assert_eq!(config.wait.attempts, 3);
        assert_eq!(config.wait.interval, Duration::from_millis(50));

        env::set_var("JIRA_CREATE_POLL_ATTEMPTS", "many");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "JIRA_CREATE_POLL_ATTEMPTS",
                ..
            }
        ));

        env::remove_var("JIRA_CREATE_POLL_ATTEMPTS");
        env::remove_var("JIRA_CREATE_POLL_INTERVAL_MS");
        env::remove_var("JIRA_USER");
        env::remove_var("JIRA_TOKEN");
        assert!(matches!(
            Config::from_env().unwrap_err(),
            ConfigError::Missing("JIRA_TOKEN")
        ));
        env::remove_var("JIRA_BASE_URL");
    }
}
