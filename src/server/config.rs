use std::net::SocketAddr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
/// Every day at 00:05, reporting on the previous day.
const DEFAULT_REPORT_CRON: &str = "0 5 0 * * *";

/// Credentials for the administrator account created on first start.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    /// Marks the session cookie `Secure`; enable behind HTTPS.
    pub session_secure: bool,
    /// Six-field cron expression for the daily report job.
    pub report_cron: String,
    /// Allowed CORS origin. `None` disables cross-origin requests.
    pub cors_origin: Option<String>,
    pub admin: Option<AdminBootstrap>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required =
            |name: &str| var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let bind_address = var("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDRESS".to_string(),
                reason: e.to_string(),
            })?;

        let session_secure = match var("SESSION_SECURE") {
            None => false,
            Some(value) => value.parse::<bool>().map_err(|e| ConfigError::InvalidEnvVar {
                name: "SESSION_SECURE".to_string(),
                reason: e.to_string(),
            })?,
        };

        let admin = match var("ADMIN_USERNAME") {
            None => None,
            Some(username) => Some(AdminBootstrap {
                username,
                password: required("ADMIN_PASSWORD")?,
                email: required("ADMIN_EMAIL")?,
            }),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address,
            session_secure,
            report_cron: var("REPORT_CRON").unwrap_or_else(|| DEFAULT_REPORT_CRON.to_string()),
            cors_origin: var("CORS_ORIGIN"),
            admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "sqlite://salon.db")])).unwrap();

        assert_eq!(config.database_url, "sqlite://salon.db");
        assert_eq!(config.bind_address.port(), 8080);
        assert!(!config.session_secure);
        assert_eq!(config.report_cron, DEFAULT_REPORT_CRON);
        assert!(config.cors_origin.is_none());
        assert!(config.admin.is_none());
    }

    #[test]
    fn requires_database_url() {
        let result = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")]));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DATABASE_URL"
        ));
    }

    #[test]
    fn rejects_malformed_values() {
        let bad_addr = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://salon.db"),
            ("BIND_ADDRESS", "localhost"),
        ]));
        let bad_flag = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://salon.db"),
            ("SESSION_SECURE", "yes"),
        ]));

        assert!(matches!(
            bad_addr,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
        assert!(matches!(
            bad_flag,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }

    #[test]
    fn admin_bootstrap_needs_all_credentials() {
        let partial = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://salon.db"),
            ("ADMIN_USERNAME", "admin"),
            ("ADMIN_PASSWORD", "secret"),
        ]));
        let complete = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://salon.db"),
            ("ADMIN_USERNAME", "admin"),
            ("ADMIN_PASSWORD", "secret"),
            ("ADMIN_EMAIL", "admin@salon.test"),
        ]))
        .unwrap();

        assert!(matches!(
            partial,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "ADMIN_EMAIL"
        ));
        assert_eq!(complete.admin.unwrap().username, "admin");
    }
}
