//! Application configuration loaded from environment variables.

use std::env;

use replysmith_infra::OpenAiConfig;
use replysmith_infra::database::{DatabaseConfig, SecondaryDbConfig};

/// Account policy applied at registration.
#[derive(Debug, Clone)]
pub struct AccountSettings {
    /// Length of the trial granted to new accounts.
    pub trial_days: i64,
    /// Registering with this email yields an admin account.
    pub bootstrap_admin_email: Option<String>,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            trial_days: 7,
            bootstrap_admin_email: None,
        }
    }
}

impl AccountSettings {
    pub fn from_env() -> Self {
        Self {
            trial_days: env::var("TRIAL_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|days: &i64| *days >= 0)
                .unwrap_or(7),
            bootstrap_admin_email: env::var("BOOTSTRAP_ADMIN_EMAIL")
                .ok()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty()),
        }
    }

    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        self.bootstrap_admin_email
            .as_deref()
            .is_some_and(|admin| admin.eq_ignore_ascii_case(email))
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub openai: OpenAiConfig,
    pub accounts: AccountSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|main_url| DatabaseConfig {
            main_url,
            main_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            main_min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            secondary_databases: parse_secondary_databases(env::vars()),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            openai: OpenAiConfig::from_env(),
            accounts: AccountSettings::from_env(),
        }
    }
}

/// Parse `SECONDARY_DB_<NAME>=<URL>[,<MAX_CONNECTIONS>]` entries.
fn parse_secondary_databases(vars: impl Iterator<Item = (String, String)>) -> Vec<SecondaryDbConfig> {
    vars.filter_map(|(key, value)| {
        let name = key.strip_prefix("SECONDARY_DB_")?;
        let (url, max) = match value.split_once(',') {
            Some((url, max)) => (url, max.trim().parse().ok()),
            None => (value.as_str(), None),
        };
        Some(SecondaryDbConfig {
            name: name.to_lowercase(),
            url: url.to_string(),
            max_connections: max.unwrap_or(5),
        })
    })
    .collect()
}
