use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::{env, net::SocketAddr, str::FromStr};

use crate::types::UserId;

const DEFAULT_APP_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_USER_ID: &str = "mock-user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// PostgreSQL connection string. Without one the service keeps records in memory.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub app_addr: SocketAddr,
    /// User the attendance routes act for when a request names none.
    pub default_user_id: UserId,
    pub history_default_limit: u32,
    pub history_max_limit: u32,
    pub cors_allow_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            database_max_connections: 5,
            app_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            default_user_id: UserId::parse(DEFAULT_USER_ID)
                .unwrap_or_else(|_| unreachable!("default user id is valid")),
            history_default_limit: 10,
            history_max_limit: 100,
            cors_allow_origins: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let database_max_connections =
            parse_env_or("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?;

        let app_addr = env::var("APP_ADDR").unwrap_or_else(|_| DEFAULT_APP_ADDR.to_string());
        let app_addr: SocketAddr = app_addr
            .parse()
            .with_context(|| format!("Invalid APP_ADDR value: {}", app_addr))?;

        let default_user_id =
            env::var("DEFAULT_USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_string());
        let default_user_id = UserId::parse(&default_user_id)
            .map_err(|e| anyhow!("Invalid DEFAULT_USER_ID value {}: {}", default_user_id, e))?;

        let history_default_limit =
            parse_env_or("HISTORY_DEFAULT_LIMIT", defaults.history_default_limit)?;
        let history_max_limit = parse_env_or("HISTORY_MAX_LIMIT", defaults.history_max_limit)?;

        let cors_allow_origins = parse_origins(&env::var("CORS_ALLOW_ORIGINS").unwrap_or_default());

        let config = Config {
            database_url,
            database_max_connections,
            app_addr,
            default_user_id,
            history_default_limit,
            history_max_limit,
            cors_allow_origins,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.history_max_limit == 0 {
            return Err(anyhow!("HISTORY_MAX_LIMIT must be at least 1"));
        }
        if self.history_default_limit == 0 || self.history_default_limit > self.history_max_limit {
            return Err(anyhow!(
                "HISTORY_DEFAULT_LIMIT must be between 1 and HISTORY_MAX_LIMIT ({})",
                self.history_max_limit
            ));
        }
        if self.database_max_connections == 0 {
            return Err(anyhow!("DATABASE_MAX_CONNECTIONS must be at least 1"));
        }
        Ok(())
    }
}

fn parse_env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {} value {}: {}", name, raw, e)),
        _ => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Hides credentials in a connection string before it is logged.
pub fn mask_database_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{}://{}:***@{}", scheme, user, host)
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_user_id.as_str(), "mock-user");
        assert_eq!(config.history_default_limit, 10);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn default_limit_above_max_is_rejected() {
        let config = Config {
            history_default_limit: 50,
            history_max_limit: 20,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn database_url_password_is_masked() {
        assert_eq!(
            mask_database_url("postgres://app:s3cret@db:5432/attendance"),
            "postgres://app:***@db:5432/attendance"
        );
        assert_eq!(
            mask_database_url("postgres://db:5432/attendance"),
            "postgres://db:5432/attendance"
        );
    }
}
