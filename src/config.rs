use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::availability::ConflictMode;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
    pub mailer: Option<MailerConfig>,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Width of the generated slot grid.
    pub slot_interval_minutes: u32,
    /// Shops without an approval step book straight into `confirmed`.
    pub auto_confirm: bool,
    pub conflict_mode: ConflictMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailerConfig {
    pub api_key: String,
    pub endpoint: String,
    pub from_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Server configuration
        let host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .context("Failed to parse SERVER_HOST")?;

        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        // Database configuration
        let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let db_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(val) => Some(val.parse().context("Failed to parse DATABASE_MAX_CONNECTIONS")?),
            Err(_) => Some(10),
        };
        let db_min_connections = match env::var("DATABASE_MIN_CONNECTIONS") {
            Ok(val) => Some(val.parse().context("Failed to parse DATABASE_MIN_CONNECTIONS")?),
            Err(_) => Some(1),
        };

        // Booking behavior
        let slot_interval_minutes = env::var("BOOKING_SLOT_INTERVAL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u32>()
            .context("Failed to parse BOOKING_SLOT_INTERVAL_MINUTES")?;
        if slot_interval_minutes == 0 {
            anyhow::bail!("BOOKING_SLOT_INTERVAL_MINUTES must be positive");
        }

        let auto_confirm = env::var("BOOKING_AUTO_CONFIRM")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .context("Failed to parse BOOKING_AUTO_CONFIRM")?;

        let conflict_mode = env::var("BOOKING_CONFLICT_MODE")
            .unwrap_or_else(|_| "interval".to_string())
            .parse::<ConflictMode>()
            .map_err(anyhow::Error::msg)
            .context("Failed to parse BOOKING_CONFLICT_MODE")?;

        // Mailer configuration (optional; without it confirmations are skipped)
        let mailer = if let Ok(api_key) = env::var("MAILER_API_KEY") {
            let endpoint = env::var("MAILER_ENDPOINT")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string());
            let from_address = env::var("MAILER_FROM")
                .context("MAILER_FROM must be set when MAILER_API_KEY is provided")?;

            Some(MailerConfig {
                api_key,
                endpoint,
                from_address,
            })
        } else {
            None
        };

        // App configuration
        let environment = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse::<Environment>()
            .unwrap_or(Environment::Development);

        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "Barbershop Backend".to_string());

        Ok(Config {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: db_url,
                max_connections: db_max_connections,
                min_connections: db_min_connections,
            },
            booking: BookingConfig {
                slot_interval_minutes,
                auto_confirm,
                conflict_mode,
            },
            mailer,
            app: AppConfig {
                name: app_name,
                environment,
            },
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    #[allow(unused)]
    pub fn is_production(&self) -> bool {
        self.app.environment == Environment::Production
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" => Ok(Environment::Development),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

// Global config instance, initialized once at startup.
use once_cell::sync::OnceCell;

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
}

pub fn get() -> &'static Config {
    CONFIG.get().expect("Config is not initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("PRODUCTION".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("staging".parse::<Environment>(), Ok(Environment::Staging));
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn conflict_mode_parses_both_variants() {
        assert_eq!("interval".parse::<ConflictMode>(), Ok(ConflictMode::Interval));
        assert_eq!("exact_start".parse::<ConflictMode>(), Ok(ConflictMode::ExactStart));
        assert!("overlap".parse::<ConflictMode>().is_err());
    }
}
