use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Startup settings, read once from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub database: PgConnectOptions,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read settings from the process environment.
    ///
    /// `DATABASE_URL` wins when present; otherwise the connection is assembled
    /// from `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `DB_HOST` and `DB_PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database = match lookup("DATABASE_URL") {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .context("Invalid DATABASE_URL")?,
            None => database_from_parts(&lookup)?,
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(port) => port.parse::<u16>().context("Invalid PORT")?,
            None => DEFAULT_PORT,
        };

        Ok(Self { database, host, port })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection target without credentials, for logging
    pub fn database_target(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.database.get_username(),
            self.database.get_host(),
            self.database.get_port(),
            self.database.get_database().unwrap_or_default()
        )
    }
}

fn database_from_parts(lookup: &impl Fn(&str) -> Option<String>) -> Result<PgConnectOptions> {
    let user = lookup("DB_USER").context("DB_USER must be set when DATABASE_URL is not")?;
    let name = lookup("DB_NAME").context("DB_NAME must be set when DATABASE_URL is not")?;
    let password = lookup("DB_PASSWORD").unwrap_or_default();
    let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = match lookup("DB_PORT") {
        Some(port) => port.parse::<u16>().context("Invalid DB_PORT")?,
        None => 5432,
    };

    Ok(PgConnectOptions::new()
        .username(&user)
        .password(&password)
        .database(&name)
        .host(&host)
        .port(port)
        .ssl_mode(PgSslMode::Disable))
}
