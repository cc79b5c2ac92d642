//! Persisted preferences backed by SQLite.
//!
//! Three keys survive between sessions: the endpoint, the identity and the
//! tool flag. [`Settings::resolve`] layers command-line overrides on top of
//! stored values on top of the built-in defaults.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use rusqlite::Connection;

use crate::consts::{DEFAULT_ENDPOINT, default_user};

/// The keys the store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Endpoint,
    User,
    Tools,
}

impl ConfigKey {
    pub const ALL: &[ConfigKey] = &[ConfigKey::Endpoint, ConfigKey::User, ConfigKey::Tools];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "endpoint",
            ConfigKey::User => "user",
            ConfigKey::Tools => "tools",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .with_context(|| format!("unknown config key: {s}"))
    }
}

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests and ephemeral sessions.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn get(&self, key: ConfigKey) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key.as_str()])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a value (upsert). Values are validated for their key.
    pub fn set(&self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            ConfigKey::Tools => {
                parse_flag(value)?;
            }
            ConfigKey::Endpoint | ConfigKey::User => {
                if value.is_empty() {
                    bail!("{key} must not be empty");
                }
            }
        }
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key.as_str(), value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: ConfigKey) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key.as_str()])?;
        Ok(())
    }
}

/// Parse a tool flag: `true/false`, `on/off`, `yes/no`, `1/0`.
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => bail!("expected on/off, got: {other}"),
    }
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub user: Option<String>,
    pub use_tools: Option<bool>,
}

/// The effective session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub user: String,
    pub use_tools: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user: default_user().to_string(),
            use_tools: true,
        }
    }
}

impl Settings {
    /// Command line beats stored value beats default.
    pub fn resolve(config: &Config, overrides: &Overrides) -> Result<Self> {
        let defaults = Self::default();

        let endpoint = match &overrides.endpoint {
            Some(e) => e.clone(),
            None => config.get(ConfigKey::Endpoint)?.unwrap_or(defaults.endpoint),
        };
        let user = match &overrides.user {
            Some(u) => u.clone(),
            None => config.get(ConfigKey::User)?.unwrap_or(defaults.user),
        };
        let use_tools = match overrides.use_tools {
            Some(flag) => flag,
            None => match config.get(ConfigKey::Tools)? {
                Some(stored) => parse_flag(&stored)
                    .with_context(|| format!("bad stored value for {}", ConfigKey::Tools))?,
                None => defaults.use_tools,
            },
        };

        Ok(Self {
            endpoint,
            user,
            use_tools,
        })
    }
}
