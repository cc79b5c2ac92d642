//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Task-execution endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/mcp";

/// Identities offered by `/user`. The first one is the default.
pub const USERS: &[&str] = &["user123", "guest", "admin"];

/// Placeholder for a value the server did not send.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown for a todo list with no items.
pub const EMPTY_LIST: &str = "(empty)";

/// Canned tasks, one per server tool.
pub const EXAMPLE_TASKS: &[&str] = &[
    "calculate 12*(3+4)",
    "evaluate python: sum(range(10))",
    "add 'buy milk' to my todo list",
    "show my todo list",
    "what's the weather in Detroit?",
    "stock price of AAPL",
    "summarize the plot of Hamlet in two sentences",
];

/// Default identity: first entry of [`USERS`].
pub fn default_user() -> &'static str {
    USERS[0]
}

/// Default database path: `~/.tasktester/tasktester.db`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".tasktester").join("tasktester.db"))
}
