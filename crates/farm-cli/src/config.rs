//! Runtime configuration loaded from environment variables.

/// Default SQLite database, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://farm.db?mode=rwc";

/// Default name of the farm state document.
pub const DEFAULT_DOCUMENT: &str = "farm_state";

/// CLI configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `DATABASE_URL`: SQLite connection string (default: `sqlite://farm.db?mode=rwc`)
/// - `FARM_DOCUMENT`: name of the state document (default: `farm_state`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub document: String,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database_url),
            document: lookup("FARM_DOCUMENT")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.document),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, database_url: Option<&str>, document: Option<&str>) -> Self {
        if let Some(url) = database_url {
            self.database_url = url.to_string();
        }
        if let Some(document) = document {
            self.document = document.to_string();
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            document: DEFAULT_DOCUMENT.to_string(),
            log_level: "info".to_string(),
        }
    }
}
