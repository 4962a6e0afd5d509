use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Connection settings for the SQLite pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlite::memory:`, `sqlite://relative.db` or `sqlite:///absolute.db`
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
}

/// Where a SQLite URL points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteTarget {
    Memory,
    File(PathBuf),
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Resolve the URL, or `None` when it is not a usable SQLite URL
    pub fn target(&self) -> Option<SqliteTarget> {
        let rest = self.url.strip_prefix("sqlite:")?;
        if rest.contains(":memory:") {
            return Some(SqliteTarget::Memory);
        }
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() {
            return None;
        }
        Some(SqliteTarget::File(PathBuf::from(path)))
    }

    /// URL handed to sqlx; file databases are created on first open
    pub fn connect_url(&self) -> String {
        match self.target() {
            Some(SqliteTarget::File(_)) if !self.url.contains('?') => format!("{}?mode=rwc", self.url),
            _ => self.url.clone(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn test_targets() {
        assert_eq!(url("sqlite::memory:").target(), Some(SqliteTarget::Memory));
        assert_eq!(
            url("sqlite://data/sports.db").target(),
            Some(SqliteTarget::File(PathBuf::from("data/sports.db")))
        );
        assert_eq!(
            url("sqlite:///var/lib/sports.db?mode=ro").target(),
            Some(SqliteTarget::File(PathBuf::from("/var/lib/sports.db")))
        );
        assert_eq!(url("sqlite://").target(), None);
        assert_eq!(url("postgres://localhost/sports").target(), None);
    }

    #[test]
    fn test_connect_url_adds_create_mode() {
        assert_eq!(url("sqlite://data/sports.db").connect_url(), "sqlite://data/sports.db?mode=rwc");
        assert_eq!(url("sqlite::memory:").connect_url(), "sqlite::memory:");
        assert_eq!(url("sqlite://a.db?mode=ro").connect_url(), "sqlite://a.db?mode=ro");
    }
}
