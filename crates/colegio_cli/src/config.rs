//! Command-line and environment configuration.
//!
//! Every flag falls back to a `COLEGIO_*` environment variable; a `.env`
//! file in the working directory is loaded first when present.

use clap::Parser;
use colegio_core::default_log_level;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Parser)]
#[command(name = "colegio", version, about = "School registry web server")]
pub struct Config {
    /// SQLite database file; created and migrated on first start.
    #[arg(long, env = "COLEGIO_DB_PATH", default_value = "colegio.sqlite3")]
    pub db_path: PathBuf,

    /// Address the HTTP server listens on.
    #[arg(long, env = "COLEGIO_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "COLEGIO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files.
    #[arg(long, env = "COLEGIO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        // a missing .env file is normal
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or_else(|| default_log_level())
    }

    /// Absolute log directory, resolved against the working directory.
    pub fn log_dir(&self) -> io::Result<PathBuf> {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        if dir.is_absolute() {
            Ok(dir)
        } else {
            Ok(std::env::current_dir()?.join(dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "colegio",
            "--db-path",
            "/tmp/school.sqlite3",
            "--bind",
            "0.0.0.0:9000",
            "--log-level",
            "warn",
            "--log-dir",
            "/var/log/colegio",
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/school.sqlite3"));
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.log_dir().unwrap(), PathBuf::from("/var/log/colegio"));
    }

    #[test]
    fn relative_log_dir_is_made_absolute() {
        let config = Config::try_parse_from(["colegio", "--log-dir", "run/logs"]).unwrap();
        let dir = config.log_dir().unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("run/logs"));
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let config = Config::try_parse_from(["colegio"]).unwrap();
        if config.log_level.is_none() {
            assert_eq!(config.log_level(), colegio_core::default_log_level());
        }
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        assert!(Config::try_parse_from(["colegio", "--bind", "not-an-address"]).is_err());
    }
}
