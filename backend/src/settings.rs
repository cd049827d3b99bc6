//! Server configuration loaded via OrthoConfig.
//!
//! Values are layered from defaults, an optional config file, `TRAVEL_*`
//! environment variables and command-line flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime settings for the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRAVEL")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the server keeps its data in
    /// memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

/// A bind address that does not parse as `host:port`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bind address {value:?}: {reason}")]
pub struct BindAddrError {
    value: String,
    reason: String,
}

impl ServerSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| BindAddrError {
            value: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Database URL with surrounding whitespace removed; blank counts as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "TRAVEL_BIND_ADDR",
        "TRAVEL_DATABASE_URL",
        "TRAVEL_DB_MAX_CONNECTIONS",
        "TRAVEL_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("travel-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_max_connections, 10);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TRAVEL_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "TRAVEL_DATABASE_URL",
                Some("postgres://travel@localhost/travel".to_owned()),
            ),
            ("TRAVEL_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("TRAVEL_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9090
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://travel@localhost/travel")
        );
        assert_eq!(settings.db_max_connections, 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([
            ("TRAVEL_BIND_ADDR", Some("localhost".to_owned())),
            ("TRAVEL_DATABASE_URL", Some("   ".to_owned())),
            ("TRAVEL_DB_MAX_CONNECTIONS", None),
            ("TRAVEL_RUN_MIGRATIONS", None),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.bind_addr().is_err());
        assert!(settings.database_url().is_none());
    }
}
