// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    AppConfig, CommandConfig, Config, ExecutorKind, HttpConfig, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

/// Config file used when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the optional file,
    /// then `SERVER_*` environment variables (`__` separates sections).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::with_defaults(settings)?.build()?.try_deserialize()
    }

    /// Build configuration from defaults only (no file, no environment)
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::with_defaults(config::Config::builder())?
            .build()?
            .try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("app.greeting", "espruino from linkgo.io, good night")?
            .set_default("command.executor", "expression")?
            .set_default("command.max_length", 1024)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "cmd_webserver")?
            .set_default("http.max_body_size", 65_536)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Seconds a single connection may stay open before it is cut
    pub fn connection_timeout_secs(&self) -> u64 {
        std::cmp::max(
            self.performance.read_timeout,
            self.performance.write_timeout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::defaults().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.server.workers.is_none());
        assert_eq!(cfg.app.greeting, "espruino from linkgo.io, good night");
        assert_eq!(cfg.command.executor, ExecutorKind::Expression);
        assert_eq!(cfg.command.max_length, 1024);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.http.max_body_size, 65_536);
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::defaults().unwrap();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not an address".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_connection_timeout_takes_larger_value() {
        let mut cfg = Config::defaults().unwrap();
        cfg.performance.read_timeout = 5;
        cfg.performance.write_timeout = 12;
        assert_eq!(cfg.connection_timeout_secs(), 12);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = Config::load_from("definitely/not/a/config/file").unwrap();
        assert_eq!(cfg.http.server_name, "cmd_webserver");
    }
}
