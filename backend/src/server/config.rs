//! Runtime configuration parsed from flags and environment.

use std::net::SocketAddr;

use clap::Parser;

/// Configuration for the HTTP server and its database pool.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster-backend", about = "Users CRUD service")]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum connections held by the database pool.
    #[arg(long, env = "DB_POOL_MAX_SIZE", default_value_t = 10)]
    pub pool_max_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_url_is_given() {
        let config = AppConfig::try_parse_from([
            "roster-backend",
            "--database-url",
            "postgres://localhost/roster",
        ])
        .expect("config parses");

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.pool_max_size, 10);
        assert_eq!(config.database_url, "postgres://localhost/roster");
    }

    #[test]
    fn flags_override_defaults() {
        let config = AppConfig::try_parse_from([
            "roster-backend",
            "--database-url",
            "postgres://localhost/roster",
            "--bind-addr",
            "127.0.0.1:9090",
            "--pool-max-size",
            "4",
        ])
        .expect("config parses");

        assert_eq!(config.bind_addr.port(), 9090);
        assert_eq!(config.pool_max_size, 4);
    }
}
