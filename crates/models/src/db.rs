use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

pub use configs::DatabaseConfig;

/// Connect using the pool settings from configuration.
///
/// In-memory SQLite databases are per-connection, so their pool is pinned to one connection.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);

    if is_memory_sqlite(&cfg.url) {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(cfg.max_connections).min_connections(cfg.min_connections);
    }

    let db = Database::connect(opts).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

fn is_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_memory_sqlite() {
        assert!(is_memory_sqlite("sqlite::memory:"));
        assert!(is_memory_sqlite("sqlite://file:db?mode=memory&cache=shared"));
        assert!(!is_memory_sqlite("sqlite://laundry.db"));
        assert!(!is_memory_sqlite("postgres://localhost/laundry"));
    }

    #[tokio::test]
    async fn connects_to_memory_sqlite() -> anyhow::Result<()> {
        let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
        let db = connect_with_config(&cfg).await?;
        db.ping().await?;
        Ok(())
    }
}
