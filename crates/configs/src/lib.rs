//! Layered application configuration.
//!
//! `config.toml` is read first, then `config.<environment>.toml` is merged over it
//! when present, then environment variables (including `.env`, loaded by the
//! binary) override individual keys.

use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub mod settings;

pub use settings::SystemSettings;

pub const DEVELOPMENT: &str = "development";
const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub identity: IdentityConfig,
    pub cache: CacheConfig,
    pub docs: DocsConfig,
    pub logging: LoggingConfig,
    pub system: SystemSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: DEVELOPMENT.into(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            redis: RedisConfig::default(),
            jwt: JwtConfig::default(),
            identity: IdentityConfig::default(),
            cache: CacheConfig::default(),
            docs: DocsConfig::default(),
            logging: LoggingConfig::default(),
            system: SystemSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
    pub sqlx_logging: bool,
    /// Apply pending migrations on startup.
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 3600,
            acquire_timeout_secs: 30,
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

/// Redis connection string. Kept for parity with deployments that provision it;
/// nothing reads from Redis yet.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RedisConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    /// Token issuer (`iss`).
    pub authority: String,
    /// Token audience (`aud`).
    pub audience: String,
    pub expiry_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            authority: "laundry-backend".into(),
            audience: "laundry-clients".into(),
            expiry_minutes: 720,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct IdentityConfig {
    pub seed_admin: Option<SeedAdminConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedAdminConfig {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub token_ttl_secs: u64,
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { token_ttl_secs: 60, max_capacity: 10_000 }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DocsConfig {
    /// Serve Swagger UI; defaults to on in development only.
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: "compact".into() }
    }
}

/// Load `CONFIG_PATH` (default `config.toml`) with the `APP_ENV` overlay.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let environment = std::env::var("APP_ENV").ok();
    load_layered(&path, environment.as_deref())
}

/// Read `path`, then merge `<stem>.<environment>.toml` from the same directory over it.
pub fn load_layered(path: &str, environment: Option<&str>) -> Result<AppConfig> {
    let mut merged = read_table(path)?;
    let environment = environment
        .map(str::to_string)
        .or_else(|| merged.get("environment").and_then(|v| v.as_str()).map(str::to_string))
        .unwrap_or_else(|| DEVELOPMENT.to_string());

    let overlay = overlay_path(path, &environment);
    if Path::new(&overlay).exists() {
        merge_tables(&mut merged, read_table(&overlay)?);
    }
    merged.insert("environment".into(), toml::Value::String(environment));

    let cfg: AppConfig = toml::Value::Table(merged).try_into()?;
    Ok(cfg)
}

fn read_table(path: &str) -> Result<toml::Table> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn overlay_path(path: &str, environment: &str) -> String {
    let p = Path::new(path);
    let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or("config");
    let file = format!("{stem}.{environment}.toml");
    match p.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file).to_string_lossy().into_owned(),
        _ => file,
    }
}

/// Deep merge: nested tables merge key by key, everything else is replaced.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(over) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, over);
                continue;
            }
            base.insert(key, toml::Value::Table(over));
        } else {
            base.insert(key, value);
        }
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|e| e.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl AppConfig {
    /// Load from disk (or defaults when no config file exists), apply environment
    /// overrides, and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig {
                environment: std::env::var("APP_ENV").unwrap_or_else(|_| DEVELOPMENT.to_string()),
                ..AppConfig::default()
            },
            Err(e) => return Err(e),
        };
        cfg.apply_env_overrides();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case(DEVELOPMENT)
    }

    pub fn docs_enabled(&self) -> bool {
        self.docs.enabled.unwrap_or_else(|| self.is_development())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(url) = std::env::var("REDIS_URL") {
            self.redis.url = Some(url);
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        let dev = self.is_development();
        self.jwt.normalize(dev)?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl JwtConfig {
    fn normalize(&mut self, development: bool) -> Result<()> {
        if self.secret.trim().is_empty() {
            if !development {
                return Err(anyhow!("jwt.secret is required outside development (JWT_SECRET)"));
            }
            self.secret = DEV_JWT_SECRET.to_string();
        }
        if self.expiry_minutes <= 0 {
            return Err(anyhow!("jwt.expiry_minutes must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, body: &str) -> String {
        let dir = std::env::temp_dir().join(format!("laundry-configs-{}-{}", std::process::id(), name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn overlay_merges_nested_tables() {
        let base = write_temp(
            "overlay",
            r#"
environment = "production"
[server]
host = "0.0.0.0"
port = 9000
[database]
url = "postgres://base/db"
max_connections = 20
"#,
        );
        let overlay = Path::new(&base).with_file_name("config.staging.toml");
        std::fs::write(&overlay, "[database]\nurl = \"postgres://staging/db\"\n").unwrap();

        let cfg = load_layered(&base, Some("staging")).unwrap();
        assert_eq!(cfg.environment, "staging");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.url, "postgres://staging/db");
        // untouched keys survive the overlay
        assert_eq!(cfg.database.max_connections, 20);
        assert_eq!(cfg.database.min_connections, 2);
    }

    #[test]
    fn missing_overlay_is_ignored() {
        let base = write_temp("no-overlay", "[server]\nport = 7000\n");
        let cfg = load_layered(&base, None).unwrap();
        assert_eq!(cfg.environment, DEVELOPMENT);
        assert_eq!(cfg.server.port, 7000);
        assert!(cfg.docs_enabled());
    }

    #[test]
    fn database_url_scheme_is_checked() {
        let mut db = DatabaseConfig { url: "mysql://x".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
        db.url = "sqlite::memory:".into();
        assert!(db.validate().is_ok());
        db.min_connections = 5;
        db.max_connections = 1;
        assert!(db.validate().is_err());
    }

    #[test]
    fn jwt_secret_required_outside_development() {
        let mut jwt = JwtConfig::default();
        assert!(jwt.normalize(false).is_err());
        jwt.normalize(true).unwrap();
        assert_eq!(jwt.secret, DEV_JWT_SECRET);
    }

    #[test]
    fn docs_follow_environment_unless_forced() {
        let mut cfg = AppConfig { environment: "production".into(), ..AppConfig::default() };
        assert!(!cfg.docs_enabled());
        cfg.docs.enabled = Some(true);
        assert!(cfg.docs_enabled());
    }
}
