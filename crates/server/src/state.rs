use std::{sync::Arc, time::Duration};

use moka::future::Cache;
use sea_orm::DatabaseConnection;

use configs::AppConfig;
use service::auth::{domain::Claims, repo::SeaOrmAuthRepository, AuthService, JwtKeys};
use service::Services;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    /// Verified claims keyed by raw token.
    pub token_cache: Cache<String, Claims>,
    pub services: Services,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        let keys = Arc::new(JwtKeys::from_config(&cfg.jwt));
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let token_cache = Cache::builder()
            .max_capacity(cfg.cache.max_capacity)
            .time_to_live(Duration::from_secs(cfg.cache.token_ttl_secs))
            .build();
        Self {
            auth: Arc::new(AuthService::new(repo, keys)),
            token_cache,
            services: Services::new(&db),
        }
    }
}
