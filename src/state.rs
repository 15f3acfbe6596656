use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::jwt::JwtProvider;
use crate::auth::password::Sha256Hasher;
use crate::auth::token::TokenProvider;
use crate::config::AppConfig;
use crate::users::repo::PgUserRepo;
use crate::users::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: Arc<UserService>,
    pub tokens: Arc<dyn TokenProvider>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        let tokens: Arc<dyn TokenProvider> = Arc::new(JwtProvider::new(&config.token.secret));
        let users = Arc::new(UserService::new(
            Arc::new(PgUserRepo::new(db.clone())),
            Arc::new(Sha256Hasher),
            tokens.clone(),
            config.token.expiry_secs,
        ));
        Self {
            db,
            config,
            users,
            tokens,
        }
    }
}
