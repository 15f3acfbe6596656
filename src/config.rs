use anyhow::Context;

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub expiry_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub token: TokenConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let token = TokenConfig {
            secret: std::env::var("TOKEN_SECRET").context("TOKEN_SECRET must be set")?,
            expiry_secs: std::env::var("TOKEN_EXPIRY_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60 * 60 * 24),
        };
        Ok(Self {
            database_url,
            token,
        })
    }
}
