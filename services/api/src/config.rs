use serde::Deserialize;

use foodgram_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HS256 signing secret for auth tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8000). Env var: `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base for absolute links (short links, media, pagination).
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// Directory uploaded images are written to.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Apply pending migrations before serving.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_port() -> u16 {
    8000
}

fn default_public_url() -> String {
    "http://localhost:8000".to_owned()
}

fn default_media_root() -> String {
    "media".to_owned()
}

fn default_token_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

fn default_run_migrations() -> bool {
    true
}

impl Config for ApiConfig {}
