use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use foodgram_api::config::ApiConfig;
use foodgram_api::infra::media::FsMediaStore;
use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_api_migration::{Migrator, MigratorTrait};
use foodgram_core::config::Config;
use foodgram_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
        info!("migrations applied");
    }

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        token_ttl_secs: config.token_ttl_secs,
        public_url: config.public_url.trim_end_matches('/').to_owned(),
        media: FsMediaStore::new(&config.media_root),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("foodgram api listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
