use axum::serve;
use recipe_book::api::routes::create_router;
use recipe_book::config::AppConfig;
use recipe_book::store::MemoryStore;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    let store = Arc::new(MemoryStore::new(config.cascade_policy()));
    log::info!(
        "ingredient delete cascade: {:?}",
        store.cascade_policy()
    );

    let app = create_router().with_state(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("recipe service running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
