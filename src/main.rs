use recipe_book::config::AppConfig;
use recipe_book::open_workspace;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = AppConfig::load()?;
    log::info!("using recipe service at {}", config.api.base_url);

    let workspace = open_workspace(&config).await?;
    print!("{}", workspace.render());

    Ok(())
}
