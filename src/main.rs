use std::process::ExitCode;
use std::sync::Arc;

use dotenvy::dotenv;
use phone_storefront::infrastructure::openrouter::OpenRouterClient;
use phone_storefront::{build_server, create_pool, run_migrations, AppState, Config};

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    if config.chat.api_key.is_empty() {
        log::warn!("OPENROUTER_API_KEY is not set; chat requests will be rejected upstream");
    }

    let pool = create_pool(&config.database_url)?;
    run_migrations(&pool)?;

    let gateway = OpenRouterClient::new(&config.chat)?;
    let state = AppState::with_pool(pool, Arc::new(gateway));

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await?;
    Ok(())
}
