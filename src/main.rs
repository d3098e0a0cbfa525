use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chat_session::SessionController;
use rag_client::{ClientConfig, RagClient};

mod notices;
mod render;
mod repl;

use notices::TermNotices;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env when present.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cfg = ClientConfig::from_env();
    tracing::info!("backend at {}", cfg.base_url);
    let client = RagClient::new(cfg)?;
    let notices = Arc::new(TermNotices::default());
    let controller = SessionController::new(client, notices.clone());

    repl::run(controller, notices).await?;

    Ok(())
}
