use std::path::PathBuf;
use std::sync::Arc;

use groq_api::{GroqApiClient, GroqApiConfig};
use log::info;
use transcript_store::TranscriptStore;

use chat_relay::chatbot::{ChatBot, GroqBackend};
use chat_relay::config::AppConfig;
use chat_relay::server::{router, AppState};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("Make sure .env contains Username, Assistantname, and GroqAPIKey.");
            std::process::exit(1);
        }
    };

    if let Err(error) = run(config).await {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = TranscriptStore::open(&config.chat_log_path)?;

    let mut api_config = GroqApiConfig::new(&config.api_key);
    if let Some(base_url) = &config.base_url {
        api_config = api_config.with_base_url(base_url);
    }
    if let Some(model) = &config.model {
        api_config = api_config.with_model(model);
    }
    let client = GroqApiClient::new(api_config)?;

    let chatbot = ChatBot::new(
        store,
        GroqBackend::new(client),
        &config.username,
        &config.assistant_name,
    );
    let state = AppState {
        chatbot: Some(Arc::new(chatbot)),
        assets_dir: PathBuf::from(&config.assets_dir),
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("chat log at {}", config.chat_log_path);
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
