//! Process entry point: configuration, tracing, router, expiry sweeper.

use std::error::Error;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use haven_chat::adapters::ai::{OpenAiCompletionService, OpenAiConfig};
use haven_chat::adapters::http::chat::{chat_routes, ChatAppState};
use haven_chat::config::AppConfig;
use haven_chat::domain::conversation::ConversationStore;
use haven_chat::ports::CompletionService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .ok_or("HAVEN__AI__OPENAI_API_KEY is required")?;
    let provider_config = OpenAiConfig::new(api_key)
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());
    let completion: Arc<dyn CompletionService> =
        Arc::new(OpenAiCompletionService::new(provider_config)?);

    let store = Arc::new(ConversationStore::new());
    spawn_expiry_sweeper(store.clone(), &config);

    let cors = cors_layer(&config);
    let app = chat_routes(ChatAppState::new(store, completion.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let provider = completion.provider_info();
    info!(
        %addr,
        provider = %provider.name,
        model = %provider.model,
        "starting haven-chat server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Periodically reclaims conversations inactive beyond the session TTL.
fn spawn_expiry_sweeper(store: Arc<ConversationStore>, config: &AppConfig) {
    let ttl = config.chat.session_ttl();
    let mut interval = tokio::time::interval(config.chat.sweep_interval());

    tokio::spawn(async move {
        loop {
            interval.tick().await;
            let removed = store.sweep_expired(ttl).await;
            if removed > 0 {
                info!(removed, "expired conversations swept");
            }
        }
    });
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
