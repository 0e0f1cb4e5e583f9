use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use speech_relay::controllers::speech::SpeechController;
use speech_relay::domain::speech::SpeechService;
use speech_relay::infrastructure::config::{Config, LogFormat};
use speech_relay::infrastructure::http::start_http_server;
use speech_relay::infrastructure::repositories::{OpenAiSpeechRepository, SpeechRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Speech Relay on {}:{}",
        config.host,
        config.port
    );

    tracing::info!(
        has_api_key = config.has_api_key(),
        upstream_base_url = %config.openai_base_url,
        upstream_timeout_secs = ?config.upstream_timeout_secs,
        max_request_bytes = config.max_request_bytes,
        "Speech provider configuration"
    );

    let http_client = OpenAiSpeechRepository::build_http_client(config.upstream_timeout())?;

    // Without a credential every synthesis request is refused, but preflight still works
    let speech_repo: Option<Arc<dyn SpeechRepository>> = match &config.openai_api_key {
        Some(api_key) => Some(Arc::new(OpenAiSpeechRepository::new(
            http_client,
            &config.openai_base_url,
            api_key.clone(),
        ))),
        None => {
            tracing::warn!("OPENAI_API_KEY is not set. Synthesis requests will fail until it is configured");
            None
        }
    };

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let speech_service = Arc::new(SpeechService::new(speech_repo));
    let speech_controller = Arc::new(SpeechController::new(
        speech_service,
        config.max_request_bytes,
    ));

    start_http_server(config, speech_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speech_relay=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speech_relay=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
