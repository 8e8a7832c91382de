pub mod services;
pub mod traits;

use std::sync::Arc;
use tracing::info;

use crate::services::chat_api_cloud::CloudChatApi;
use crate::services::formatter::ResponseFormatter;
use crate::services::prompt::PromptBuilder;
use crate::services::session::ChatSession;
use crate::services::settings::{AppConfig, load_config};
use crate::traits::chat_api::ChatApi;

/// High-level entrypoint: load config, init logging, run the chat session.
///
/// A missing config file is not an error; defaults are used and the API key
/// is taken from the environment.
pub async fn run_with_config_path(path: &str) -> std::io::Result<()> {
    let cfg: AppConfig = if std::path::Path::new(path).exists() {
        load_config(path)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("Failed to load {}: {}", path, e)))?
    } else {
        AppConfig::default()
    };

    // Structured logging goes to stderr so it never interleaves with the
    // chat transcript on stdout (default to info if RUST_LOG not set)
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_spec))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    run_session(cfg).await
}

/// Wires the services from config and runs the loop over stdin/stdout.
pub async fn run_session(cfg: AppConfig) -> std::io::Result<()> {
    info!("chat session starting");

    let chat_api: Arc<dyn ChatApi> = Arc::new(
        CloudChatApi::from_config(&cfg.llm)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );
    let session = ChatSession::builder()
        .chat_api(chat_api)
        .prompt_builder(PromptBuilder::from_config(&cfg))
        .formatter(ResponseFormatter::from_config(&cfg))
        .build();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    session.run(stdin, stdout).await
}
