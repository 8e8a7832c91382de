use async_trait::async_trait;

/// Interface for the chat-completion backend that answers tutor questions.
///
/// The interactive session only ever talks to this trait, so tests can
/// substitute a scripted mock for the real provider client.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Sends a prompt to the completion endpoint and returns the raw
    /// assistant text.
    async fn call_chat_api(&self, prompt: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
