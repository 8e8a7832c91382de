use crate::services::settings::LlmConfig;
use crate::traits::chat_api::ChatApi;
use async_trait::async_trait;

use ai_lib::ConnectionOptions;
use ai_lib::prelude::*;
use std::str::FromStr;
use strum_macros::EnumString;
use tracing::info;

/// Model used when the config names none; matches the hosted Groq default.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

const DEFAULT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, EnumString)]
#[strum(ascii_case_insensitive)]
enum ProviderName {
    Groq,
    OpenAI,
    Anthropic,
    Gemini,
    Mistral,
    DeepSeek,
    Ollama,
    OpenRouter,
    TogetherAI,
    XaiGrok,
}

fn map_provider(p: ProviderName) -> Provider {
    match p {
        ProviderName::Groq => Provider::Groq,
        ProviderName::OpenAI => Provider::OpenAI,
        ProviderName::Anthropic => Provider::Anthropic,
        ProviderName::Gemini => Provider::Gemini,
        ProviderName::Mistral => Provider::Mistral,
        ProviderName::DeepSeek => Provider::DeepSeek,
        ProviderName::Ollama => Provider::Ollama,
        ProviderName::OpenRouter => Provider::OpenRouter,
        ProviderName::TogetherAI => Provider::TogetherAI,
        ProviderName::XaiGrok => Provider::XaiGrok,
    }
}

/// Production `ChatApi` over an ai-lib cloud provider.
///
/// The client is built once at startup and reused for every turn; the only
/// hard requirement is an API key, resolved from `{PROVIDER}_API_KEY` in the
/// environment first and the config second.
pub struct CloudChatApi {
    client: AiClient,
    model: String,
    preview_chars: usize,
}

impl CloudChatApi {
    pub fn from_config(llm: &LlmConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let provider = llm.provider.clone().unwrap_or_else(|| "Groq".to_string());
        let prov = ProviderName::from_str(&provider)
            .map(map_provider)
            .map_err(|_| format!("unknown llm provider: {}", provider))?;

        let key_var = format!("{}_API_KEY", provider.to_uppercase());
        let api_key = std::env::var(&key_var).ok().or_else(|| llm.api_key.clone());
        if api_key.is_none() {
            return Err(format!("missing API key: set {} or llm.api_key in config", key_var).into());
        }

        info!(
            provider = %provider,
            base_url = %llm.base_url.as_deref().unwrap_or("None"),
            proxy = %llm.proxy.as_deref().unwrap_or("None"),
            timeout = %llm.request_timeout_secs.map_or("None".to_string(), |t| t.to_string()),
        );

        let client = AiClient::with_options(
            prov,
            ConnectionOptions {
                base_url: llm.base_url.clone(),
                proxy: llm.proxy.clone(),
                api_key,
                timeout: llm.request_timeout_secs.map(std::time::Duration::from_secs),
                disable_proxy: false,
            },
        )?;

        Ok(Self {
            client,
            model: llm
                .model
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            preview_chars: llm.log_prompt_preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS),
        })
    }
}

#[async_trait]
impl ChatApi for CloudChatApi {
    async fn call_chat_api(
        &self,
        prompt: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        // Log request details (without leaking the entire prompt)
        let prompt_preview: String = prompt.chars().take(self.preview_chars).collect();
        info!(
            model = %self.model,
            prompt_len = prompt.len(),
            prompt_preview = %prompt_preview,
            "ai_lib: chat request"
        );

        let req = ChatCompletionRequest::new(
            self.model.clone(),
            vec![Message {
                role: Role::User,
                content: Content::new_text(prompt.to_string()),
                function_call: None,
            }],
        );
        let resp = self.client.chat_completion(req).await?;
        if resp.choices.is_empty() {
            return Err("no choices returned in chat response".into());
        }
        let text = resp.choices[0].message.content.as_text();
        let response_preview: String = text.chars().take(self.preview_chars).collect();
        info!(
            model = %self.model,
            response_len = text.len(),
            response_preview = %response_preview,
            "ai_lib: chat response"
        );
        Ok(text)
    }
}
