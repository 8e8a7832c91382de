use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    pub prompt: Option<PromptConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LlmConfig {
    pub provider: Option<String>,             // "Groq" | "OpenAI" | ...
    pub model: Option<String>,                // provider model id
    pub base_url: Option<String>,
    pub proxy: Option<String>,
    pub api_key: Option<String>,              // env {PROVIDER}_API_KEY wins
    pub request_timeout_secs: Option<u64>,
    // Logging options
    pub log_prompt_preview_chars: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PromptConfig {
    pub template: Option<String>,             // Tera template with {{ question }}
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub max_segment_chars: Option<usize>,     // soft wrap width, default 150
    pub indent_spaces: Option<usize>,         // per-line indent, default 2
    pub preserve_blank_lines: Option<bool>,   // keep empty source lines, default true
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, Box<dyn std::error::Error + Send + Sync>> {
    let content = fs::read_to_string(path)?;
    let cfg: AppConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}
