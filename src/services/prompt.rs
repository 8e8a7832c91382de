use crate::services::settings::AppConfig;
use tera::{Context, Tera};
use tracing::{debug, warn};

/// Instructional wrapper rendered around every question. Keeps the model on
/// a direct, preamble-free tutor register and asks for terminal-friendly
/// line breaks.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
You are the world's best AI tutor and expert with extensive knowledge across a wide range of subjects.
Answer the given question comprehensively, using clear and easy-to-understand language.
Include detailed explanations, relevant examples, and structured information to ensure the answer is informative and well-organized.
Format the answer with new line characters after approximately every 10-12 words to ensure the text is easily readable in a terminal interface.
Do not include any introductory phrases like 'What a great question!' or 'Sure, I can help with that.'
Please provide a concise and informative answer that addresses the question directly.
Focus solely on providing a high-quality answer and avoid any unnecessary text.
Question: {{ question }}
Answer:";

/// Builds the completion prompt by rendering a Tera template around the raw
/// question. Pure templating: no validation, no escaping, no length limits.
pub struct PromptBuilder {
    template: String,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        let template = cfg
            .prompt
            .as_ref()
            .and_then(|p| p.template.clone())
            .unwrap_or_else(|| DEFAULT_PROMPT_TEMPLATE.to_string());
        Self { template }
    }

    /// Renders the template with the question. A broken user-supplied
    /// template is logged and the raw question is used instead, so the
    /// builder itself never fails.
    pub fn build(&self, question: &str) -> String {
        let template_name = "tutor_prompt";
        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_template(template_name, &self.template) {
            warn!("tera add_raw_template failed: {}", e);
            return question.to_string();
        }
        let mut ctx = Context::new();
        ctx.insert("question", question);
        match tera.render(template_name, &ctx) {
            Ok(s) => {
                debug!(prompt_len = s.len(), "prompt rendered");
                s
            }
            Err(e) => {
                warn!("tera render failed: {}", e);
                question.to_string()
            }
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
