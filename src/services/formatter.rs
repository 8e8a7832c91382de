use crate::services::settings::AppConfig;
use bon::Builder;

/// Default soft-wrap width for packed segments, counted in chars.
pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 150;
/// Default indent prepended to every packed output line.
pub const DEFAULT_INDENT_SPACES: usize = 2;

/// Reflows a raw model answer into indented soft-wrapped lines for the
/// terminal.
///
/// Words are packed greedily per source line: a segment is flushed as soon
/// as the next word plus its separating space would push the segment past
/// `max_segment_chars`. A single word longer than the limit goes on its own
/// line, unsplit. Lengths are counted per `char` so multi-byte text is
/// never cut mid-codepoint. The whole result is padded with one blank line
/// before and one after.
#[derive(Debug, Clone, Builder)]
pub struct ResponseFormatter {
    #[builder(default = DEFAULT_MAX_SEGMENT_CHARS)]
    max_segment_chars: usize,
    #[builder(default = DEFAULT_INDENT_SPACES)]
    indent_spaces: usize,
    /// Empty source lines become empty output lines when true; they are
    /// dropped when false.
    #[builder(default = true)]
    preserve_blank_lines: bool,
}

impl ResponseFormatter {
    pub fn from_config(cfg: &AppConfig) -> Self {
        let out = cfg.output.as_ref();
        Self::builder()
            .max_segment_chars(
                out.and_then(|o| o.max_segment_chars)
                    .unwrap_or(DEFAULT_MAX_SEGMENT_CHARS),
            )
            .indent_spaces(
                out.and_then(|o| o.indent_spaces)
                    .unwrap_or(DEFAULT_INDENT_SPACES),
            )
            .preserve_blank_lines(out.and_then(|o| o.preserve_blank_lines).unwrap_or(true))
            .build()
    }

    /// Pure reflow of `text`; never fails.
    pub fn format(&self, text: &str) -> String {
        let indent = " ".repeat(self.indent_spaces);
        let mut out = String::from("\n");
        for line in text.split('\n') {
            let mut segment = String::new();
            let mut segment_chars: usize = 0;
            for word in line.split_whitespace() {
                let word_chars = word.chars().count();
                if !segment.is_empty() && segment_chars + 1 + word_chars > self.max_segment_chars {
                    out.push_str(&indent);
                    out.push_str(&segment);
                    out.push('\n');
                    segment.clear();
                    segment_chars = 0;
                }
                if !segment.is_empty() {
                    segment.push(' ');
                    segment_chars += 1;
                }
                segment.push_str(word);
                segment_chars += word_chars;
            }
            if segment.is_empty() {
                if self.preserve_blank_lines {
                    out.push('\n');
                }
            } else {
                out.push_str(&indent);
                out.push_str(&segment);
                out.push('\n');
            }
        }
        out.push('\n');
        out
    }
}
