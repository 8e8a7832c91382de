use std::sync::Arc;

use crate::services::formatter::ResponseFormatter;
use crate::services::prompt::PromptBuilder;
use crate::traits::chat_api::ChatApi;
use bon::Builder;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info};

/// Prompt banner printed before every read.
pub const BANNER: &str = "Ask a question (or type 'exit' to quit):";
/// Reserved input that ends the loop, matched case-insensitively after trim.
pub const EXIT_COMMAND: &str = "exit";
/// Fixed line printed in place of an answer when the completion call fails.
pub const FETCH_ERROR_MESSAGE: &str =
    "An error occurred while fetching the response. Please try again.";

/// Returns true when `input` is the sentinel that ends the session.
pub fn is_exit_command(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

/// Sequential read-eval-print chat loop.
///
/// One turn at a time: read a line, build the prompt, await the completion,
/// reflow, print, prompt again. Collaborator failures are contained within
/// the turn; only the sentinel (or EOF) ends the loop.
#[derive(Builder)]
pub struct ChatSession {
    chat_api: Arc<dyn ChatApi>,
    prompt_builder: PromptBuilder,
    formatter: ResponseFormatter,
}

impl ChatSession {
    /// Answers one question. Any completion failure is logged and replaced
    /// by the fixed user-facing error line; the error line is printed plain,
    /// not reflowed.
    pub async fn answer(&self, question: &str) -> String {
        let prompt = self.prompt_builder.build(question);
        match self.chat_api.call_chat_api(&prompt).await {
            Ok(text) => self.formatter.format(text.trim()),
            Err(e) => {
                error!(error = %e, "chat api call failed");
                FETCH_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Runs the loop over the given streams until the sentinel or EOF.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(BANNER.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if is_exit_command(&line) {
                info!("exit command received");
                break;
            }
            let answer = self.answer(&line).await;
            output.write_all(answer.as_bytes()).await?;
            output.write_all(b"\n\n").await?;
            output.write_all(BANNER.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok(())
    }
}
