use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::io::BufReader;

use termtutor::services::formatter::ResponseFormatter;
use termtutor::services::prompt::PromptBuilder;
use termtutor::services::session::{BANNER, ChatSession, FETCH_ERROR_MESSAGE};
use termtutor::traits::chat_api::ChatApi;

/// Scripted stand-in for the completion backend: pops one canned reply per
/// call and records every prompt it was given.
struct MockChatApi {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockChatApi {
    fn new(replies: Vec<Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn call_chat_api(
        &self,
        prompt: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(s)) => Ok(s),
            Some(Err(e)) => Err(e.into()),
            None => Err("mock replies exhausted".into()),
        }
    }
}

fn session_with(chat_api: Arc<MockChatApi>) -> ChatSession {
    ChatSession::builder()
        .chat_api(chat_api)
        .prompt_builder(PromptBuilder::new())
        .formatter(ResponseFormatter::builder().build())
        .build()
}

async fn run_session(session: &ChatSession, input: &str) -> String {
    let mut output: Vec<u8> = Vec::new();
    session
        .run(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn answers_one_question_then_exits() {
    let mock = MockChatApi::new(vec![Ok(
        "Gravity is a force. It pulls objects together.".to_string(),
    )]);
    let session = session_with(Arc::clone(&mock));

    let output = run_session(&session, "What is gravity?\nexit\n").await;

    let expected = format!(
        "{BANNER}\n\n  Gravity is a force. It pulls objects together.\n\n\n\n{BANNER}\n"
    );
    assert_eq!(output, expected);
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn exit_sentinel_never_reaches_the_backend() {
    let mock = MockChatApi::new(vec![]);
    let session = session_with(Arc::clone(&mock));

    for input in ["exit\n", "EXIT\n", "  Exit  \n"] {
        let output = run_session(&session, input).await;
        assert_eq!(output, format!("{BANNER}\n"));
    }
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn eof_ends_the_loop_cleanly() {
    let mock = MockChatApi::new(vec![Ok("Short answer.".to_string())]);
    let session = session_with(Arc::clone(&mock));

    // No sentinel: the input just ends.
    let output = run_session(&session, "hello\n").await;

    assert!(output.contains("  Short answer."));
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn backend_failure_prints_fixed_line_and_loop_continues() {
    let mock = MockChatApi::new(vec![
        Err("no choices returned in chat response".to_string()),
        Ok("Recovered fine.".to_string()),
    ]);
    let session = session_with(Arc::clone(&mock));

    let output = run_session(&session, "first?\nsecond?\nexit\n").await;

    let expected = format!(
        "{BANNER}\n{FETCH_ERROR_MESSAGE}\n\n{BANNER}\n\n  Recovered fine.\n\n\n\n{BANNER}\n"
    );
    assert_eq!(output, expected);
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn questions_are_wrapped_in_the_tutor_prompt() {
    let mock = MockChatApi::new(vec![Ok("ok".to_string())]);
    let session = session_with(Arc::clone(&mock));

    let _ = run_session(&session, "What is gravity?\nexit\n").await;

    let prompts = mock.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Question: What is gravity?"));
    assert!(prompts[0].contains("AI tutor"));
    assert!(prompts[0].ends_with("Answer:"));
}

#[tokio::test]
async fn answer_is_trimmed_before_formatting() {
    let mock = MockChatApi::new(vec![Ok("  \n padded answer \n  ".to_string())]);
    let session = session_with(Arc::clone(&mock));

    let output = run_session(&session, "q\nexit\n").await;

    assert!(output.contains("\n  padded answer\n"));
}

#[tokio::test]
async fn long_answers_wrap_across_indented_lines() {
    let word = "abcdefghij"; // 10 chars
    let answer = vec![word; 30].join(" "); // 329 chars, wraps at 150
    let mock = MockChatApi::new(vec![Ok(answer.clone())]);
    let session = session_with(Arc::clone(&mock));

    let output = run_session(&session, "q\nexit\n").await;

    let wrapped: Vec<&str> = output
        .lines()
        .filter(|l| l.starts_with("  "))
        .collect();
    assert!(wrapped.len() > 1, "expected the answer to wrap: {output:?}");
    for line in &wrapped {
        assert!(line.trim_start().chars().count() <= 150);
    }
    // Word-preserving round-trip across the wrapped lines.
    let joined = wrapped.join(" ");
    let rejoined: Vec<&str> = joined.split_whitespace().collect();
    assert_eq!(rejoined, answer.split_whitespace().collect::<Vec<&str>>());
}
