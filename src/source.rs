//! External question bank. The core consumes only a
//! `(text, answer, category, value)` tuple; everything about where questions
//! come from lives behind [`QuestionSource`].

use crate::types::Question;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

const TRIVIALBUZZ_URL: &str = "http://www.trivialbuzz.com/api/v1/questions/random.json";

/// Replaces `<a href="...">text</a>` with `text` in fetched question bodies.
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a[^>]+>(?P<text>[^<]+)</a>").expect("anchor regex is valid"));

/// Result type for question-bank lookups
pub type SourceResult = Result<Option<Question>, SourceError>;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// One opaque operation: fetch a random question. `Ok(None)` means the bank
/// had nothing to offer; callers decide whether that is fatal.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_random(&self) -> SourceResult;
}

#[derive(Debug, Deserialize)]
struct TrivialBuzzResponse {
    question: TrivialBuzzQuestion,
}

#[derive(Debug, Deserialize)]
struct TrivialBuzzQuestion {
    body: String,
    response: String,
    category: TrivialBuzzCategory,
    value: i64,
}

#[derive(Debug, Deserialize)]
struct TrivialBuzzCategory {
    name: String,
}

/// Production source backed by the TrivialBuzz REST API.
pub struct TrivialBuzzSource {
    client: reqwest::Client,
    url: String,
}

impl TrivialBuzzSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: TRIVIALBUZZ_URL.to_string(),
        }
    }
}

#[async_trait]
impl QuestionSource for TrivialBuzzSource {
    async fn fetch_random(&self) -> SourceResult {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "question source returned an error");
            return Ok(None);
        }
        let body: TrivialBuzzResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "question source returned an unparseable body");
                return Ok(None);
            }
        };

        // Question bodies arrive wrapped in single quotes
        let text = body.question.body;
        let text = text
            .strip_prefix('\'')
            .and_then(|t| t.strip_suffix('\''))
            .unwrap_or(&text);

        Ok(Some(Question {
            question_id: ulid::Ulid::new().to_string(),
            text: sanitize_question(text),
            answer: sanitize_answer(&body.question.response),
            category: body.question.category.name,
            value: body.question.value,
        }))
    }
}

fn sanitize_question(question: &str) -> String {
    let question = ANCHOR_RE.replace_all(question, "$text");
    question
        .replace("<br />", "\n")
        .replace('\\', "")
        .trim()
        .to_string()
}

fn sanitize_answer(answer: &str) -> String {
    answer.replace('\\', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_question_unwraps_anchors_and_breaks() {
        let raw = r#"This <a href="http://example.com">novelist</a> wrote it<br />in 1851"#;
        assert_eq!(
            sanitize_question(raw),
            "This novelist wrote it\nin 1851"
        );
    }

    #[test]
    fn sanitize_question_strips_backslashes_and_whitespace() {
        assert_eq!(sanitize_question(r"  It\'s a wonderful life  "), "It's a wonderful life");
    }

    #[test]
    fn sanitize_answer_strips_backslashes_and_whitespace() {
        assert_eq!(sanitize_answer(r" O\'Brien "), "O'Brien");
    }
}
