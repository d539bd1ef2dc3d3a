//! Thin asynchronous client for the deck-generation API.
//!
//! - Talks to any OpenAI-compatible chat-completions endpoint.
//! - Builds the deck prompt, applies the token budget, and funnels the
//!   returned text through the recovery parser.
//!
//! The HTTP call is the one blocking boundary of the deck pipeline; the
//! recovery parser itself stays pure and synchronous.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::recovery::recover_slides;
use crate::domain::slides::SlideRecord;
use crate::util::generate_id;
use crate::util::version::user_agent;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Slide-count bounds the dashboards offer; requests outside them are
/// clamped, not rejected.
const MIN_SLIDES: u8 = 3;
const MAX_SLIDES: u8 = 20;

const TOKENS_PER_SLIDE: u32 = 350;
const TOKEN_BASELINE: u32 = 500;
const TOKEN_CAP: u32 = 4_000;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    /// The generation returned text, but no slide could be recovered from
    /// it. Callers surface this as a failed generation with a retry
    /// affordance; retrying is their call, not this client's.
    #[error("no slide content could be recovered from the generation output")]
    NoContent,
}

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeneratorConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Everything the deck form collects for one generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckRequest {
    pub topic: String,
    pub category: String,
    pub slide_count: u8,
    pub tone: String,
    pub audience: String,
    pub language: String,
    #[serde(default)]
    pub key_points: Option<String>,
}

#[derive(Clone)]
pub struct GeneratorClient {
    http: Client,
    base_url: Url,
    api_key: String,
    model: String,
}

impl GeneratorClient {
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let base_url = Url::parse(&config.base_url)?;
        let http = Client::builder()
            .user_agent(user_agent())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            model: config.model,
        })
    }

    /// Runs one generation and recovers its slides.
    ///
    /// Transport and API failures come back as [`GeneratorError::Http`] /
    /// [`GeneratorError::Api`]; a response that yielded no recoverable
    /// slide is [`GeneratorError::NoContent`] so the caller can offer a
    /// retry instead of assembling an empty deck.
    pub async fn generate_deck(
        &self,
        request: &DeckRequest,
    ) -> Result<Vec<SlideRecord>, GeneratorError> {
        let request_id = generate_id("deck");
        let slide_count = request.slide_count.clamp(MIN_SLIDES, MAX_SLIDES);
        let prompt = build_prompt(request, slide_count);

        println!(
            "[generator] {request_id}: requesting {slide_count} slides about {:?} from {}",
            request.topic, self.model
        );

        let url = self.url("chat/completions")?;
        let body = ChatRequest {
            model: &self.model,
            max_tokens: token_budget(slide_count),
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response: ChatResponse = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GeneratorError::Api("response carried no choices".to_string()))?;

        match recover_slides(&content) {
            Some(slides) => {
                println!(
                    "[generator] {request_id}: recovered {} slide(s)",
                    slides.len()
                );
                Ok(slides)
            }
            None => {
                println!("[generator] {request_id}: output yielded no recoverable slides");
                Err(GeneratorError::NoContent)
            }
        }
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

/// Output budget for a deck of the given size.
fn token_budget(slide_count: u8) -> u32 {
    (u32::from(slide_count) * TOKENS_PER_SLIDE + TOKEN_BASELINE).min(TOKEN_CAP)
}

fn build_prompt(request: &DeckRequest, slide_count: u8) -> String {
    let mut prompt = String::new();
    if !request.language.is_empty() && request.language != "English" {
        prompt.push_str(&format!(
            "Generate ALL content in {} language.\n",
            request.language
        ));
    }
    prompt.push_str(&format!(
        "Create a {slide_count}-slide presentation about: {}\n",
        request.topic
    ));
    prompt.push_str(&format!(
        "Category: {} | Tone: {} | Audience: {}\n",
        request.category, request.tone, request.audience
    ));
    if let Some(key_points) = request.key_points.as_deref().filter(|s| !s.is_empty()) {
        prompt.push_str(&format!("Include: {key_points}\n"));
    }
    prompt.push_str(concat!(
        "\nReturn ONLY JSON:\n",
        "{\"slides\": [\n",
        "  {\"title\": \"Title\", \"bullets\": [], \"image_prompt\": \"topic\", \"speaker_notes\": \"notes\"},\n",
        "  {\"title\": \"Point\", \"bullets\": [\"detail 1\", \"detail 2\"], \"image_prompt\": \"topic\", \"speaker_notes\": \"notes\"}\n",
        "]}\n\n",
        "REQUIREMENTS:\n",
        "1. First slide: TITLE ONLY (empty bullets)\n",
    ));
    prompt.push_str("2. Other slides: 3-5 bullets each\n");
    prompt.push_str(&format!("3. Total: exactly {slide_count} slides\n"));
    prompt.push_str("4. Return ONLY JSON\n\nGenerate now:");
    prompt
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(slide_count: u8) -> DeckRequest {
        DeckRequest {
            topic: "AI in Healthcare".to_string(),
            category: "Business".to_string(),
            slide_count,
            tone: "Formal".to_string(),
            audience: "Investors".to_string(),
            language: "English".to_string(),
            key_points: None,
        }
    }

    #[test]
    fn token_budget_caps_large_decks() {
        assert_eq!(token_budget(3), 1_550);
        assert_eq!(token_budget(6), 2_600);
        assert_eq!(token_budget(20), 4_000);
    }

    #[test]
    fn prompt_carries_request_fields() {
        let prompt = build_prompt(&request(6), 6);
        assert!(prompt.contains("6-slide presentation about: AI in Healthcare"));
        assert!(prompt.contains("Category: Business | Tone: Formal | Audience: Investors"));
        assert!(prompt.contains("Return ONLY JSON"));
        // English is the default and needs no language instruction.
        assert!(!prompt.contains("Generate ALL content"));
    }

    #[test]
    fn prompt_adds_language_and_key_points() {
        let mut req = request(6);
        req.language = "Hindi".to_string();
        req.key_points = Some("- reach\n- margins".to_string());
        let prompt = build_prompt(&req, 6);
        assert!(prompt.starts_with("Generate ALL content in Hindi language."));
        assert!(prompt.contains("Include: - reach\n- margins"));
    }
}
