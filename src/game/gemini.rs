//! Gemini content client.
//!
//! One request type, "generate a round", sent through the browser `fetch` API.
//! Prompt construction and response parsing are plain functions so they can be
//! exercised natively; only [`generate_round`] touches the browser.
use serde::Deserialize;
use serde_json::{Value, json};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::config::GameConfig;
use super::round::{GameOption, Letter, Round};
use crate::error::SourceError;

/// Fields the response schema marks as required, in schema order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "letter",
    "correctWord",
    "correctEmoji",
    "wrongWord1",
    "wrongEmoji1",
    "wrongWord2",
    "wrongEmoji2",
];

/// Structured round as returned by the generator.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRound {
    pub letter: String,
    pub correct_word: String,
    pub correct_emoji: String,
    pub wrong_word1: String,
    pub wrong_emoji1: String,
    pub wrong_word2: String,
    pub wrong_emoji2: String,
}

impl GeneratedRound {
    /// Validate and convert into an (unshuffled) round, correct option first.
    pub fn into_round(self) -> Result<Round, SourceError> {
        let fields = [
            ("correctWord", &self.correct_word),
            ("correctEmoji", &self.correct_emoji),
            ("wrongWord1", &self.wrong_word1),
            ("wrongEmoji1", &self.wrong_emoji1),
            ("wrongWord2", &self.wrong_word2),
            ("wrongEmoji2", &self.wrong_emoji2),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(SourceError::MissingField(name));
        }
        let letter =
            Letter::parse(&self.letter).ok_or_else(|| SourceError::InvalidLetter(self.letter.clone()))?;
        Ok(Round {
            letter,
            options: [
                GameOption::new(self.correct_word.trim(), self.correct_emoji.trim(), true),
                GameOption::new(self.wrong_word1.trim(), self.wrong_emoji1.trim(), false),
                GameOption::new(self.wrong_word2.trim(), self.wrong_emoji2.trim(), false),
            ],
        })
    }
}

// --- Request ---------------------------------------------------------------

pub fn build_prompt(exclude: Option<Letter>) -> String {
    let mut prompt = String::from(
        "Generate a single round for a letter learning game for a 4-year-old.\n\
         1. Choose a random english letter (A-Z).\n\
         2. Provide one simple word that STARTS with this letter (correct answer).\n\
         3. Provide two simple words that DO NOT start with this letter (distractors).\n\
         4. For each word, provide a standard emoji that best represents it.\n",
    );
    if let Some(l) = exclude {
        prompt.push_str(&format!("Do not use the letter '{l}'.\n"));
    }
    prompt.push_str(
        "Ensure words are concrete nouns (animals, fruits, vehicles) easy for a child to recognize.",
    );
    prompt
}

/// JSON body for `models/{model}:generateContent`.
pub fn request_body(exclude: Option<Letter>) -> Value {
    let properties: serde_json::Map<String, Value> = REQUIRED_FIELDS
        .iter()
        .map(|f| (f.to_string(), json!({ "type": "STRING" })))
        .collect();
    json!({
        "contents": [{ "parts": [{ "text": build_prompt(exclude) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": properties,
                "required": REQUIRED_FIELDS,
            }
        }
    })
}

pub fn endpoint_url(config: &GameConfig) -> String {
    format!(
        "{}/models/{}:generateContent",
        config.endpoint.trim_end_matches('/'),
        config.model
    )
}

// --- Response --------------------------------------------------------------

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract the generated text (first candidate, all text parts joined).
pub fn response_text(body: &str) -> Result<String, SourceError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)?;
    let text: String = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(SourceError::EmptyResponse);
    }
    Ok(text)
}

/// Parse a full `generateContent` response body into a generated round.
pub fn parse_response(body: &str) -> Result<GeneratedRound, SourceError> {
    let text = response_text(body)?;
    Ok(serde_json::from_str(&text)?)
}

// --- Browser fetch ---------------------------------------------------------

fn js_err(v: JsValue) -> SourceError {
    SourceError::Network(v.as_string().unwrap_or_else(|| format!("{v:?}")))
}

/// Single best-effort request. No retries; the caller falls back on any error.
pub async fn generate_round(
    config: &GameConfig,
    exclude: Option<Letter>,
) -> Result<GeneratedRound, SourceError> {
    let key = config.api_key().ok_or(SourceError::MissingApiKey)?;
    let body = serde_json::to_string(&request_body(exclude))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(&endpoint_url(config), &opts).map_err(js_err)?;
    let headers = request.headers();
    headers.set("Content-Type", "application/json").map_err(js_err)?;
    headers.set("x-goog-api-key", key).map_err(js_err)?;

    let win = web_sys::window().ok_or(SourceError::NoWindow)?;
    let resp: Response = JsFuture::from(win.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        return Err(SourceError::Status(resp.status()));
    }
    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .ok_or(SourceError::EmptyResponse)?;
    parse_response(&text)
}
