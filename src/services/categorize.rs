//! Category suggestions for transaction descriptions
//!
//! Two suggesters answer with one of `SUGGESTION_CATEGORIES`: an offline
//! keyword table, and a generative-text API (Gemini `generateContent`) used
//! when an API key is configured. The generative one never fails loudly:
//! network or response errors are logged and yield no suggestion.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::CategorizerSettings;
use crate::error::{FamfinError, FamfinResult};
use crate::models::category::{OTHER, SUGGESTION_CATEGORIES};

/// Something that can propose a category for a description
pub trait CategorySuggester {
    fn suggest(&self, description: &str) -> Option<String>;
}

/// Pick the generative suggester when an API key is available
pub fn suggester_from_settings(settings: &CategorizerSettings) -> Box<dyn CategorySuggester> {
    match settings.api_key() {
        Some(api_key) => Box::new(GenerativeSuggester::new(settings.clone(), api_key)),
        None => {
            tracing::debug!(
                env = %settings.api_key_env,
                "no API key set, using keyword suggestions"
            );
            Box::new(KeywordSuggester)
        }
    }
}

const KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food",
        &[
            "market", "supermarket", "grocer", "bakery", "butcher", "restaurant", "food", "lunch",
            "dinner", "breakfast", "cafe", "coffee", "pizza", "burger",
        ],
    ),
    (
        "Transport",
        &[
            "taxi", "uber", "bus", "train", "metro", "subway", "fuel", "petrol", "gas", "parking",
            "toll", "flight", "airline",
        ],
    ),
    (
        "Housing",
        &["rent", "mortgage", "electricity", "water", "furniture", "plumber", "landlord"],
    ),
    (
        "Leisure",
        &[
            "cinema", "movie", "netflix", "spotify", "concert", "game", "gym", "sport", "museum",
            "holiday", "hotel",
        ],
    ),
    (
        "Health",
        &["pharmacy", "doctor", "hospital", "dentist", "clinic", "medicine", "medical"],
    ),
    (
        "Education",
        &["school", "tuition", "course", "university", "college", "textbook", "training"],
    ),
    (
        "Shopping",
        &["clothes", "clothing", "shoes", "amazon", "mall", "shirt", "dress", "store"],
    ),
    (
        "Services",
        &[
            "phone", "internet", "insurance", "subscription", "haircut", "laundry", "repair",
            "fee",
        ],
    ),
];

/// Offline suggester matching description words against a keyword table
pub struct KeywordSuggester;

impl KeywordSuggester {
    fn word_matches(word: &str, keyword: &str) -> bool {
        word == keyword || (keyword.len() >= 4 && word.starts_with(keyword))
    }
}

impl CategorySuggester for KeywordSuggester {
    fn suggest(&self, description: &str) -> Option<String> {
        let lower = description.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let category = KEYWORDS
            .iter()
            .find(|(_, keywords)| {
                words
                    .iter()
                    .any(|w| keywords.iter().any(|k| Self::word_matches(w, k)))
            })
            .map(|(category, _)| *category)
            .unwrap_or(OTHER);

        Some(category.to_string())
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Suggester backed by a generative-text HTTP API
pub struct GenerativeSuggester {
    settings: CategorizerSettings,
    api_key: String,
}

impl GenerativeSuggester {
    pub fn new(settings: CategorizerSettings, api_key: String) -> Self {
        Self { settings, api_key }
    }

    fn prompt(description: &str) -> String {
        let categories = SUGGESTION_CATEGORIES
            .iter()
            .map(|c| format!("'{}'", c))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "You are a financial assistant. Categorize the following transaction description \
             into EXACTLY ONE of these categories: {}.\n\n\
             Description: \"{}\"\n\n\
             Return ONLY the category name, nothing else. If you are unsure, return '{}'.",
            categories, description, OTHER
        )
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Extract the trimmed text of the first candidate
    fn parse_response(body: &str) -> FamfinResult<String> {
        let response: GenerateResponse = serde_json::from_str(body)
            .map_err(|e| FamfinError::Categorizer(format!("invalid response: {}", e)))?;

        response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().trim_matches('\'').trim_matches('"').to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| FamfinError::Categorizer("empty response".into()))
    }

    fn request(&self, description: &str) -> FamfinResult<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.settings.timeout_secs))
            .build()
            .map_err(|e| FamfinError::Categorizer(e.to_string()))?;

        let prompt = Self::prompt(description);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        let response = client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| FamfinError::Categorizer(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| FamfinError::Categorizer(e.to_string()))?;

        if !status.is_success() {
            return Err(FamfinError::Categorizer(format!("status {}: {}", status, text)));
        }

        Self::parse_response(&text)
    }
}

impl CategorySuggester for GenerativeSuggester {
    fn suggest(&self, description: &str) -> Option<String> {
        match self.request(description) {
            Ok(category) => {
                tracing::debug!(%category, "generative suggestion");
                Some(category)
            }
            Err(e) => {
                tracing::warn!(error = %e, "category suggestion failed");
                None
            }
        }
    }
}

/// Outcome of matching a suggestion against the categories on offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// The suggestion names one of the available categories
    Available(String),
    /// The suggester answered with a category the user cannot pick
    Unavailable(String),
    /// The suggester had nothing to offer
    None,
}

/// Resolve a raw suggestion: exact match first, then case-insensitive
pub fn resolve_suggestion(raw: Option<String>, available: &[String]) -> Suggestion {
    let Some(raw) = raw else {
        return Suggestion::None;
    };

    if let Some(exact) = available.iter().find(|c| **c == raw) {
        return Suggestion::Available(exact.clone());
    }

    let lower = raw.to_lowercase();
    match available.iter().find(|c| c.to_lowercase() == lower) {
        Some(found) => Suggestion::Available(found.clone()),
        None => Suggestion::Unavailable(raw),
    }
}
