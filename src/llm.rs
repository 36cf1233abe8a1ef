//! Gemini text generation for the weather report panel.

use anyhow::{bail, Context, Result};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Shown when the model returns no usable text.
pub const FALLBACK_REPORT: &str = "No response from Gemini AI.";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            api_key,
            model,
        })
    }

    /// Sends one prompt and returns the first candidate's text, or the
    /// fallback string when the response carries none.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{GEMINI_URL}/{}:generateContent", self.model);
        debug!("POST {url}");

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Gemini request returned status {status}");
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("invalid JSON from Gemini")?;

        Ok(response_text(parsed).unwrap_or_else(|| FALLBACK_REPORT.to_string()))
    }
}

fn response_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
}

/// Builds the weather-reporter prompt from the already-formatted weather
/// and air-quality blocks.
pub fn weather_report_prompt(city: &str, weather_info: &str, air_quality_info: &str) -> String {
    format!(
        "The time is {now}. You are a weather reporter in the city of {city}. \
         You are tasked with giving a weather update based on the following data:\n\n \
         {weather_info} \n {air_quality_info}\n\n \
         Please provide a concise update and include any relevant details about the \
         weather, air quality, and any other important information that a resident \
         of {city} should know. Most important please indicate what a resident can \
         wear today based on the weather and include accessories i.e. umbrella, \
         sunglasses, etc.",
        now = Local::now()
    )
}
