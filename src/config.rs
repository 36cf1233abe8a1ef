//! Runtime settings shared across commands.

use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Timeout applied to every outbound HTTP request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct Settings {
    pub openweather_api_key: String,
    /// Optional; without it the dashboard skips the AI weather report.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}
