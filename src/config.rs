//! Runtime configuration, loaded from environment variables at startup.

/// Every field has a default so the assistant starts without any environment
/// set; without an API key every answer comes from the offline responder.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Anthropic API key (`ANTHROPIC_API_KEY`).
    pub api_key: Option<String>,

    /// Base URL of the messages API (default: `"https://api.anthropic.com"`).
    pub api_url: String,

    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,

    /// `tracing` filter string, e.g. `"info"` or `"iep_assistant=debug"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-sonnet-20240229".to_string(),
            max_tokens: 2000,
            temperature: 0.3,
            timeout_secs: 60,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            api_key: lookup("ANTHROPIC_API_KEY").filter(|v| !v.trim().is_empty()),
            api_url: lookup("IEP_ASSISTANT_API_URL").unwrap_or(defaults.api_url),
            model: lookup("IEP_ASSISTANT_MODEL").unwrap_or(defaults.model),
            max_tokens: parsed(&lookup, "IEP_ASSISTANT_MAX_TOKENS").unwrap_or(defaults.max_tokens),
            temperature: parsed(&lookup, "IEP_ASSISTANT_TEMPERATURE").unwrap_or(defaults.temperature),
            timeout_secs: parsed(&lookup, "IEP_ASSISTANT_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
            log_level: lookup("IEP_ASSISTANT_LOG").unwrap_or(defaults.log_level),
            log_json: lookup("IEP_ASSISTANT_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
