use tracing::{debug, warn};

use crate::classify::contains_any;
use crate::config::Config;
use crate::llm::{CompletionClient, CompletionRequest, LlmError};
use crate::models::Category;

pub const APOLOGY_PREFIX: &str =
    "I'm having trouble connecting right now. Here's what I can tell you: ";

const IEP_PREAMBLE: &str = "You are an expert special education professional and IEP specialist with 20+ years of experience. You understand IDEA compliance, assessment strategies, accommodation planning, and individualized instruction. Provide detailed, practical, legally-compliant guidance that helps students succeed.";

const MECHATRONICS_PREAMBLE: &str = "You are a mechatronics engineering educator and industry expert. You understand curriculum development, hands-on learning, industry standards, and career pathways. Focus on practical applications, project-based learning, and preparing students for real-world careers.";

const PRESENTATION_PREAMBLE: &str = "You are a professional presentation consultant specializing in educational content. Create comprehensive, well-structured presentations with clear learning objectives, engaging content, and practical implementation strategies.";

const GENERAL_PREAMBLE: &str = "You are an expert educational consultant specializing in special education and technical training. Provide comprehensive, practical, and encouraging guidance that helps both students and educators succeed.";

/// Canned answers used when the model is unreachable. The keyword checks are
/// narrower than the classifier's: no presentation or goal matching.
const OFFLINE_ANSWERS: &[(&str, &str)] = &[
    (
        "iep",
        "IEP goals should be SMART: Specific, Measurable, Achievable, Relevant, Time-bound. They should be reviewed annually and updated based on student progress data.",
    ),
    (
        "mechatronics",
        "Mechatronics integrates mechanical engineering, electronics, computer science, and control systems to create intelligent machines and automated systems.",
    ),
    (
        "accommodation",
        "Effective accommodations include: extended time, alternative formats, assistive technology, modified assignments, and environmental adjustments.",
    ),
];

const OFFLINE_DEFAULT: &str = "I can help with IEP planning, mechatronics education, special education strategies, and professional development.";

pub fn preamble(category: Category) -> &'static str {
    match category {
        Category::Iep => IEP_PREAMBLE,
        Category::Mechatronics => MECHATRONICS_PREAMBLE,
        Category::Presentation => PRESENTATION_PREAMBLE,
        Category::General => GENERAL_PREAMBLE,
    }
}

pub fn build_prompt(query: &str, category: Category) -> String {
    format!("{}\n\nQuestion: {}", preamble(category), query)
}

pub fn offline_answer(query: &str) -> &'static str {
    let lower = query.to_lowercase();

    OFFLINE_ANSWERS
        .iter()
        .find(|(keyword, _)| contains_any(&lower, &[*keyword]))
        .map(|(_, answer)| *answer)
        .unwrap_or(OFFLINE_DEFAULT)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&Config> for GenerationParams {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

pub struct ResponseGenerator<C> {
    client: C,
    params: GenerationParams,
}

impl<C: CompletionClient> ResponseGenerator<C> {
    pub fn new(client: C, params: GenerationParams) -> Self {
        Self { client, params }
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Never fails: any client error is logged and replaced by the apology
    /// prefix plus the offline answer.
    pub async fn generate(&self, query: &str, category: Category) -> String {
        let request = CompletionRequest {
            prompt: build_prompt(query, category),
            model: self.params.model.clone(),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        };

        let error = match self.client.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(%category, chars = text.len(), "generation succeeded");
                return text;
            }
            Ok(_) => LlmError::EmptyResponse,
            Err(e) => e,
        };

        warn!(%category, error = %error, "generation unavailable, answering offline");
        format!("{}{}", APOLOGY_PREFIX, offline_answer(query))
    }
}
