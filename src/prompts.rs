//! Prompt composition
//!
//! Helpers that turn a command's stored prompt, tone and selected text into the
//! system prompt / user message pair sent to a backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::traits::CompletionCapability;
use crate::types::CompletionRequest;

/// Writing tone appended to a command's system prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Default,
    Professional,
    Casual,
    Academic,
    Concise,
    Creative,
}

impl Tone {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Academic => "academic",
            Self::Concise => "concise",
            Self::Creative => "creative",
        }
    }

    /// The sentence appended for this tone; `None` for [`Tone::Default`].
    pub const fn instruction(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Professional => Some("Use a professional, business-appropriate tone."),
            Self::Casual => Some("Use a casual, conversational tone."),
            Self::Academic => Some("Use an academic, scholarly tone with precise language."),
            Self::Concise => Some("Be extremely concise. No filler words."),
            Self::Creative => Some("Use a creative, engaging tone with vivid language."),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "professional" => Ok(Self::Professional),
            "casual" => Ok(Self::Casual),
            "academic" => Ok(Self::Academic),
            "concise" => Ok(Self::Concise),
            "creative" => Ok(Self::Creative),
            other => Err(LlmError::ConfigurationError(format!(
                "Unknown tone: {other}. Valid options: default, professional, casual, academic, concise, creative"
            ))),
        }
    }
}

/// System prompt for a command: the stored prompt plus the tone instruction, if any.
pub fn compose_system_prompt(prompt: &str, tone: Tone) -> String {
    match tone.instruction() {
        Some(instruction) => format!("{prompt}\n\n{instruction}"),
        None => prompt.to_string(),
    }
}

/// User message for transform-style commands that send the instruction and
/// the selected text together.
pub fn compose_user_message(prompt: &str, selected: &str) -> String {
    format!("{prompt}\n\n{selected}")
}

/// The completion prompt used to refine a web search query.
pub fn refine_search_prompt(query: &str) -> String {
    format!(
        "I want to search for {query}. Help me refine this Google search query by focusing on \
         [key points or purpose, e.g., accuracy, up-to-date information, or specific sources]. \
         Exclude [any irrelevant terms or websites], and include results from [specific sites, if any]. \
         Provide a search query I can use to get the best results, only give me the query and nothing else"
    )
}

/// Ask the backend for a better search query.
///
/// Never fails: an error or an empty answer yields `query` unchanged.
pub async fn refine_search_query(
    client: &dyn CompletionCapability,
    model: &str,
    query: &str,
) -> String {
    let request = CompletionRequest::new(model, refine_search_prompt(query));
    match client.complete(request).await {
        Ok(refined) if !refined.is_empty() => refined,
        Ok(_) => {
            tracing::warn!(provider = %client.provider(), "Query refinement returned nothing, using original query");
            query.to_string()
        }
        Err(e) => {
            tracing::warn!(provider = %client.provider(), "Query refinement failed, using original query: {e}");
            query.to_string()
        }
    }
}
