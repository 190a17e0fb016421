//! Request types

/// A single completion request. Built per invocation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Concrete model identifier, already resolved.
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_message: String,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: None,
            user_message: user_message.into(),
        }
    }

    /// Attach a system prompt. Empty prompts are treated as absent.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        let prompt = system_prompt.into();
        self.system_prompt = (!prompt.is_empty()).then_some(prompt);
        self
    }
}
