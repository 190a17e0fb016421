use super::{count_tokens, estimate_price_cents};

/// Token and cost figures for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunUsage {
    pub model: String,
    pub prompt_tokens: usize,
    pub response_tokens: usize,
    /// `None` when the model has no known price.
    pub cost_cents: Option<f64>,
}

impl RunUsage {
    pub fn new(model: impl Into<String>, prompt_tokens: usize, response_tokens: usize) -> Self {
        let model = model.into();
        let cost_cents = estimate_price_cents(prompt_tokens, response_tokens, &model);
        Self {
            model,
            prompt_tokens,
            response_tokens,
            cost_cents,
        }
    }

    /// Count tokens for a prompt/response exchange. The prompt side is the
    /// system prompt followed directly by the user message.
    pub fn measure(model: impl Into<String>, system_prompt: &str, user_message: &str, response: &str) -> Self {
        let prompt = format!("{system_prompt}{user_message}");
        Self::new(model, count_tokens(&prompt), count_tokens(response))
    }

    pub const fn total_tokens(&self) -> usize {
        self.prompt_tokens + self.response_tokens
    }
}

/// Running totals across the runs of one session (retries included).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageLedger {
    runs: Vec<RunUsage>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, usage: RunUsage) -> &RunUsage {
        tracing::debug!(
            model = %usage.model,
            prompt_tokens = usage.prompt_tokens,
            response_tokens = usage.response_tokens,
            cost_cents = ?usage.cost_cents,
            "run recorded"
        );
        self.runs.push(usage);
        &self.runs[self.runs.len() - 1]
    }

    pub fn runs(&self) -> &[RunUsage] {
        &self.runs
    }

    pub fn cumulative_tokens(&self) -> usize {
        self.runs.iter().map(RunUsage::total_tokens).sum()
    }

    /// Sum of known costs; unpriced runs contribute nothing.
    pub fn cumulative_cost_cents(&self) -> f64 {
        let total: f64 = self.runs.iter().filter_map(|run| run.cost_cents).sum();
        (total * 1000.0).round() / 1000.0
    }
}
