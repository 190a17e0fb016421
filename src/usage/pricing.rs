//! Model price table
//!
//! Prices are USD per 1M tokens; estimates are reported in cents.

/// Input and output price per 1M tokens, in USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrice {
    pub input: f64,
    pub output: f64,
}

const fn price(input: f64, output: f64) -> ModelPrice {
    ModelPrice { input, output }
}

const MODEL_PRICING: &[(&str, ModelPrice)] = &[
    // GPT-5.x family
    ("gpt-5.2", price(1.75, 14.0)),
    ("gpt-5.1", price(1.25, 10.0)),
    ("gpt-5.1-codex", price(0.25, 2.0)),
    ("gpt-5", price(1.25, 10.0)),
    ("gpt-5-mini", price(0.25, 2.0)),
    ("gpt-5-nano", price(0.05, 0.4)),
    // GPT-4.1 family
    ("gpt-4.1", price(2.0, 8.0)),
    ("gpt-4.1-mini", price(0.4, 1.6)),
    ("gpt-4.1-nano", price(0.02, 0.15)),
    // GPT-4o family
    ("gpt-4o", price(2.5, 10.0)),
    ("gpt-4o-mini", price(0.15, 0.6)),
    // Legacy
    ("gpt-4-turbo", price(10.0, 30.0)),
    ("gpt-4", price(30.0, 60.0)),
    ("gpt-3.5-turbo", price(0.5, 1.5)),
    // Anthropic
    ("claude-opus-4-6", price(5.0, 25.0)),
    ("claude-sonnet-4-6", price(3.0, 15.0)),
    ("claude-haiku-4-5", price(1.0, 5.0)),
];

/// Exact-name lookup in the price table.
pub fn model_price(model: &str) -> Option<ModelPrice> {
    MODEL_PRICING
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, price)| *price)
}

/// Estimated cost in cents, rounded to 3 decimals. `None` for unknown models
/// (local Ollama models included).
pub fn estimate_price_cents(prompt_tokens: usize, output_tokens: usize, model: &str) -> Option<f64> {
    let price = model_price(model)?;
    // USD per 1M tokens -> cents per token is a factor of 1/10_000
    let cents = (prompt_tokens as f64 * price.input + output_tokens as f64 * price.output) / 10_000.0;
    Some((cents * 1000.0).round() / 1000.0)
}
