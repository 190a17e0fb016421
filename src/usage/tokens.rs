use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

static ENCODER: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn encoder() -> Option<&'static CoreBPE> {
    ENCODER
        .get_or_init(|| match tiktoken_rs::r50k_base() {
            Ok(bpe) => Some(bpe),
            Err(e) => {
                tracing::warn!("Failed to load r50k_base encoder, falling back to estimate: {e}");
                None
            }
        })
        .as_ref()
}

/// Number of GPT-3 (r50k) BPE tokens in `text`.
///
/// If the encoder cannot be loaded this degrades to a four-characters-per-token
/// estimate.
pub fn count_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    match encoder() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => text.chars().count().div_ceil(4),
    }
}
