//! @dose
//! purpose: Token estimate for rendered outlines, used to report how much smaller an outline
//!     is than the file it summarizes.
//!
//! invariants:
//!     - count_tokens never fails (falls back to len/4 if the encoder is unavailable)
//!
//! gotchas:
//!     - cl100k_base is an approximation for non-OpenAI models
//!     - The encoder is built on first use; the first call is slow

use once_cell::sync::Lazy;
use tiktoken_rs::CoreBPE;

static ENCODER: Lazy<Option<CoreBPE>> = Lazy::new(|| tiktoken_rs::cl100k_base().ok());

/// Approximate token count of `text`.
pub fn count_tokens(text: &str) -> usize {
    match ENCODER.as_ref() {
        Some(encoder) => encoder.encode_ordinary(text).len(),
        None => text.len() / 4,
    }
}

/// Percentage of `source_tokens` saved by using `outline_tokens` instead.
pub fn savings_percent(source_tokens: usize, outline_tokens: usize) -> usize {
    if source_tokens == 0 || outline_tokens >= source_tokens {
        return 0;
    }
    (source_tokens - outline_tokens) * 100 / source_tokens
}
