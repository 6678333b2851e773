use serde::{Deserialize, Serialize};

pub trait TokenCounter {
    fn count_tokens(&self, content: &str) -> usize;
}

/// Whitespace word count, never below one.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenCounter;

impl TokenCounter for WordTokenCounter {
    fn count_tokens(&self, content: &str) -> usize {
        content.split_whitespace().count().max(1)
    }
}

/// Byte-length estimate at four bytes per token, rounded up.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApproxTokenCounter;

impl TokenCounter for ApproxTokenCounter {
    fn count_tokens(&self, content: &str) -> usize {
        content.len().div_ceil(4)
    }
}

/// Token cost of a prompt before and after compression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionReport {
    pub baseline_tokens: usize,
    pub compressed_tokens: usize,
    pub token_savings_pct: f64,
}

impl CompressionReport {
    pub fn measure<C: TokenCounter + ?Sized>(counter: &C, raw: &str, payload: &str) -> Self {
        Self::from_counts(counter.count_tokens(raw), counter.count_tokens(payload))
    }

    pub fn from_counts(baseline_tokens: usize, compressed_tokens: usize) -> Self {
        let token_savings_pct = if baseline_tokens == 0 {
            0.0
        } else {
            100.0 * (1.0 - compressed_tokens as f64 / baseline_tokens as f64)
        };
        Self {
            baseline_tokens,
            compressed_tokens,
            token_savings_pct,
        }
    }
}
