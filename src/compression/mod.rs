pub mod savings;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::distill::PromptDistiller;
use crate::encoding::SymbolEncoder;
use crate::types::{DistilledPrompt, EncodedResult};
pub use savings::{ApproxTokenCounter, CompressionReport, TokenCounter, WordTokenCounter};

/// Everything one compression produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionOutput {
    pub distilled: DistilledPrompt,
    pub encoded: EncodedResult,
    pub report: CompressionReport,
}

/// Distill, encode, and measure in one call.
pub struct PromptCompressor<C> {
    distiller: PromptDistiller,
    encoder: SymbolEncoder,
    counter: C,
}

impl Default for PromptCompressor<WordTokenCounter> {
    fn default() -> Self {
        Self {
            distiller: PromptDistiller::default(),
            encoder: SymbolEncoder::default(),
            counter: WordTokenCounter,
        }
    }
}

impl<C> PromptCompressor<C>
where
    C: TokenCounter,
{
    pub fn new(distiller: PromptDistiller, encoder: SymbolEncoder, counter: C) -> Self {
        Self {
            distiller,
            encoder,
            counter,
        }
    }

    pub fn compress(&self, raw_prompt: &str, context: &BTreeMap<String, String>) -> CompressionOutput {
        let distilled = self.distiller.distill(raw_prompt, context);
        let encoded = self.encoder.encode(&distilled);
        let report = CompressionReport::measure(&self.counter, raw_prompt, &encoded.payload);

        CompressionOutput {
            distilled,
            encoded,
            report,
        }
    }
}
