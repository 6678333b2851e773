//! Symbol encoding: a fact graph to a `|`-delimited symbol stream.

pub mod decode;
mod ranking;
pub mod symbol_table;

use crate::flags::FeatureFlags;
use crate::types::distilled::DistilledPrompt;
use crate::types::encoded::{EncodedResult, PayloadLayout};
pub use decode::{decode_payload, DecodedPayload, PayloadDecodeError};
use ranking::FrequencyTable;
pub use symbol_table::{SymbolTable, FALLBACK_PREFIX, SYMBOL_POOL};

/// Builds a compact symbol stream from a distilled prompt.
///
/// High-value strings get single-character pool symbols; once the pool
/// runs out, `~N` fallback symbols are used instead. The encoder keeps no
/// state between calls: every `encode` starts from a fresh [`SymbolTable`].
#[derive(Debug, Clone, Default)]
pub struct SymbolEncoder {
    feature_flags: Option<FeatureFlags>,
}

impl SymbolEncoder {
    pub fn new(feature_flags: Option<FeatureFlags>) -> Self {
        Self { feature_flags }
    }

    /// An encoder that writes `flags` as the payload header.
    pub fn with_flags(flags: FeatureFlags) -> Self {
        Self::new(Some(flags))
    }

    pub fn feature_flags(&self) -> Option<&FeatureFlags> {
        self.feature_flags.as_ref()
    }

    pub fn encode(&self, distilled: &DistilledPrompt) -> EncodedResult {
        let mut table = SymbolTable::new();

        // 1. Weight-ranked batch
        for text in FrequencyTable::collect(distilled).ranked() {
            table.intern(text);
        }

        // 2. One stream element per fact, then the residual note
        let mut stream: Vec<String> = distilled
            .graph
            .iter()
            .map(|entry| {
                entry
                    .wire_values()
                    .map(|value| table.intern(value).to_string())
                    .collect::<String>()
            })
            .filter(|element| !element.is_empty())
            .collect();

        if !distilled.residual_note.is_empty() {
            stream.push(table.intern(&distilled.residual_note).to_string());
        }

        // 3. Optional header occupies slot 0
        let (feature_header, layout) = match &self.feature_flags {
            Some(flags) => {
                let header = flags.as_payload();
                stream.insert(0, header.clone());
                (header, PayloadLayout::WithFlagHeader)
            }
            None => (String::new(), PayloadLayout::Bare),
        };

        tracing::debug!(
            facts = distilled.graph.len(),
            symbols = table.len(),
            pool_exhausted = table.is_pool_exhausted(),
            "encoded prompt"
        );

        EncodedResult {
            payload: stream.join("|"),
            dictionary: table.into_dictionary(),
            feature_header,
            layout,
        }
    }
}
