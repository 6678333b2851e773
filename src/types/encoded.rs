use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::encoding::decode::{decode_payload, DecodedPayload, PayloadDecodeError};

/// Whether field 0 of a payload is a feature-flag header.
///
/// Nothing in the payload itself says so; both ends must agree out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadLayout {
    WithFlagHeader,
    Bare,
}

/// The output of one encode call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedResult {
    pub payload: String,
    /// symbol -> surface string
    pub dictionary: BTreeMap<String, String>,
    pub feature_header: String,
    pub layout: PayloadLayout,
}

impl EncodedResult {
    /// The `|`-delimited stream elements.
    pub fn fields(&self) -> Vec<&str> {
        if self.payload.is_empty() && self.layout == PayloadLayout::Bare {
            return Vec::new();
        }
        self.payload.split('|').collect()
    }

    /// Reverse lookup: the symbol assigned to `surface` in this call.
    pub fn symbol_for(&self, surface: &str) -> Option<&str> {
        self.dictionary
            .iter()
            .find(|(_, value)| value.as_str() == surface)
            .map(|(symbol, _)| symbol.as_str())
    }

    /// Content hash of the dictionary.
    ///
    /// The dictionary is exchanged once per session; comparing fingerprints
    /// tells both ends they can invert each other's payloads.
    pub fn fingerprint(&self) -> DictionaryFingerprint {
        DictionaryFingerprint::from_dictionary(&self.dictionary)
    }

    /// Inverts the payload back into surface strings, one record per fact.
    pub fn decode(&self) -> Result<DecodedPayload, PayloadDecodeError> {
        decode_payload(&self.payload, &self.dictionary, self.layout)
    }
}

/// `sha256:<hex>` digest over the sorted dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DictionaryFingerprint(String);

impl DictionaryFingerprint {
    pub fn from_dictionary(dictionary: &BTreeMap<String, String>) -> Self {
        let mut hasher = Sha256::new();
        for (symbol, surface) in dictionary {
            // Length-prefixed so ("ab", "c") and ("a", "bc") differ.
            hasher.update((symbol.len() as u64).to_be_bytes());
            hasher.update(symbol.as_bytes());
            hasher.update((surface.len() as u64).to_be_bytes());
            hasher.update(surface.as_bytes());
        }

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        DictionaryFingerprint(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
