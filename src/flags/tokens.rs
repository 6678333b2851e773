use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::flags::flag::FeatureFlag;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagCodecError {
    #[error("Trailing token could not be decoded: {remainder:?}")]
    MalformedFlagPayload { remainder: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenSetError {
    #[error("No token assigned to flag {0}")]
    MissingToken(FeatureFlag),
    #[error("Flag {0} assigned more than once")]
    DuplicateFlag(FeatureFlag),
    #[error("Empty token for flag {0}")]
    EmptyToken(FeatureFlag),
    #[error("Token {0:?} contains the payload delimiter '|'")]
    ReservedCharacter(String),
    #[error("Token {0:?} assigned to more than one flag")]
    DuplicateToken(String),
    #[error("Token {prefix:?} is a prefix of token {token:?}")]
    PrefixConflict { prefix: String, token: String },
}

// Sentinel `~` followed by one letter; equal length keeps the set prefix-free.
const REFERENCE_TOKENS: [(FeatureFlag, &str); 8] = [
    (FeatureFlag::CoreAscii, "~a"),
    (FeatureFlag::UnicodeOverlay, "~u"),
    (FeatureFlag::Serialization, "~s"),
    (FeatureFlag::DynamicPacks, "~p"),
    (FeatureFlag::RelationalContext, "~r"),
    (FeatureFlag::ChecksumBlocks, "~c"),
    (FeatureFlag::ToolIntegration, "~m"),
    (FeatureFlag::ReusableKeys, "~k"),
];

/// The per-flag token alphabet of the flag codec.
///
/// Construction guarantees every flag has exactly one token and that no
/// token is a prefix of another, which is what makes greedy left-to-right
/// decoding unambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTokenSet {
    tokens: BTreeMap<FeatureFlag, String>,
    reverse: BTreeMap<String, FeatureFlag>,
}

impl FeatureTokenSet {
    pub fn new<I, S>(pairs: I) -> Result<Self, TokenSetError>
    where
        I: IntoIterator<Item = (FeatureFlag, S)>,
        S: Into<String>,
    {
        let mut tokens: BTreeMap<FeatureFlag, String> = BTreeMap::new();
        let mut reverse: BTreeMap<String, FeatureFlag> = BTreeMap::new();

        for (flag, token) in pairs {
            let token: String = token.into();
            if token.is_empty() {
                return Err(TokenSetError::EmptyToken(flag));
            }
            if token.contains('|') {
                return Err(TokenSetError::ReservedCharacter(token));
            }
            if tokens.contains_key(&flag) {
                return Err(TokenSetError::DuplicateFlag(flag));
            }
            if reverse.contains_key(&token) {
                return Err(TokenSetError::DuplicateToken(token));
            }
            reverse.insert(token.clone(), flag);
            tokens.insert(flag, token);
        }

        if let Some(missing) = FeatureFlag::ALL.iter().find(|f| !tokens.contains_key(*f)) {
            return Err(TokenSetError::MissingToken(*missing));
        }

        // In sorted order a prefix sorts directly before some token that
        // extends it, so checking neighbours covers every pair.
        let sorted: Vec<&String> = reverse.keys().collect();
        for pair in sorted.windows(2) {
            if pair[1].starts_with(pair[0].as_str()) {
                return Err(TokenSetError::PrefixConflict {
                    prefix: pair[0].clone(),
                    token: pair[1].clone(),
                });
            }
        }

        Ok(Self { tokens, reverse })
    }

    /// The `~`-prefixed two-character alphabet.
    pub fn reference() -> Self {
        let tokens: BTreeMap<FeatureFlag, String> = REFERENCE_TOKENS
            .iter()
            .map(|(flag, token)| (*flag, token.to_string()))
            .collect();
        let reverse = tokens
            .iter()
            .map(|(flag, token)| (token.clone(), *flag))
            .collect();
        Self { tokens, reverse }
    }

    pub fn token(&self, flag: FeatureFlag) -> &str {
        // Construction rejects sets that leave a flag without a token.
        self.tokens.get(&flag).map(String::as_str).unwrap_or_default()
    }

    /// Concatenates the tokens of `flags` in ascending enumeration order.
    pub fn encode(&self, flags: &BTreeSet<FeatureFlag>) -> String {
        flags.iter().map(|flag| self.token(*flag)).collect()
    }

    /// Greedy accumulate-and-match decoding.
    pub fn decode(&self, payload: &str) -> Result<BTreeSet<FeatureFlag>, FlagCodecError> {
        let mut flags = BTreeSet::new();
        let mut buffer = String::new();

        for c in payload.chars() {
            buffer.push(c);
            if let Some(flag) = self.reverse.get(&buffer) {
                flags.insert(*flag);
                buffer.clear();
            }
        }

        if !buffer.is_empty() {
            return Err(FlagCodecError::MalformedFlagPayload { remainder: buffer });
        }
        Ok(flags)
    }
}

impl Default for FeatureTokenSet {
    fn default() -> Self {
        Self::reference()
    }
}
