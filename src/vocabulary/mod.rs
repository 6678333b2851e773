//! Synonym and stop-word tables used by canonicalization.
//!
//! A [`Vocabulary`] is plain data: it is built once, validated, and handed to
//! the distiller. Swapping vocabularies never touches distillation logic.

mod tables;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Term is not a lowercase alphanumeric token: {0:?}")]
    InvalidTerm(String),
    #[error("Synonym target {target:?} of {source_term:?} is rewritten again by the vocabulary")]
    NonIdempotentSynonym { source_term: String, target: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub synonyms: BTreeMap<String, String>,
    pub stop_words: BTreeSet<String>,
}

impl Vocabulary {
    /// The reference clinical vocabulary.
    pub fn v0() -> Self {
        Self {
            synonyms: tables::SYNONYMS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            stop_words: tables::STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// A vocabulary that rewrites and drops nothing.
    pub fn empty() -> Self {
        Self {
            synonyms: BTreeMap::new(),
            stop_words: BTreeSet::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary = serde_json::from_str(json)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, VocabularyError> {
        let f = std::fs::File::open(path)?;
        let vocabulary: Vocabulary = serde_json::from_reader(f)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Checks the tables can be applied by canonicalization without
    /// breaking idempotence.
    ///
    /// Terms must be the exact shape canonicalization produces (lowercase
    /// ASCII alphanumeric runs), and a synonym target may be neither another
    /// synonym's source nor a stop word.
    pub fn validate(&self) -> Result<(), VocabularyError> {
        let terms = self
            .synonyms
            .iter()
            .flat_map(|(from, to)| [from, to])
            .chain(self.stop_words.iter());
        for term in terms {
            if !is_canonical_token(term) {
                tracing::warn!(term = %term, "rejecting vocabulary term");
                return Err(VocabularyError::InvalidTerm(term.clone()));
            }
        }

        for (from, to) in &self.synonyms {
            if from != to && (self.synonyms.contains_key(to) || self.stop_words.contains(to)) {
                tracing::warn!(source = %from, target = %to, "rejecting non-idempotent synonym");
                return Err(VocabularyError::NonIdempotentSynonym {
                    source_term: from.clone(),
                    target: to.clone(),
                });
            }
        }
        Ok(())
    }

    /// Maps one token through the synonym table; `None` when it is dropped.
    pub fn normalize_token<'a>(&'a self, token: &'a str) -> Option<&'a str> {
        let token = self.synonyms.get(token).map(String::as_str).unwrap_or(token);
        if self.stop_words.contains(token) {
            None
        } else {
            Some(token)
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::v0()
    }
}

fn is_canonical_token(term: &str) -> bool {
    !term.is_empty()
        && term
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
