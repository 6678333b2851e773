use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocabulary::Vocabulary;

static ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+").expect("valid regex"));

/// Turns free text into a canonical key.
///
/// Normalization rules:
/// - Lowercase
/// - Keep ASCII alphanumeric runs only
/// - Rewrite each run through the synonym table
/// - Drop stop words (after rewriting)
/// - Join survivors with a single space
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> Canonicalizer<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn canonicalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = ALNUM_RUN
            .find_iter(&lowered)
            .filter_map(|m| self.vocabulary.normalize_token(m.as_str()))
            .collect();
        tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_rewrites_synonyms() {
        let vocabulary = Vocabulary::v0();
        let canon = Canonicalizer::new(&vocabulary);
        assert_eq!(canon.canonicalize("Diagnosis: Pneumonia!"), "diag pneumonia");
        assert_eq!(canon.canonicalize("  the  and or "), "");
        assert_eq!(canon.canonicalize(""), "");
    }

    #[test]
    fn non_ascii_letters_split_runs() {
        let vocabulary = Vocabulary::empty();
        let canon = Canonicalizer::new(&vocabulary);
        assert_eq!(canon.canonicalize("café au lait"), "caf au lait");
    }
}
