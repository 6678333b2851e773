use std::cmp::Reverse;
use std::collections::HashMap;

use crate::types::distilled::DistilledPrompt;

// Canonical keys recur most, literal field values next, one-off surface and
// residual text least.
const CANONICAL_WEIGHT: u32 = 3;
const FIELD_WEIGHT: u32 = 2;
const SURFACE_WEIGHT: u32 = 1;
const RESIDUAL_WEIGHT: u32 = 1;

/// Frequency table over every string that may need a symbol, in
/// first-seen order.
#[derive(Debug, Default)]
pub(crate) struct FrequencyTable<'a> {
    entries: Vec<(&'a str, u32)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> FrequencyTable<'a> {
    pub(crate) fn collect(distilled: &'a DistilledPrompt) -> Self {
        let mut table = Self::default();

        for entry in &distilled.graph {
            for (_, value) in entry.fields() {
                table.bump(value, FIELD_WEIGHT);
            }
        }
        // Graph order, not lexicon key order, so ties keep first-seen order
        for entry in &distilled.graph {
            let canonical = entry.canonical();
            table.bump(canonical, CANONICAL_WEIGHT);
            if let Some(surface) = distilled.lexicon.get(canonical) {
                table.bump(surface, SURFACE_WEIGHT);
            }
        }
        table.bump(&distilled.residual_note, RESIDUAL_WEIGHT);

        table
    }

    fn bump(&mut self, text: &'a str, weight: u32) {
        if text.is_empty() {
            return;
        }
        match self.index.get(text) {
            Some(&slot) => self.entries[slot].1 += weight,
            None => {
                self.index.insert(text, self.entries.len());
                self.entries.push((text, weight));
            }
        }
    }

    /// Strings by descending weight, then ascending length. The sort is
    /// stable, so remaining ties keep first-seen order.
    pub(crate) fn ranked(mut self) -> Vec<&'a str> {
        self.entries
            .sort_by_key(|(text, weight)| (Reverse(*weight), text.chars().count()));
        self.entries.into_iter().map(|(text, _)| text).collect()
    }
}
