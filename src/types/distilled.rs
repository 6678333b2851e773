use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::fact::FactEntry;

/// Counters describing one distillation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistillMetrics {
    pub segments_analyzed: usize,
    pub segments_deduplicated: usize,
    pub graph_size: usize,
    pub residual_segments: usize,
}

/// The aggregate result of one distillation call.
///
/// `graph` is in first-occurrence order, context-derived entries last.
/// `lexicon` maps canonical key to the surface text it was extracted from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistilledPrompt {
    pub graph: Vec<FactEntry>,
    pub residual_note: String,
    pub lexicon: BTreeMap<String, String>,
    pub metrics: DistillMetrics,
}

impl DistilledPrompt {
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty() && self.residual_note.is_empty()
    }

    /// Canonical keys of the fact graph, in graph order.
    pub fn canonical_keys(&self) -> impl Iterator<Item = &str> {
        self.graph.iter().map(FactEntry::canonical)
    }

    /// True when no two entries share a canonical key.
    pub fn has_unique_canonicals(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.canonical_keys().all(|key| seen.insert(key))
    }
}
