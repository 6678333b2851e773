//! Distillation: raw prompt text to a de-duplicated fact graph.

pub mod canonical;
mod segment;

use std::collections::{BTreeMap, BTreeSet};

use crate::types::distilled::{DistillMetrics, DistilledPrompt};
use crate::types::fact::FactEntry;
use crate::vocabulary::Vocabulary;
pub use canonical::Canonicalizer;
use segment::Shape;

/// Strips redundant phrasing from a prompt while keeping its facts.
///
/// Distillation is total: every input, including the empty string, yields a
/// valid result. The distiller holds no per-call state.
#[derive(Debug, Clone, Default)]
pub struct PromptDistiller {
    vocabulary: Vocabulary,
}

impl PromptDistiller {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn canonicalizer(&self) -> Canonicalizer<'_> {
        Canonicalizer::new(&self.vocabulary)
    }

    pub fn canonicalize(&self, text: &str) -> String {
        self.canonicalizer().canonicalize(text)
    }

    /// Distills text with no side context.
    pub fn distill_text(&self, raw_prompt: &str) -> DistilledPrompt {
        self.distill(raw_prompt, std::iter::empty::<(&str, &str)>())
    }

    /// Context entries are appended in the order `context` yields them, so
    /// pass a `Vec` of pairs to keep caller order or a `&BTreeMap` for
    /// name order.
    pub fn distill<I, K, V>(&self, raw_prompt: &str, context: I) -> DistilledPrompt
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let canon = self.canonicalizer();
        let cleaned = segment::collapse_whitespace(raw_prompt);
        let segments = segment::split_segments(&cleaned);

        let mut graph = Vec::new();
        let mut residual_parts: Vec<&str> = Vec::new();
        let mut lexicon: BTreeMap<String, String> = BTreeMap::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        let mut analyzed = 0;
        let mut deduplicated = 0;

        // 1. Text fragments, first occurrence wins
        for fragment in segments.iter().copied() {
            analyzed += 1;
            let entry = fact_from_segment(&canon, fragment);
            let canonical = entry.canonical();
            if canonical.is_empty() {
                residual_parts.push(fragment);
                continue;
            }
            if seen.contains(canonical) {
                tracing::trace!(canonical = %canonical, "dropping duplicate fragment");
                deduplicated += 1;
                continue;
            }
            seen.insert(canonical.to_string());
            lexicon.insert(canonical.to_string(), fragment.to_string());
            graph.push(entry);
        }

        // 2. Context entries, appended after text-derived facts
        for (name, value) in context {
            let (name, value) = (name.as_ref(), value.as_ref());
            let surface = format!("{name}:{value}");
            let canonical = canon.canonicalize(&surface);
            if seen.contains(&canonical) {
                tracing::trace!(canonical = %canonical, "dropping duplicate context entry");
                deduplicated += 1;
                continue;
            }
            seen.insert(canonical.clone());
            lexicon.insert(canonical.clone(), surface);
            graph.push(FactEntry::Context {
                key: canon.canonicalize(name),
                value: value.trim().to_string(),
                canonical,
            });
        }

        let metrics = DistillMetrics {
            segments_analyzed: analyzed,
            segments_deduplicated: deduplicated,
            graph_size: graph.len(),
            residual_segments: residual_parts.len(),
        };

        tracing::debug!(
            analyzed = metrics.segments_analyzed,
            deduplicated = metrics.segments_deduplicated,
            graph_size = metrics.graph_size,
            residual = metrics.residual_segments,
            "distilled prompt"
        );

        debug_assert_eq!(seen.len(), graph.len());

        DistilledPrompt {
            graph,
            residual_note: residual_parts.join(". "),
            lexicon,
            metrics,
        }
    }
}

fn fact_from_segment(canon: &Canonicalizer<'_>, fragment: &str) -> FactEntry {
    match segment::classify(fragment) {
        Shape::KeyValue(left, right) => FactEntry::Kv {
            key: canon.canonicalize(left),
            value: right.trim().to_string(),
            canonical: canon.canonicalize(&format!("{left}:{right}")),
        },
        Shape::Flow(left, right) => {
            let (left, right) = (left.trim(), right.trim());
            FactEntry::Flow {
                source: canon.canonicalize(left),
                target: canon.canonicalize(right),
                canonical: canon.canonicalize(&format!("{left}->{right}")),
            }
        }
        Shape::Assign(left, right) => {
            let (left, right) = (left.trim(), right.trim());
            FactEntry::Assign {
                lhs: canon.canonicalize(left),
                rhs: right.to_string(),
                canonical: canon.canonicalize(&format!("{left}={right}")),
            }
        }
        Shape::MarkedStatement | Shape::Statement => FactEntry::Statement {
            value: fragment.trim().to_string(),
            canonical: canon.canonicalize(fragment),
        },
    }
}
