use serde::{Deserialize, Serialize};

/// The classification a fragment received during distillation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    Kv,
    Flow,
    Assign,
    Statement,
    Context,
}

impl FactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactKind::Kv => "kv",
            FactKind::Flow => "flow",
            FactKind::Assign => "assign",
            FactKind::Statement => "statement",
            FactKind::Context => "context",
        }
    }
}

/// Field names in wire order. Every encoded record lists its non-empty
/// fields in exactly this order.
pub const FIELD_ORDER: [&str; 8] = [
    "type",
    "key",
    "value",
    "source",
    "target",
    "lhs",
    "rhs",
    "canonical",
];

/// One classified, canonicalized unit extracted from input text or context.
///
/// Serializes as an internally tagged record: `{"type": "kv", "key": ..}`.
/// Entries are immutable once distillation returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FactEntry {
    Kv {
        key: String,
        value: String,
        canonical: String,
    },
    Flow {
        source: String,
        target: String,
        canonical: String,
    },
    Assign {
        lhs: String,
        rhs: String,
        canonical: String,
    },
    Statement {
        value: String,
        canonical: String,
    },
    Context {
        key: String,
        value: String,
        canonical: String,
    },
}

impl FactEntry {
    pub fn kind(&self) -> FactKind {
        match self {
            FactEntry::Kv { .. } => FactKind::Kv,
            FactEntry::Flow { .. } => FactKind::Flow,
            FactEntry::Assign { .. } => FactKind::Assign,
            FactEntry::Statement { .. } => FactKind::Statement,
            FactEntry::Context { .. } => FactKind::Context,
        }
    }

    /// The de-duplication key of this entry.
    pub fn canonical(&self) -> &str {
        match self {
            FactEntry::Kv { canonical, .. }
            | FactEntry::Flow { canonical, .. }
            | FactEntry::Assign { canonical, .. }
            | FactEntry::Statement { canonical, .. }
            | FactEntry::Context { canonical, .. } => canonical,
        }
    }

    /// All fields of the entry as `(name, value)` pairs in [`FIELD_ORDER`],
    /// including the `type` tag. Empty values are kept; callers filter.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let tag = ("type", self.kind().as_str());
        match self {
            FactEntry::Kv {
                key,
                value,
                canonical,
            }
            | FactEntry::Context {
                key,
                value,
                canonical,
            } => vec![
                tag,
                ("key", key.as_str()),
                ("value", value.as_str()),
                ("canonical", canonical.as_str()),
            ],
            FactEntry::Flow {
                source,
                target,
                canonical,
            } => vec![
                tag,
                ("source", source.as_str()),
                ("target", target.as_str()),
                ("canonical", canonical.as_str()),
            ],
            FactEntry::Assign {
                lhs,
                rhs,
                canonical,
            } => vec![
                tag,
                ("lhs", lhs.as_str()),
                ("rhs", rhs.as_str()),
                ("canonical", canonical.as_str()),
            ],
            FactEntry::Statement { value, canonical } => vec![
                tag,
                ("value", value.as_str()),
                ("canonical", canonical.as_str()),
            ],
        }
    }

    /// Non-empty field values in wire order.
    pub fn wire_values(&self) -> impl Iterator<Item = &str> {
        self.fields()
            .into_iter()
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
    }
}
