pub mod distilled;
pub mod encoded;
pub mod fact;

pub use distilled::{DistillMetrics, DistilledPrompt};
pub use encoded::{DictionaryFingerprint, EncodedResult, PayloadLayout};
pub use fact::{FactEntry, FactKind, FIELD_ORDER};
