//! Deterministic prompt distillation and symbolic encoding.
//!
//! `prompt-glyph` turns free-form prompts into a de-duplicated fact graph,
//! then into a compact `|`-delimited symbol stream plus the dictionary that
//! inverts it. A small feature-flag codec produces the optional payload
//! header and the flag field of session handshakes.
//!
//! All core operations are pure: identical inputs always produce identical
//! outputs, byte-for-byte.

pub mod compression;
pub mod distill;
pub mod encoding;
pub mod flags;
pub mod handshake;
pub mod types;
pub mod vocabulary;
