//! Reference vocabulary shipped with the crate.

pub(crate) const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "to", "for", "of", "with", "please", "ensure", "make", "that",
];

pub(crate) const SYNONYMS: &[(&str, &str)] = &[
    ("dosage", "dose"),
    ("medication", "med"),
    ("meds", "med"),
    ("diagnosis", "diag"),
    ("diagnose", "diag"),
    ("patient", "pt"),
    ("temperature", "temp"),
    ("pressure", "bp"),
    ("analysis", "analyze"),
    ("analyse", "analyze"),
];
