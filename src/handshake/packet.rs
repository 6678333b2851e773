use std::collections::BTreeMap;

pub(crate) const VERSION_FIELD: &str = "v";
pub(crate) const TOKENIZER_FIELD: &str = "tok";
pub(crate) const FEATURES_FIELD: &str = "feat";
pub(crate) const NONCE_FIELD: &str = "nonce";
pub(crate) const PUBLIC_KEY_FIELD: &str = "pub";

/// Joins `name=value` pairs with `|`.
pub(crate) fn join_fields(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Splits a packet into its fields. Values are split on the first `=`
/// only; segments without `=` are skipped and a repeated name keeps its
/// last value.
pub(crate) fn split_fields(packet: &str) -> BTreeMap<&str, &str> {
    packet
        .split('|')
        .filter_map(|part| part.split_once('='))
        .collect()
}
