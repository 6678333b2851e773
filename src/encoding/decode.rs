use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::symbol_table::FALLBACK_PREFIX;
use crate::types::encoded::PayloadLayout;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadDecodeError {
    #[error("Unknown symbol {symbol:?} in payload field {field}")]
    UnknownSymbol { symbol: String, field: usize },
    #[error("Payload field {field} splits into symbols more than one way: {text:?}")]
    AmbiguousSymbols { text: String, field: usize },
}

#[derive(Debug, PartialEq, Eq)]
enum SplitError {
    Unknown(String),
    Ambiguous,
}

/// A payload expanded back into surface strings.
///
/// Each record holds the non-empty field values of one fact in wire order
/// (or the residual note as a one-element record). Field names are not
/// recoverable from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedPayload {
    pub feature_header: Option<String>,
    pub records: Vec<Vec<String>>,
}

pub fn decode_payload(
    payload: &str,
    dictionary: &BTreeMap<String, String>,
    layout: PayloadLayout,
) -> Result<DecodedPayload, PayloadDecodeError> {
    let mut fields: Vec<&str> = if payload.is_empty() && layout == PayloadLayout::Bare {
        Vec::new()
    } else {
        payload.split('|').collect()
    };

    let feature_header = match layout {
        PayloadLayout::WithFlagHeader => Some(fields.remove(0).to_string()),
        PayloadLayout::Bare => None,
    };
    let offset = usize::from(feature_header.is_some());

    let mut records: Vec<Vec<String>> = Vec::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        let symbols = split_symbols(field, dictionary).map_err(|err| match err {
            SplitError::Unknown(symbol) => PayloadDecodeError::UnknownSymbol {
                symbol,
                field: i + offset,
            },
            SplitError::Ambiguous => PayloadDecodeError::AmbiguousSymbols {
                text: field.to_string(),
                field: i + offset,
            },
        })?;
        records.push(
            symbols
                .into_iter()
                .map(|symbol| dictionary[symbol].clone())
                .collect(),
        );
    }

    Ok(DecodedPayload {
        feature_header,
        records,
    })
}

/// Splits a concatenation of symbols. Pool symbols are one character;
/// fallback symbols are `~` plus digits. A field must split into known
/// symbols in exactly one way: `~85` followed by pool symbol `3` reads the
/// same as `~853`, and that field is rejected rather than guessed.
fn split_symbols<'p>(
    field: &'p str,
    dictionary: &BTreeMap<String, String>,
) -> Result<Vec<&'p str>, SplitError> {
    // parses[i]: number of complete splits of field[i..], capped at 2
    let mut parses = vec![0u8; field.len() + 1];
    parses[field.len()] = 1;
    for (i, _) in field.char_indices().rev() {
        let count = candidates(&field[i..], dictionary)
            .into_iter()
            .fold(0u8, |acc, len| acc.saturating_add(parses[i + len]));
        parses[i] = count.min(2);
    }

    match parses[0] {
        0 => return Err(SplitError::Unknown(first_unknown(field, dictionary))),
        1 => {}
        _ => return Err(SplitError::Ambiguous),
    }

    let mut symbols = Vec::new();
    let mut at = 0;
    while at < field.len() {
        let len = candidates(&field[at..], dictionary)
            .into_iter()
            .find(|len| parses[at + len] > 0)
            .ok_or_else(|| SplitError::Unknown(field[at..].to_string()))?;
        symbols.push(&field[at..at + len]);
        at += len;
    }

    Ok(symbols)
}

/// Byte lengths of the dictionary symbols `rest` can start with.
fn candidates(rest: &str, dictionary: &BTreeMap<String, String>) -> Vec<usize> {
    let Some(c) = rest.chars().next() else {
        return Vec::new();
    };
    if c == FALLBACK_PREFIX {
        let digits = rest[1..].bytes().take_while(u8::is_ascii_digit).count();
        (2..=digits + 1)
            .filter(|end| dictionary.contains_key(&rest[..*end]))
            .collect()
    } else {
        let len = c.len_utf8();
        if dictionary.contains_key(&rest[..len]) {
            vec![len]
        } else {
            Vec::new()
        }
    }
}

/// The text a longest-match scan stops at, for error reporting.
fn first_unknown(field: &str, dictionary: &BTreeMap<String, String>) -> String {
    let mut rest = field;
    while let Some(c) = rest.chars().next() {
        match candidates(rest, dictionary).into_iter().max() {
            Some(len) => rest = &rest[len..],
            None if c == FALLBACK_PREFIX => {
                let digits = rest[1..].bytes().take_while(u8::is_ascii_digit).count();
                return rest[..digits + 1].to_string();
            }
            None => return rest[..c.len_utf8()].to_string(),
        }
    }
    field.to_string()
}
