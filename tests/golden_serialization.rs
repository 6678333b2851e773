use std::collections::BTreeMap;

use prompt_glyph::distill::PromptDistiller;
use prompt_glyph::encoding::SymbolEncoder;
use prompt_glyph::flags::{FeatureFlag, FeatureFlags};
use prompt_glyph::types::{DistilledPrompt, EncodedResult, FactEntry};
use serde_json::Value;

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn scenario_a() -> DistilledPrompt {
    let mut ctx = BTreeMap::new();
    ctx.insert("priority".to_string(), "high".to_string());
    PromptDistiller::default().distill(
        "Diagnosis: pneumonia. dosage=500mg. Return plan -> taper antibiotics.",
        &ctx,
    )
}

#[test]
fn golden_fact_entry_shape() {
    let entry = FactEntry::Assign {
        lhs: "dose".into(),
        rhs: "500mg".into(),
        canonical: "dose 500mg".into(),
    };

    let json_str = serde_json::to_string(&entry).unwrap();
    assert_eq!(
        json_str,
        r#"{"type":"assign","lhs":"dose","rhs":"500mg","canonical":"dose 500mg"}"#
    );

    let parsed: FactEntry = serde_json::from_str(&json_str).unwrap();
    assert_eq!(parsed, entry);
}

#[test]
fn golden_distilled_prompt_serialization() {
    let distilled = scenario_a();
    let json_str = serde_json::to_string_pretty(&distilled).unwrap();

    // "graph" -> "residual_note" -> "lexicon" -> "metrics"
    let graph_pos = json_str.find("\"graph\":").unwrap();
    let residual_pos = json_str.find("\"residual_note\":").unwrap();
    let lexicon_pos = json_str.find("\"lexicon\":").unwrap();
    let metrics_pos = json_str.find("\"metrics\":").unwrap();
    assert!(graph_pos < residual_pos);
    assert!(residual_pos < lexicon_pos);
    assert!(lexicon_pos < metrics_pos);

    const EXPECTED_JSON: &str = r#"{
      "graph": [
        { "type": "kv", "key": "diag", "value": "pneumonia", "canonical": "diag pneumonia" },
        { "type": "assign", "lhs": "dose", "rhs": "500mg", "canonical": "dose 500mg" },
        {
          "type": "flow",
          "source": "return plan",
          "target": "taper antibiotics",
          "canonical": "return plan taper antibiotics"
        },
        { "type": "context", "key": "priority", "value": "high", "canonical": "priority high" }
      ],
      "residual_note": "",
      "lexicon": {
        "diag pneumonia": "Diagnosis: pneumonia",
        "dose 500mg": "dosage=500mg",
        "priority high": "priority:high",
        "return plan taper antibiotics": "Return plan -> taper antibiotics"
      },
      "metrics": {
        "segments_analyzed": 3,
        "segments_deduplicated": 0,
        "graph_size": 4,
        "residual_segments": 0
      }
    }"#;

    assert_eq!(
        strip_whitespace(&json_str),
        strip_whitespace(EXPECTED_JSON),
        "JSON structure mismatch against golden snapshot"
    );

    let roundtrip: DistilledPrompt = serde_json::from_str(&json_str).unwrap();
    assert_eq!(roundtrip, distilled);
}

#[test]
fn golden_encoded_result_serialization() {
    let flags = FeatureFlags::with_flags([FeatureFlag::CoreAscii, FeatureFlag::DynamicPacks]);
    let encoded = SymbolEncoder::with_flags(flags).encode(&scenario_a());
    let json_str = serde_json::to_string(&encoded).unwrap();

    let payload_pos = json_str.find("\"payload\":").unwrap();
    let dict_pos = json_str.find("\"dictionary\":").unwrap();
    let header_pos = json_str.find("\"feature_header\":").unwrap();
    let layout_pos = json_str.find("\"layout\":").unwrap();
    assert!(payload_pos < dict_pos);
    assert!(dict_pos < header_pos);
    assert!(header_pos < layout_pos);

    let value: Value = serde_json::from_str(&json_str).unwrap();
    assert_eq!(value["payload"], "~a~p|%&>#|:*/!|+?[$|;<-@");
    assert_eq!(value["feature_header"], "~a~p");
    assert_eq!(value["layout"], "with_flag_header");
    assert_eq!(value["dictionary"]["!"], "dose 500mg");
    assert_eq!(value["dictionary"]["A"], "Return plan -> taper antibiotics");

    let roundtrip: EncodedResult = serde_json::from_str(&json_str).unwrap();
    assert_eq!(roundtrip, encoded);
    assert_eq!(roundtrip.fingerprint(), encoded.fingerprint());
}
