use std::collections::BTreeMap;

use prompt_glyph::compression::{
    ApproxTokenCounter, CompressionReport, PromptCompressor, TokenCounter, WordTokenCounter,
};
use prompt_glyph::distill::PromptDistiller;
use prompt_glyph::encoding::SymbolEncoder;
use prompt_glyph::flags::{FeatureFlag, FeatureFlags};

#[test]
fn scenario_a_savings() {
    let mut ctx = BTreeMap::new();
    ctx.insert("priority".to_string(), "high".to_string());

    let compressor = PromptCompressor::default();
    let output = compressor.compress(
        "Diagnosis: pneumonia. dosage=500mg. Return plan -> taper antibiotics.",
        &ctx,
    );

    assert_eq!(output.encoded.payload, "%&>#|:*/!|+?[$|;<-@");
    assert_eq!(output.report.baseline_tokens, 8);
    assert_eq!(output.report.compressed_tokens, 1);
    assert!((output.report.token_savings_pct - 87.5).abs() < 1e-9);
    assert_eq!(output.distilled.metrics.graph_size, 4);
}

#[test]
fn compressed_never_exceeds_baseline_for_corpus() {
    let flags = FeatureFlags::with_flags([
        FeatureFlag::CoreAscii,
        FeatureFlag::DynamicPacks,
        FeatureFlag::UnicodeOverlay,
        FeatureFlag::Serialization,
    ]);
    let compressor = PromptCompressor::new(
        PromptDistiller::default(),
        SymbolEncoder::with_flags(flags),
        WordTokenCounter,
    );

    for prompt in [
        "Diagnose patient with pneumonia.",
        "Return dosage plan: azithromycin 500mg -> taper.",
    ] {
        let output = compressor.compress(prompt, &BTreeMap::new());
        assert!(output.report.baseline_tokens >= output.report.compressed_tokens);
        assert!(output.report.token_savings_pct >= 0.0);
    }
}

#[test]
fn token_counters() {
    assert_eq!(WordTokenCounter.count_tokens(""), 1);
    assert_eq!(WordTokenCounter.count_tokens("a  b\tc"), 3);
    assert_eq!(ApproxTokenCounter.count_tokens(""), 0);
    assert_eq!(ApproxTokenCounter.count_tokens("abcd"), 1);
    assert_eq!(ApproxTokenCounter.count_tokens("abcde"), 2);
}

#[test]
fn zero_baseline_reports_no_savings() {
    let report = CompressionReport::from_counts(0, 0);
    assert_eq!(report.token_savings_pct, 0.0);

    let report = CompressionReport::measure(&ApproxTokenCounter, "abcdefgh", "ab");
    assert_eq!(report.baseline_tokens, 2);
    assert_eq!(report.compressed_tokens, 1);
    assert!((report.token_savings_pct - 50.0).abs() < 1e-9);
}
