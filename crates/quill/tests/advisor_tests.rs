//! Every spelling the advisor proposes must evaluate back to its number.

use quill::{advise, code_page, run, EncodingKind, RunConfig, Value};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn assert_round_trips(n: u64) {
    for encoding in advise(n, code_page()) {
        let outcome = run(&encoding.text, vec![], &RunConfig::default());
        assert_eq!(
            outcome.results,
            vec![Value::number(n as f64)],
            "{:?} spelling {:?} of {n} evaluated to {:?} (error {:?})",
            encoding.kind,
            encoding.text,
            outcome.results,
            outcome.error
        );
        assert_eq!(encoding.length, encoding.text.chars().count());
    }
}

fn kinds(n: u64) -> Vec<EncodingKind> {
    advise(n, code_page()).into_iter().map(|e| e.kind).collect()
}

// ─────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_every_single_code_point_round_trips() {
    for n in 0..256 {
        assert_round_trips(n);
    }
}

#[test]
fn test_double_code_point_sample_round_trips() {
    for n in (256..65536).step_by(97) {
        assert_round_trips(n);
    }
    for n in [256, 257, 8704, 23552, 65279, 65535] {
        assert_round_trips(n);
    }
}

#[test]
fn test_large_numbers_round_trip() {
    for n in [65536, 254 * 254, 1_000_000, 123_456_789, 40_000_000_000] {
        assert_round_trips(n);
    }
}

// ─────────────────────────────────────────────────────────────────────
// Applicability
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_which_encodings_apply() {
    assert_eq!(
        kinds(300),
        vec![
            EncodingKind::Plain,
            EncodingKind::DoubleCodePoint,
            EncodingKind::Compressed,
            EncodingKind::Exponent
        ]
    );
    assert_eq!(
        kinds(70000),
        vec![EncodingKind::Plain, EncodingKind::Compressed, EncodingKind::Exponent]
    );
}
