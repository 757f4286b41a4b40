//! Checks on the bundled code page: size, bijection, and the reserved
//! ranges the tokeniser relies on.

use quill_codepage::bundled;
use quill_types::op::{
    ARGUMENT_SYMBOLS, DIGIT_SYMBOLS, EXPONENT_MARKER, GET_VARIABLE_SYMBOLS, SET_VARIABLE_SYMBOLS,
};
use quill_types::{Op, QuillError};

#[test]
fn bundled_table_is_full() {
    let page = bundled();
    assert_eq!(page.len(), 256);
    for i in 0..256 {
        assert!(page.char_at(i).is_ok(), "slot {i} is empty");
    }
    assert_eq!(page.char_at(256), Err(QuillError::InvalidIndex(256)));
}

#[test]
fn index_and_char_are_inverse() {
    let page = bundled();
    for i in 0..256 {
        let ch = page.char_at(i).unwrap();
        assert_eq!(usize::from(page.index_of(ch).unwrap()), i);
    }
}

#[test]
fn printable_ascii_keeps_its_code() {
    let page = bundled();
    for b in 0x20u8..0x7f {
        assert_eq!(page.index_of(char::from(b)).unwrap(), b);
    }
    assert_eq!(page.index_of('\n').unwrap(), 10);
    assert_eq!(page.display_of('\n'), '¶');
}

#[test]
fn subscript_digits_fill_the_first_slots() {
    let page = bundled();
    for (i, ch) in DIGIT_SYMBOLS.iter().enumerate() {
        assert_eq!(usize::from(page.index_of(*ch).unwrap()), i);
    }
}

#[test]
fn reserved_ranges_are_contiguous() {
    let page = bundled();
    for range in [ARGUMENT_SYMBOLS, GET_VARIABLE_SYMBOLS, SET_VARIABLE_SYMBOLS] {
        let start = page.index_of(range[0]).unwrap();
        for (offset, ch) in range.iter().enumerate() {
            assert_eq!(
                usize::from(page.index_of(*ch).unwrap()),
                usize::from(start) + offset,
                "'{ch}' breaks its range"
            );
        }
    }
}

#[test]
fn every_operation_symbol_is_in_the_code_page() {
    let page = bundled();
    assert!(page.exists(EXPONENT_MARKER));
    for i in 0..256 {
        let ch = page.char_at(i).unwrap();
        if let Some(op) = Op::from_symbol(ch) {
            assert!(page.exists(op.symbol()));
        }
    }
    for ch in "αφψ¡¬ṙṘ½→←Σ↑↓π€ÖÐ≠ΦΨ".chars() {
        assert!(page.exists(ch), "'{ch}' missing from the code page");
    }
}

#[test]
fn combinations_resolve() {
    let page = bundled();
    assert_eq!(page.char_from_combination("!=").unwrap(), '≠');
    assert_eq!(page.char_from_combination("e10").unwrap(), EXPONENT_MARKER);
    assert_eq!(page.char_from_combination("^3").unwrap(), '³');
    assert_eq!(page.char_from_combination("V0").unwrap(), '⓿');
    assert!(matches!(
        page.char_from_combination("nope"),
        Err(QuillError::UnknownCombination(_))
    ));
}

#[test]
fn unknown_character_is_reported() {
    assert_eq!(bundled().index_of('☃'), Err(QuillError::UnknownToken('☃')));
    assert!(!bundled().exists('☃'));
}
