//! Integration tests for CLDR plural classification.

use weft::{AttrId, Classifier};

// =============================================================================
// Cardinal Categories
// =============================================================================

#[test]
fn english_cardinals() {
    let classifier = Classifier::new("en");
    assert_eq!(classifier.cardinal(1), AttrId::ONE);
    assert_eq!(classifier.cardinal(0), AttrId::OTHER);
    assert_eq!(classifier.cardinal(2), AttrId::OTHER);
    assert_eq!(classifier.cardinal(100), AttrId::OTHER);
}

#[test]
fn russian_cardinals() {
    let classifier = Classifier::new("ru");
    assert_eq!(classifier.cardinal(1), AttrId::ONE);
    assert_eq!(classifier.cardinal(2), AttrId::FEW);
    assert_eq!(classifier.cardinal(5), AttrId::MANY);
    assert_eq!(classifier.cardinal(11), AttrId::MANY);
    assert_eq!(classifier.cardinal(21), AttrId::ONE);
    assert_eq!(classifier.cardinal(22), AttrId::FEW);
}

#[test]
fn arabic_cardinals() {
    let classifier = Classifier::new("ar");
    assert_eq!(classifier.cardinal(0), AttrId::ZERO);
    assert_eq!(classifier.cardinal(1), AttrId::ONE);
    assert_eq!(classifier.cardinal(2), AttrId::TWO);
    assert_eq!(classifier.cardinal(3), AttrId::FEW);
    assert_eq!(classifier.cardinal(11), AttrId::MANY);
    assert_eq!(classifier.cardinal(100), AttrId::OTHER);
}

#[test]
fn japanese_has_a_single_category() {
    let classifier = Classifier::new("ja");
    assert_eq!(classifier.cardinal(1), AttrId::OTHER);
    assert_eq!(classifier.cardinal(2), AttrId::OTHER);
}

// =============================================================================
// Ordinal Categories
// =============================================================================

#[test]
fn english_ordinals() {
    let classifier = Classifier::new("en");
    assert_eq!(classifier.ordinal(1), AttrId::ORD_ONE);
    assert_eq!(classifier.ordinal(2), AttrId::ORD_TWO);
    assert_eq!(classifier.ordinal(3), AttrId::ORD_FEW);
    assert_eq!(classifier.ordinal(4), AttrId::ORD_OTHER);
    assert_eq!(classifier.ordinal(11), AttrId::ORD_OTHER);
    assert_eq!(classifier.ordinal(21), AttrId::ORD_ONE);
}

// =============================================================================
// Language Normalization
// =============================================================================

#[test]
fn unsupported_language_falls_back_to_english() {
    let classifier = Classifier::new("xx");
    assert_eq!(classifier.language(), "en");
    assert_eq!(classifier.cardinal(1), AttrId::ONE);
}

#[test]
fn region_subtags_are_stripped() {
    let classifier = Classifier::new("pt-BR");
    assert_eq!(classifier.language(), "pt");
}

#[test]
fn language_codes_are_case_insensitive() {
    let classifier = Classifier::new("DE");
    assert_eq!(classifier.language(), "de");
}
