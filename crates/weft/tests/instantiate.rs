//! Integration tests for entry instantiation: group selection, parameter
//! splicing, and marker offset arithmetic.

use weft::{
    AttrId, EvalError, FormatMarker, FormatPayload, Locale, NoMatchPolicy, StyleTag, args,
};

fn english(source: &str) -> Locale {
    let mut locale = Locale::builder().language("en").build();
    locale.load_source(source).unwrap();
    locale
}

// =============================================================================
// Plural Selection
// =============================================================================

#[test]
fn cardinal_match_selects_by_count() {
    let locale = english(r"cards { \match{1.one}{\1 card}{}{\1 cards} }");
    assert_eq!(locale.instantiate("cards", &args![1]).unwrap().text, "1 card");
    assert_eq!(locale.instantiate("cards", &args![3]).unwrap().text, "3 cards");
    assert_eq!(locale.instantiate("cards", &args![0]).unwrap().text, "0 cards");
}

#[test]
fn ordinal_match_selects_suffixes() {
    let locale = english(
        r"place { \match{1.ord_one}{\1st}{1.ord_two}{\1nd}{1.ord_few}{\1rd}{}{\1th} }",
    );
    assert_eq!(locale.instantiate("place", &args![1]).unwrap().text, "1st");
    assert_eq!(locale.instantiate("place", &args![2]).unwrap().text, "2nd");
    assert_eq!(locale.instantiate("place", &args![3]).unwrap().text, "3rd");
    assert_eq!(locale.instantiate("place", &args![4]).unwrap().text, "4th");
    assert_eq!(locale.instantiate("place", &args![11]).unwrap().text, "11th");
}

#[test]
fn russian_cardinal_categories_apply() {
    let mut locale = Locale::builder().language("ru").build();
    locale
        .load_source(r"n { \match{1.one}{one}{1.few}{few}{1.many}{many}{}{other} }")
        .unwrap();
    assert_eq!(locale.instantiate("n", &args![1]).unwrap().text, "one");
    assert_eq!(locale.instantiate("n", &args![2]).unwrap().text, "few");
    assert_eq!(locale.instantiate("n", &args![5]).unwrap().text, "many");
    assert_eq!(locale.instantiate("n", &args![21]).unwrap().text, "one");
}

#[test]
fn numeric_string_parameters_are_classified() {
    let locale = english(r"cards { \match{1.one}{\1 card}{}{\1 cards} }");
    assert_eq!(locale.instantiate("cards", &args!["1"]).unwrap().text, "1 card");
    assert_eq!(locale.instantiate("cards", &args!["7"]).unwrap().text, "7 cards");
}

#[test]
fn float_parameters_classify_by_integer_part() {
    let locale = english(r"cards { \match{1.one}{\1 card}{}{\1 cards} }");
    assert_eq!(
        locale.instantiate("cards", &args![1.5]).unwrap().text,
        "1.5 card"
    );
}

// =============================================================================
// Custom Attributes
// =============================================================================

#[test]
fn nested_instance_attributes_drive_selection() {
    let locale = english(
        r"
        sword {masc} { sword }
        took { You took \match{1.masc}{him}{}{it} }
        ",
    );
    let sword = locale.instantiate("sword", &args![]).unwrap();
    assert!(sword.has_attribute(AttrId::from_raw(12)));

    let taken = locale.instantiate("took", &args![sword]).unwrap();
    assert_eq!(taken.text, "You took him");

    let taken = locale.instantiate("took", &args!["rock"]).unwrap();
    assert_eq!(taken.text, "You took it");
}

#[test]
fn result_carries_the_entry_attributes() {
    let locale = english("carte {fem} { carte }");
    let carte = locale.instantiate("carte", &args![]).unwrap();
    assert!(carte.has_attribute(AttrId::from_raw(12)));
    assert_eq!(carte.attributes.len(), 1);
}

#[test]
fn multi_condition_arm_requires_all_keys() {
    let locale = english(
        r"
        sword {masc} { sword }
        pair { \match{1.masc 2.one}{both}{}{neither} }
        ",
    );
    let sword = locale.instantiate("sword", &args![]).unwrap();
    let both = locale
        .instantiate("pair", &args![sword.clone(), 1])
        .unwrap();
    assert_eq!(both.text, "both");
    let neither = locale.instantiate("pair", &args![sword, 2]).unwrap();
    assert_eq!(neither.text, "neither");
}

// =============================================================================
// Splicing and Markers
// =============================================================================

#[test]
fn splice_shifts_later_markers_by_the_length_delta() {
    let locale = english(r"found { You found \it{\1} x\2 }");
    let result = locale
        .instantiate("found", &args!["gold coin", 7])
        .unwrap();
    assert_eq!(result.text, "You found gold coin x7");
    assert_eq!(
        result.markers,
        vec![
            FormatMarker::new(10, FormatPayload::Style(StyleTag::BeginItalic)),
            FormatMarker::new(10, FormatPayload::Substitution),
            FormatMarker::new(19, FormatPayload::Style(StyleTag::EndItalic)),
            FormatMarker::new(21, FormatPayload::Substitution),
        ]
    );
}

#[test]
fn nested_instance_markers_shift_to_the_splice_point() {
    let locale = english(
        r"
        fancy { \it{\1} }
        msg { Behold: \1! }
        ",
    );
    let fancy = locale.instantiate("fancy", &args!["Excalibur"]).unwrap();
    assert_eq!(fancy.text, "Excalibur");
    assert_eq!(
        fancy.markers,
        vec![
            FormatMarker::new(0, FormatPayload::Style(StyleTag::BeginItalic)),
            FormatMarker::new(0, FormatPayload::Substitution),
            FormatMarker::new(9, FormatPayload::Style(StyleTag::EndItalic)),
        ]
    );

    let message = locale.instantiate("msg", &args![fancy]).unwrap();
    assert_eq!(message.text, "Behold: Excalibur!");
    assert_eq!(
        message.markers,
        vec![
            FormatMarker::new(8, FormatPayload::Substitution),
            FormatMarker::new(8, FormatPayload::Style(StyleTag::BeginItalic)),
            FormatMarker::new(8, FormatPayload::Substitution),
            FormatMarker::new(17, FormatPayload::Style(StyleTag::EndItalic)),
        ]
    );
}

#[test]
fn repeated_parameter_splices_every_occurrence() {
    let locale = english(r"echo { \1 and \1 }");
    let result = locale.instantiate("echo", &args!["go"]).unwrap();
    assert_eq!(result.text, "go and go");
    assert_eq!(
        result.markers,
        vec![
            FormatMarker::new(0, FormatPayload::Substitution),
            FormatMarker::new(7, FormatPayload::Substitution),
        ]
    );
}

#[test]
fn marker_positions_count_characters_not_bytes() {
    let locale = english(r"msg { héllo \1 }");
    let result = locale.instantiate("msg", &args!["ça"]).unwrap();
    assert_eq!(result.text, "héllo ça");
    assert_eq!(
        result.markers,
        vec![FormatMarker::new(6, FormatPayload::Substitution)]
    );
}

// =============================================================================
// No-Match Policy and Errors
// =============================================================================

#[test]
fn unmatched_group_is_skipped_by_default() {
    let locale = english(r"g { pre \match{1.masc}{his} post }");
    let result = locale.instantiate("g", &args!["thing"]).unwrap();
    assert_eq!(result.text, "pre  post");
}

#[test]
fn unmatched_group_errors_under_strict_policy() {
    let mut locale = Locale::builder()
        .language("en")
        .no_match(NoMatchPolicy::Error)
        .build();
    locale
        .load_source(r"g { \match{1.masc}{his} }")
        .unwrap();
    let err = locale.instantiate("g", &args!["thing"]).unwrap_err();
    assert!(matches!(
        err,
        EvalError::NoMatchingAlternative { entry } if entry == "g"
    ));
}

#[test]
fn parameter_count_is_checked_strictly() {
    let locale = english(r"e { \1 }");
    let err = locale.instantiate("e", &args![]).unwrap_err();
    assert!(matches!(
        err,
        EvalError::ParameterCount {
            expected: 1,
            got: 0,
            ..
        }
    ));
    let err = locale.instantiate("e", &args![1, 2]).unwrap_err();
    assert!(matches!(err, EvalError::ParameterCount { got: 2, .. }));
}
