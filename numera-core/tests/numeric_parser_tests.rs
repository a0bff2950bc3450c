//! End-to-end tests for the word/digit parser

use numera_core::{
    Culture, ParserFactory, ParserTarget, SpanKind, SpanParser, Subtype, TaggedSpan,
};

fn english() -> std::sync::Arc<dyn SpanParser> {
    ParserFactory::create(ParserTarget::Number, Culture::English).unwrap()
}

fn spanish() -> std::sync::Arc<dyn SpanParser> {
    ParserFactory::create(ParserTarget::Number, Culture::Spanish).unwrap()
}

fn span(text: &str, kind: SpanKind, subtype: Subtype) -> TaggedSpan {
    TaggedSpan::new(0, text, kind).with_subtype(subtype)
}

fn value_of(parser: &dyn SpanParser, text: &str, subtype: Subtype) -> f64 {
    parser
        .parse(&span(text, SpanKind::Cardinal, subtype))
        .and_then(|r| r.number_value())
        .unwrap_or_else(|| panic!("{text:?} should resolve"))
}

#[test]
fn digit_with_multiplier_correctness() {
    let p = english();
    assert_eq!(value_of(p.as_ref(), "2 hundred", Subtype::Digits), 200.0);
    assert_eq!(
        value_of(p.as_ref(), "3,400 thousand", Subtype::Digits),
        3_400_000.0
    );
    assert_eq!(value_of(p.as_ref(), "3 dozen", Subtype::Digits), 36.0);
}

#[test]
fn composite_monotonic_scales_sum() {
    let p = english();
    // Strictly increasing scales left to right sum their partitions
    assert_eq!(
        value_of(
            p.as_ref(),
            "one million two hundred thousand three hundred",
            Subtype::Words
        ),
        1_200_300.0
    );
    assert_eq!(
        value_of(p.as_ref(), "nine hundred and ninety nine thousand, forty-two", Subtype::Words),
        999_042.0
    );
}

#[test]
fn fraction_correctness() {
    let p = english();
    assert_eq!(value_of(p.as_ref(), "three quarters", Subtype::WordFraction), 0.75);
    assert_eq!(value_of(p.as_ref(), "2 over 5", Subtype::WordFraction), 0.4);
    assert_eq!(value_of(p.as_ref(), "one and a half", Subtype::WordFraction), 1.5);
}

#[test]
fn negative_sign_transparency() {
    let p = english();
    let cases: &[(&str, Subtype)] = &[
        ("twenty-one", Subtype::Words),
        ("three quarters", Subtype::WordFraction),
        ("2 hundred", Subtype::Digits),
        ("2^10", Subtype::Power),
    ];
    for (text, subtype) in cases {
        let plain = value_of(p.as_ref(), text, *subtype);
        let negated_text = format!("minus {text}");
        let result = p
            .parse(&span(&negated_text, SpanKind::Cardinal, *subtype))
            .unwrap();
        assert_eq!(result.number_value(), Some(-plain), "for {text:?}");
        // The sign token stays verbatim in the output text
        assert_eq!(result.text, negated_text);
    }
}

#[test]
fn power_notation() {
    let p = english();
    assert_eq!(value_of(p.as_ref(), "1.5E3", Subtype::Power), 1500.0);
    assert_eq!(value_of(p.as_ref(), "2^10", Subtype::Power), 1024.0);
}

#[test]
fn ordinal_words_resolve() {
    let p = ParserFactory::create(ParserTarget::Ordinal, Culture::English).unwrap();
    let result = p
        .parse(&span("twenty-first", SpanKind::Ordinal, Subtype::Words))
        .unwrap();
    assert_eq!(result.number_value(), Some(21.0));
}

#[test]
fn unsupported_kind_is_a_no_op() {
    let p = ParserFactory::create(ParserTarget::Fraction, Culture::English).unwrap();
    assert!(p
        .parse(&span("twenty", SpanKind::Cardinal, Subtype::Words))
        .is_none());
}

#[test]
fn resolution_is_culture_formatted() {
    let p = english();
    let result = p
        .parse(&span("one point five", SpanKind::Double, Subtype::Words))
        .unwrap();
    assert_eq!(result.resolution.as_deref(), Some("1.5"));
}

#[test]
fn spanish_comma_decimal_rendering() {
    let p = spanish();
    let result = p
        .parse(&span("dos coma cinco", SpanKind::Double, Subtype::Words))
        .unwrap();
    assert_eq!(result.number_value(), Some(2.5));
    assert_eq!(result.resolution.as_deref(), Some("2,5"));
}

#[test]
fn spanish_word_composites() {
    let p = spanish();
    assert_eq!(
        value_of(p.as_ref(), "mil doscientos treinta y cuatro", Subtype::Words),
        1234.0
    );
    assert_eq!(value_of(p.as_ref(), "veintiuno", Subtype::Words), 21.0);
    assert_eq!(
        value_of(p.as_ref(), "menos cincuenta", Subtype::Words),
        -50.0
    );
}

#[test]
fn spanish_fractions() {
    let p = spanish();
    assert_eq!(value_of(p.as_ref(), "tres cuartos", Subtype::WordFraction), 0.75);
    assert_eq!(value_of(p.as_ref(), "2 sobre 5", Subtype::WordFraction), 0.4);
}

#[test]
fn idempotent_parsing() {
    let p = english();
    let input = span("nine hundred and ninety nine", SpanKind::Cardinal, Subtype::Words);
    let first = p.parse(&input).unwrap();
    let second = p.parse(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn division_by_zero_yields_infinity() {
    let p = english();
    let result = p
        .parse(&span("2 over 0", SpanKind::Fraction, Subtype::WordFraction))
        .unwrap();
    let value = result.number_value().unwrap();
    assert!(value.is_infinite());
}
