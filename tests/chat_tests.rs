// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use qirsh::chat::{self, KeywordTable, ParseFailure};
use qirsh::models::Currency;
use rust_decimal::Decimal;

fn table() -> KeywordTable {
    KeywordTable::new(vec![
        (
            "food".to_string(),
            vec!["أكل".to_string(), "food".to_string(), "coffee".to_string()],
        ),
        (
            "transport".to_string(),
            vec!["taxi".to_string(), "uber".to_string()],
        ),
        (
            "bills".to_string(),
            vec!["internet".to_string(), "bills".to_string()],
        ),
    ])
}

#[test]
fn normalizer_maps_arabic_digits_and_separator() {
    assert_eq!(chat::normalize_numerals("٥٫٥"), "5.5");
    assert_eq!(chat::normalize_numerals("١٠ sar"), "10 sar");
    // untouched characters pass through
    assert_eq!(chat::normalize_numerals("abc 12.5"), "abc 12.5");
}

#[test]
fn normalizer_is_idempotent() {
    let once = chat::normalize_numerals("٣٤٫٢ جنيه");
    let twice = chat::normalize_numerals(&once);
    assert_eq!(once, twice);
}

#[test]
fn amount_takes_first_number_only() {
    assert_eq!(
        chat::extract_amount("pay 5 then 10 more"),
        Some(Decimal::from(5))
    );
    assert_eq!(chat::extract_amount("10.5 egp"), Some(Decimal::new(105, 1)));
    assert_eq!(chat::extract_amount("no numbers here"), None);
}

#[test]
fn currency_markers_sar_then_egp_then_default() {
    assert_eq!(chat::detect_currency("5 ريال أكل"), Currency::Sar);
    assert_eq!(chat::detect_currency("5 SAR food"), Currency::Sar);
    assert_eq!(chat::detect_currency("5 جنيه"), Currency::Egp);
    assert_eq!(chat::detect_currency("5 egp"), Currency::Egp);
    // no marker at all: base currency
    assert_eq!(chat::detect_currency("100 bills"), Currency::Egp);
}

#[test]
fn keyword_match_is_order_sensitive() {
    // Input carries keywords from both food and transport; the table lists
    // food first, so food's keyword wins.
    let t = table();
    assert_eq!(
        t.match_keyword("coffee after the taxi ride"),
        Some("coffee".to_string())
    );
    // reversed table order flips the winner
    let reversed = KeywordTable::new(vec![
        (
            "transport".to_string(),
            vec!["taxi".to_string(), "uber".to_string()],
        ),
        (
            "food".to_string(),
            vec!["أكل".to_string(), "food".to_string(), "coffee".to_string()],
        ),
    ]);
    assert_eq!(
        reversed.match_keyword("coffee after the taxi ride"),
        Some("taxi".to_string())
    );
}

#[test]
fn keyword_match_none_when_no_category_hits() {
    assert_eq!(table().match_keyword("50 on mystery stuff"), None);
}

#[test]
fn parse_empty_input_rejected() {
    let r = chat::parse("   ", &table());
    assert!(!r.valid);
    assert_eq!(r.error, Some(ParseFailure::EmptyInput));
}

#[test]
fn parse_rejects_digit_free_input() {
    let r = chat::parse("coffee with friends", &table());
    assert!(!r.valid);
    assert_eq!(r.error, Some(ParseFailure::NoAmount));
}

#[test]
fn parse_rejects_zero_amount() {
    let r = chat::parse("0 egp food", &table());
    assert!(!r.valid);
    assert_eq!(r.error, Some(ParseFailure::NoAmount));
}

#[test]
fn parse_full_arabic_message() {
    let r = chat::parse("5 ريال أكل", &table());
    assert!(r.valid);
    assert_eq!(r.amount, Decimal::from(5));
    assert_eq!(r.currency, Currency::Sar);
    assert_eq!(r.keyword, Some("أكل".to_string()));
    assert_eq!(r.original_text, "5 ريال أكل");
}

#[test]
fn parse_arabic_numerals_message() {
    let r = chat::parse("٥٫٥ جنيه food", &table());
    assert!(r.valid);
    assert_eq!(r.amount, Decimal::new(55, 1));
    assert_eq!(r.currency, Currency::Egp);
    assert_eq!(r.keyword, Some("food".to_string()));
}

#[test]
fn parse_preserves_original_text_verbatim() {
    let r = chat::parse("  10 sar COFFEE downtown  ", &table());
    assert!(r.valid);
    assert_eq!(r.original_text, "10 sar COFFEE downtown");
}

#[test]
fn arabic_detection_by_letter_majority() {
    assert!(chat::is_arabic("٥ ريال أكل"));
    assert!(!chat::is_arabic("5 sar food"));
    assert!(!chat::is_arabic("12345"));
    // mixed, latin majority
    assert!(!chat::is_arabic("lunch at مطعم downtown today"));
}

#[test]
fn confirmation_templates_per_language() {
    let ar = chat::confirmation_message(Decimal::from(5), Currency::Sar, "أكل", true);
    assert_eq!(ar, "✔ تم تسجيل 5 ريال في فئة أكل");
    let en = chat::confirmation_message(Decimal::from(10), Currency::Egp, "Food", false);
    assert_eq!(en, "✔ Added 10 EGP to Food category");
}
