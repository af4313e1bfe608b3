// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Natural-language chat input parsing. Turns free-text Arabic/English like
//! `"5 ريال أكل"` or `"10 sar food"` into an amount, a currency, and an
//! optional category keyword. Parsing is total: it never panics and never
//! returns `Err`; bad input comes back as an invalid [`ParsedInput`].

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Category, Currency};

/// SAR markers are checked before EGP markers; anything unmarked is EGP.
const SAR_MARKERS: &[&str] = &["ريال", "sar", "riyal", "sr"];
const EGP_MARKERS: &[&str] = &["جنيه", "جنية", "egp", "pound", "le", "egyptian"];

// ASCII digits only; callers normalize Arabic-Indic numerals first.
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("Input cannot be empty")]
    EmptyInput,
    #[error("Could not detect a valid amount")]
    NoAmount,
    #[error("Failed to parse input")]
    Internal,
}

/// Result of one parse call. Transient; never persisted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub amount: Decimal,
    pub currency: Currency,
    pub keyword: Option<String>,
    pub original_text: String,
    pub valid: bool,
    pub error: Option<ParseFailure>,
}

impl ParsedInput {
    fn invalid(original_text: String, error: ParseFailure) -> Self {
        ParsedInput {
            amount: Decimal::ZERO,
            currency: Currency::BASE,
            keyword: None,
            original_text,
            valid: false,
            error: Some(error),
        }
    }
}

/// Map Arabic-Indic digits (U+0660..U+0669) to ASCII digits and the Arabic
/// decimal separator (U+066B) to '.'. Everything else passes through, so the
/// function is idempotent.
pub fn normalize_numerals(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '٠' => '0',
            '١' => '1',
            '٢' => '2',
            '٣' => '3',
            '٤' => '4',
            '٥' => '5',
            '٦' => '6',
            '٧' => '7',
            '٨' => '8',
            '٩' => '9',
            '٫' => '.',
            other => other,
        })
        .collect()
}

/// First numeric run in the text, or None. Deliberately takes the first
/// number mentioned rather than summing every number in the message.
pub fn extract_amount(input: &str) -> Option<Decimal> {
    let m = AMOUNT_RE.find(input)?;
    m.as_str().parse::<Decimal>().ok()
}

/// Substring match against the fixed marker sets, SAR first, EGP default.
pub fn detect_currency(input: &str) -> Currency {
    let lower = input.to_lowercase();
    if SAR_MARKERS.iter().any(|m| lower.contains(m)) {
        return Currency::Sar;
    }
    if EGP_MARKERS.iter().any(|m| lower.contains(m)) {
        return Currency::Egp;
    }
    Currency::BASE
}

/// Ordered (category, keywords) pairs. Match order is the declaration order
/// of the table: first category wins, and within a category the first listed
/// keyword wins. That tie-break is relied upon and tested.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    entries: Vec<(String, Vec<String>)>,
}

impl KeywordTable {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        KeywordTable { entries }
    }

    /// Build from categories in store order, keywords lower-cased.
    pub fn from_categories(categories: &[Category]) -> Self {
        let entries = categories
            .iter()
            .map(|c| (c.name_en.clone(), c.keyword_list()))
            .collect();
        KeywordTable { entries }
    }

    /// First keyword of the first category found as a substring of the
    /// lower-cased input.
    pub fn match_keyword(&self, input: &str) -> Option<String> {
        let lower = input.to_lowercase();
        for (_category, keywords) in &self.entries {
            for kw in keywords {
                if !kw.is_empty() && lower.contains(kw.as_str()) {
                    return Some(kw.clone());
                }
            }
        }
        None
    }
}

/// Parse one chat message. Never panics and never errors; failures come back
/// as `valid == false` with a typed reason.
pub fn parse(input: &str, table: &KeywordTable) -> ParsedInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ParsedInput::invalid(String::new(), ParseFailure::EmptyInput);
    }

    let normalized = normalize_numerals(trimmed);
    let amount = match extract_amount(&normalized) {
        Some(a) if a > Decimal::ZERO => a,
        _ => return ParsedInput::invalid(trimmed.to_string(), ParseFailure::NoAmount),
    };

    // Currency and keyword detection run on the original trimmed text; the
    // marker and keyword sets carry the Arabic spellings themselves.
    let currency = detect_currency(trimmed);
    let keyword = table.match_keyword(trimmed);

    ParsedInput {
        amount,
        currency,
        keyword,
        original_text: trimmed.to_string(),
        valid: true,
        error: None,
    }
}

/// True when more than half of the alphabetic characters are in the Arabic
/// block (U+0600..U+06FF). Drives only which language the confirmation
/// message uses, never the parse itself.
pub fn is_arabic(input: &str) -> bool {
    let mut arabic = 0usize;
    let mut letters = 0usize;
    for c in input.chars() {
        if c.is_alphabetic() {
            letters += 1;
            if ('\u{0600}'..='\u{06FF}').contains(&c) {
                arabic += 1;
            }
        }
    }
    letters > 0 && arabic * 2 > letters
}

/// Fixed confirmation templates, one per language.
pub fn confirmation_message(
    amount: Decimal,
    currency: Currency,
    category_name: &str,
    arabic: bool,
) -> String {
    if arabic {
        format!(
            "✔ تم تسجيل {} {} في فئة {}",
            amount,
            currency.symbol_ar(),
            category_name
        )
    } else {
        format!(
            "✔ Added {} {} to {} category",
            amount,
            currency.code(),
            category_name
        )
    }
}
