// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use qirsh::fx;
use qirsh::models::Currency;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    qirsh::db::init_schema(&mut conn).unwrap();
    conn
}

fn noon(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn base_currency_conversion_is_a_noop() {
    let conn = setup();
    let amt = Decimal::new(12345, 2);
    let (converted, rate) = fx::convert(&conn, amt, Currency::Egp, 2025, 8).unwrap();
    assert_eq!(converted, amt);
    assert_eq!(rate, None);
}

#[test]
fn missing_rate_falls_back_to_default() {
    let conn = setup();
    let (converted, rate) = fx::convert(&conn, Decimal::from(100), Currency::Sar, 2025, 8).unwrap();
    assert_eq!(rate, Some(Decimal::new(135, 1)));
    assert_eq!(converted, Decimal::new(13500, 1)); // 100 * 13.5
}

#[test]
fn stored_rate_wins_over_default() {
    let conn = setup();
    fx::set_rate(
        &conn,
        Currency::Sar,
        Currency::Egp,
        2025,
        8,
        Decimal::from(14),
        noon(2025, 8, 1),
    )
    .unwrap();
    let (converted, rate) = fx::convert(&conn, Decimal::from(10), Currency::Sar, 2025, 8).unwrap();
    assert_eq!(rate, Some(Decimal::from(14)));
    assert_eq!(converted, Decimal::from(140));
}

#[test]
fn rate_is_per_month_not_global() {
    let conn = setup();
    fx::set_rate(
        &conn,
        Currency::Sar,
        Currency::Egp,
        2025,
        7,
        Decimal::from(10),
        noon(2025, 7, 1),
    )
    .unwrap();
    // August has no stored rate; conversion must not borrow July's.
    let (_, rate) = fx::convert(&conn, Decimal::from(1), Currency::Sar, 2025, 8).unwrap();
    assert_eq!(rate, Some(Decimal::new(135, 1)));
}

#[test]
fn upsert_leaves_one_row_with_last_value() {
    let conn = setup();
    fx::set_rate(
        &conn,
        Currency::Sar,
        Currency::Egp,
        2025,
        8,
        Decimal::from(13),
        noon(2025, 8, 1),
    )
    .unwrap();
    fx::set_rate(
        &conn,
        Currency::Sar,
        Currency::Egp,
        2025,
        8,
        Decimal::from(14),
        noon(2025, 8, 2),
    )
    .unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM exchange_rates WHERE from_ccy='SAR' AND to_ccy='EGP' AND year=2025 AND month=8",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
    let rate = fx::find_rate(&conn, Currency::Sar, Currency::Egp, 2025, 8)
        .unwrap()
        .unwrap();
    assert_eq!(rate, Decimal::from(14));
}

#[test]
fn set_rate_rejects_non_positive_rate() {
    let conn = setup();
    let err = fx::set_rate(
        &conn,
        Currency::Sar,
        Currency::Egp,
        2025,
        8,
        Decimal::ZERO,
        noon(2025, 8, 1),
    )
    .unwrap_err();
    assert!(err.to_string().contains("must be positive"));
}

#[test]
fn ensure_current_month_rate_is_idempotent() {
    let conn = setup();
    let now = noon(2025, 8, 15);
    fx::ensure_current_month_rate(&conn, now).unwrap();
    fx::ensure_current_month_rate(&conn, now).unwrap();

    let rates = fx::list_for_month(&conn, 2025, 8).unwrap();
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].from_currency, Currency::Sar);
    assert_eq!(rates[0].rate, Decimal::new(135, 1));

    // an existing manual rate is left alone
    fx::set_rate(
        &conn,
        Currency::Sar,
        Currency::Egp,
        2025,
        9,
        Decimal::from(15),
        noon(2025, 9, 1),
    )
    .unwrap();
    fx::ensure_current_month_rate(&conn, noon(2025, 9, 3)).unwrap();
    let rate = fx::find_rate(&conn, Currency::Sar, Currency::Egp, 2025, 9)
        .unwrap()
        .unwrap();
    assert_eq!(rate, Decimal::from(15));
}
