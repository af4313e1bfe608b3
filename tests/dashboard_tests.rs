// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use qirsh::models::{Currency, ExpenseSource};
use qirsh::service;
use qirsh::store::{categories, expenses, NewExpense};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    qirsh::db::init_schema(&mut conn).unwrap();
    qirsh::db::seed_categories(&conn).unwrap();
    categories::ensure_fallback(&conn).unwrap();
    conn
}

fn category_id(conn: &Connection, name: &str) -> i64 {
    categories::find_by_name(conn, name).unwrap().unwrap().id
}

fn insert(
    conn: &Connection,
    amount: &str,
    currency: Currency,
    converted: &str,
    category_id: i64,
    when: &str,
) -> i64 {
    let rate_used = if currency == Currency::Egp {
        None
    } else {
        Some(Decimal::new(135, 1))
    };
    expenses::insert(
        conn,
        &NewExpense {
            amount: amount.parse().unwrap(),
            currency,
            converted_base: converted.parse().unwrap(),
            category_id,
            description: format!("{} {}", amount, currency.code()),
            occurred_at: NaiveDateTime::parse_from_str(when, "%Y-%m-%d %H:%M:%S").unwrap(),
            source: ExpenseSource::Manual,
            rate_used,
        },
    )
    .unwrap()
}

#[test]
fn month_window_is_half_open() {
    let conn = setup();
    let food = category_id(&conn, "Food");
    // last instant of August: included
    insert(&conn, "10", Currency::Egp, "10", food, "2025-08-31 23:59:59");
    // first instant of September: excluded
    insert(&conn, "99", Currency::Egp, "99", food, "2025-09-01 00:00:00");

    let dash = service::dashboard(&conn, 2025, 8).unwrap();
    assert_eq!(dash.total_spending, Decimal::from(10));
    assert_eq!(dash.latest.len(), 1);
}

#[test]
fn totals_and_breakdowns() {
    let conn = setup();
    let food = category_id(&conn, "Food");
    let transport = category_id(&conn, "Transport");

    insert(&conn, "100", Currency::Egp, "100", food, "2025-08-05 10:00:00");
    insert(&conn, "50", Currency::Egp, "50", food, "2025-08-10 12:00:00");
    // 10 SAR at rate 13.5
    insert(&conn, "10", Currency::Sar, "135", transport, "2025-08-12 09:30:00");

    let dash = service::dashboard(&conn, 2025, 8).unwrap();
    assert_eq!(dash.total_spending, Decimal::from(285));
    assert_eq!(dash.by_category.get("Food"), Some(&Decimal::from(150)));
    assert_eq!(dash.by_category.get("Transport"), Some(&Decimal::from(135)));
    // by-currency buckets hold the original, unconverted amounts
    assert_eq!(dash.by_currency.get("EGP"), Some(&Decimal::from(150)));
    assert_eq!(dash.by_currency.get("SAR"), Some(&Decimal::from(10)));
    assert_eq!(dash.month_name, "August");
    assert_eq!((dash.year, dash.month), (2025, 8));
}

#[test]
fn latest_is_descending_and_capped_at_ten() {
    let conn = setup();
    let food = category_id(&conn, "Food");
    for day in 1..=12 {
        insert(
            &conn,
            "5",
            Currency::Egp,
            "5",
            food,
            &format!("2025-08-{:02} 08:00:00", day),
        );
    }
    let dash = service::dashboard(&conn, 2025, 8).unwrap();
    assert_eq!(dash.latest.len(), 10);
    // newest first: day 12 down to day 3
    assert_eq!(
        dash.latest[0].occurred_at.format("%Y-%m-%d").to_string(),
        "2025-08-12"
    );
    assert_eq!(
        dash.latest[9].occurred_at.format("%Y-%m-%d").to_string(),
        "2025-08-03"
    );
}

#[test]
fn december_window_rolls_into_next_year() {
    let conn = setup();
    let food = category_id(&conn, "Food");
    insert(&conn, "20", Currency::Egp, "20", food, "2025-12-31 23:00:00");
    insert(&conn, "30", Currency::Egp, "30", food, "2026-01-01 01:00:00");

    let dash = service::dashboard(&conn, 2025, 12).unwrap();
    assert_eq!(dash.total_spending, Decimal::from(20));
}
