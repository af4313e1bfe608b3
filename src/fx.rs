// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly exchange rates and conversion into the EGP base currency.
//! Conversion is keyed by the month the expense occurred in, not the month
//! the conversion runs in, and it never fails outright: a missing stored
//! rate degrades to the fixed default table.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{Currency, ExchangeRate};

/// Fallback rates when no stored rate exists for the month, one entry per
/// supported foreign currency. 1 SAR = 13.5 EGP.
pub fn default_rate(from: Currency) -> Decimal {
    match from {
        Currency::Sar => Decimal::new(135, 1),
        _ => Decimal::ONE,
    }
}

/// Stored rate for (from, to, year, month), preferring the most recently
/// updated row should the uniqueness constraint ever be violated.
pub fn find_rate(
    conn: &Connection,
    from: Currency,
    to: Currency,
    year: i32,
    month: u32,
) -> Result<Option<Decimal>> {
    let mut stmt = conn.prepare(
        "SELECT rate FROM exchange_rates
         WHERE from_ccy=?1 AND to_ccy=?2 AND year=?3 AND month=?4
         ORDER BY updated_at DESC LIMIT 1",
    )?;
    let r: Option<String> = stmt
        .query_row(params![from.code(), to.code(), year, month], |r| r.get(0))
        .optional()?;
    match r {
        Some(s) => {
            let d = s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid stored rate '{}' for {}/{}", s, from, to))?;
            Ok(Some(d))
        }
        None => Ok(None),
    }
}

/// Convert `amount` to EGP using the rate for the given month. For EGP input
/// this is a no-op and no lookup happens; the returned rate is None exactly
/// in that case.
pub fn convert(
    conn: &Connection,
    amount: Decimal,
    from: Currency,
    year: i32,
    month: u32,
) -> Result<(Decimal, Option<Decimal>)> {
    if from.is_base() {
        return Ok((amount, None));
    }
    let rate = match find_rate(conn, from, Currency::BASE, year, month)? {
        Some(r) => r,
        None => {
            eprintln!(
                "warning: no {}->{} rate stored for {}-{:02}, using default",
                from,
                Currency::BASE,
                year,
                month
            );
            default_rate(from)
        }
    };
    Ok((amount * rate, Some(rate)))
}

/// Upsert the rate for one (from, to, year, month) key. The conflict clause
/// makes the check-then-act atomic per key, so concurrent writers cannot
/// create duplicate rows; the last writer wins.
pub fn set_rate(
    conn: &Connection,
    from: Currency,
    to: Currency,
    year: i32,
    month: u32,
    rate: Decimal,
    now: NaiveDateTime,
) -> Result<()> {
    if rate <= Decimal::ZERO {
        anyhow::bail!("Exchange rate must be positive, got {}", rate);
    }
    if !(1..=12).contains(&month) {
        anyhow::bail!("Invalid month {}", month);
    }
    conn.execute(
        "INSERT INTO exchange_rates(from_ccy, to_ccy, rate, year, month, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(from_ccy, to_ccy, year, month)
         DO UPDATE SET rate=excluded.rate, updated_at=excluded.updated_at",
        params![
            from.code(),
            to.code(),
            rate.to_string(),
            year,
            month,
            now.format("%Y-%m-%d %H:%M:%S").to_string()
        ],
    )?;
    Ok(())
}

pub fn list_for_month(conn: &Connection, year: i32, month: u32) -> Result<Vec<ExchangeRate>> {
    let mut stmt = conn.prepare(
        "SELECT id, from_ccy, to_ccy, rate, year, month, updated_at
         FROM exchange_rates WHERE year=?1 AND month=?2 ORDER BY from_ccy",
    )?;
    let mut rows = stmt.query(params![year, month])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let from_s: String = r.get(1)?;
        let to_s: String = r.get(2)?;
        let rate_s: String = r.get(3)?;
        let updated_s: String = r.get(6)?;
        out.push(ExchangeRate {
            id: r.get(0)?,
            from_currency: from_s.parse()?,
            to_currency: to_s.parse()?,
            rate: crate::utils::parse_decimal(&rate_s)?,
            year: r.get(4)?,
            month: r.get(5)?,
            updated_at: crate::utils::parse_datetime(&updated_s)?,
        });
    }
    Ok(out)
}

/// Idempotent start-up step: make sure the current month has a SAR->EGP rate,
/// seeding the default when absent. A no-op on every later call in the same
/// month.
pub fn ensure_current_month_rate(conn: &Connection, now: NaiveDateTime) -> Result<()> {
    let (year, month) = (now.year(), now.month());
    let existing = list_for_month(conn, year, month)?;
    let has_sar = existing
        .iter()
        .any(|r| r.from_currency == Currency::Sar && r.to_currency == Currency::BASE);
    if !has_sar {
        set_rate(
            conn,
            Currency::Sar,
            Currency::BASE,
            year,
            month,
            default_rate(Currency::Sar),
            now,
        )?;
    }
    Ok(())
}
