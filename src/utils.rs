// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;

/// Hours added to UTC when stamping "now"; the original deployment ran on
/// UTC+3 wall-clock time. Overridable via the settings table so tests and
/// other deployments can inject their own offset.
pub const DEFAULT_TZ_OFFSET_HOURS: i64 = 3;

pub fn tz_offset_hours(conn: &Connection) -> Result<i64> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='tz_offset_hours'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => s
            .parse::<i64>()
            .with_context(|| format!("Invalid tz_offset_hours '{}'", s)),
        None => Ok(DEFAULT_TZ_OFFSET_HOURS),
    }
}

pub fn set_tz_offset_hours(conn: &Connection, hours: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('tz_offset_hours', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        rusqlite::params![hours.to_string()],
    )?;
    Ok(())
}

/// Current local timestamp: UTC shifted by the configured offset.
pub fn now_local(conn: &Connection) -> Result<NaiveDateTime> {
    Ok(Utc::now().naive_utc() + Duration::hours(tz_offset_hours(conn)?))
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("Invalid timestamp '{}', expected YYYY-MM-DD HH:MM:SS", s))
}

/// "YYYY-MM" into (year, month).
pub fn parse_year_month(s: &str) -> Result<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((d.year(), d.month()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", d.round_dp(2), ccy)
}

pub fn month_start(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("Invalid year/month {}-{}", year, month))
}

/// First day of the month after (year, month); the exclusive end of the
/// dashboard window.
pub fn next_month_start(year: i32, month: u32) -> Result<NaiveDate> {
    let (y, m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    month_start(y, m)
}

pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    match month {
        1..=12 => NAMES[month as usize - 1],
        _ => "",
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
