// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

use crate::models::Currency;
use crate::service;
use crate::utils::{fmt_money, maybe_print_json, now_local, parse_year_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let (year, month) = match m.get_one::<String>("month") {
        Some(s) => parse_year_month(s)?,
        None => {
            let now = now_local(conn)?;
            (now.year(), now.month())
        }
    };

    let dash = service::dashboard(conn, year, month)?;
    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }

    println!(
        "{} {} — total spending {}",
        dash.month_name,
        dash.year,
        fmt_money(&dash.total_spending, Currency::BASE.code())
    );

    let by_cat = dash
        .by_category
        .iter()
        .map(|(name, amt)| vec![name.clone(), amt.round_dp(2).to_string()])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent (EGP)"], by_cat));

    let by_ccy = dash
        .by_currency
        .iter()
        .map(|(ccy, amt)| vec![ccy.clone(), amt.round_dp(2).to_string()])
        .collect();
    println!("{}", pretty_table(&["Currency", "Original amount"], by_ccy));

    let latest = dash
        .latest
        .iter()
        .map(|e| {
            vec![
                e.occurred_at.format("%Y-%m-%d %H:%M").to_string(),
                format!("{} {}", e.amount.round_dp(2), e.currency),
                e.converted_base.round_dp(2).to_string(),
                e.category.clone(),
                e.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["When", "Amount", "EGP", "Category", "Description"], latest)
    );
    Ok(())
}
