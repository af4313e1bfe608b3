// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::Currency;
use crate::service;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let start = parse_date(m.get_one::<String>("start").unwrap())?;
    let end = parse_date(m.get_one::<String>("end").unwrap())?;

    let report = service::report(conn, start, end)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let base = Currency::BASE.code();
    println!("{} .. {}", report.start, report.end);
    println!("Income:      {}", fmt_money(&report.total_income, base));
    println!("Expense:     {}", fmt_money(&report.total_expense, base));
    println!("Net savings: {}", fmt_money(&report.net_savings, base));
    println!("Avg/day:     {}", fmt_money(&report.average_per_day, base));

    let cats = report
        .categories
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.amount.round_dp(2).to_string(),
                c.count.to_string(),
                format!("{:.1}%", c.percent_of_total),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Amount (EGP)", "Count", "Share"], cats)
    );

    let daily = report
        .daily
        .iter()
        .map(|d| {
            vec![
                d.date.to_string(),
                d.income.round_dp(2).to_string(),
                d.expense.round_dp(2).to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Day", "Income", "Expense"], daily));
    Ok(())
}
