// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, NaiveTime};
use rusqlite::Connection;

use crate::models::Currency;
use crate::store::{categories, expenses};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_datetime, parse_decimal,
    pretty_table};
use crate::service;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let currency: Currency = sub.get_one::<String>("currency").unwrap().parse()?;
    let cat_name = sub.get_one::<String>("category").unwrap();
    let description = sub.get_one::<String>("description").unwrap();
    let occurred_at = sub
        .get_one::<String>("datetime")
        .map(|s| parse_datetime(s))
        .transpose()?;

    let category = categories::find_by_name(conn, cat_name)?
        .with_context(|| format!("Category '{}' not found", cat_name))?;

    let outcome =
        service::create_manual(conn, amount, currency, category.id, description, occurred_at);
    println!("{}", outcome.message);
    if let Some(e) = outcome.expense {
        println!(
            "#{} {} on {} ({} in base)",
            e.id,
            fmt_money(&e.amount, e.currency.code()),
            e.occurred_at.format("%Y-%m-%d %H:%M"),
            fmt_money(&e.converted_base, Currency::BASE.code()),
        );
    } else {
        std::process::exit(1);
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = parse_date(sub.get_one::<String>("end").unwrap())?;
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(
            categories::find_by_name(conn, name)?
                .with_context(|| format!("Category '{}' not found", name))?
                .id,
        ),
        None => None,
    };

    let window_start = NaiveDateTime::new(start, NaiveTime::MIN);
    let window_end = NaiveDateTime::new(
        end.succ_opt().context("End date out of range")?,
        NaiveTime::MIN,
    );
    let rows = expenses::query_range(conn, window_start, window_end, category_id, true)?;

    if maybe_print_json(json_flag, jsonl_flag, &rows)? {
        return Ok(());
    }
    let cats: std::collections::HashMap<i64, String> = categories::keyword_order(conn)?
        .into_iter()
        .map(|c| (c.id, c.name_en))
        .collect();
    let data = rows
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.occurred_at.format("%Y-%m-%d %H:%M").to_string(),
                e.amount.round_dp(2).to_string(),
                e.currency.code().to_string(),
                e.converted_base.round_dp(2).to_string(),
                cats.get(&e.category_id).cloned().unwrap_or_default(),
                e.source.as_str().to_string(),
                e.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "When", "Amount", "CCY", "EGP", "Category", "Source", "Description"],
            data,
        )
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if service::delete_expense(conn, id)? {
        println!("Deleted expense {}", id);
    } else {
        println!("No expense with id {}", id);
        std::process::exit(1);
    }
    Ok(())
}
