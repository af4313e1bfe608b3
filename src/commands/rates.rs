// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::Currency;
use crate::utils::{now_local, parse_decimal, parse_year_month, pretty_table};
use crate::fx;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let (year, month) = parse_year_month(sub.get_one::<String>("month").unwrap())?;
            let from: Currency = sub.get_one::<String>("from").unwrap().parse()?;
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
            fx::set_rate(conn, from, Currency::BASE, year, month, rate, now_local(conn)?)?;
            println!(
                "Rate set: 1 {} = {} {} for {}-{:02}",
                from,
                rate,
                Currency::BASE,
                year,
                month
            );
        }
        Some(("list", sub)) => {
            let (year, month) = parse_year_month(sub.get_one::<String>("month").unwrap())?;
            let data = fx::list_for_month(conn, year, month)?
                .into_iter()
                .map(|r| {
                    vec![
                        r.from_currency.code().to_string(),
                        r.to_currency.code().to_string(),
                        r.rate.to_string(),
                        r.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["From", "To", "Rate", "Updated"], data));
        }
        _ => {}
    }
    Ok(())
}
