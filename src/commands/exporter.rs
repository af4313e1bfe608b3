// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::store::categories;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let out = m.get_one::<String>("out").unwrap();
    let mut wtr = csv::Writer::from_path(out)
        .with_context(|| format!("Cannot open '{}' for writing", out))?;
    wtr.write_record([
        "id",
        "occurred_at",
        "amount",
        "currency",
        "converted_egp",
        "rate_used",
        "category",
        "source",
        "description",
    ])?;

    let cats: std::collections::HashMap<i64, String> = categories::keyword_order(conn)?
        .into_iter()
        .map(|c| (c.id, c.name_en))
        .collect();

    let mut stmt = conn.prepare(
        "SELECT id, occurred_at, amount, currency, converted_base, rate_used, category_id, source, description
         FROM expenses ORDER BY occurred_at ASC, id ASC",
    )?;
    let mut rows = stmt.query([])?;
    let mut n = 0usize;
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let occurred: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let ccy: String = r.get(3)?;
        let converted: String = r.get(4)?;
        let rate: Option<String> = r.get(5)?;
        let cat_id: i64 = r.get(6)?;
        let source: String = r.get(7)?;
        let description: String = r.get(8)?;
        wtr.write_record([
            id.to_string(),
            occurred,
            amount,
            ccy,
            converted,
            rate.unwrap_or_default(),
            cats.get(&cat_id).cloned().unwrap_or_default(),
            source,
            description,
        ])?;
        n += 1;
    }
    wtr.flush()?;
    println!("Exported {} expenses to {}", n, out);
    Ok(())
}
