// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::Currency;
use crate::utils::pretty_table;

/// Flag months that hold foreign-currency expenses but no stored rate for
/// that month. Those expenses were converted with the default fallback rate.
pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT DISTINCT substr(occurred_at,1,7), currency FROM expenses
         WHERE currency != ?1 ORDER BY 1",
    )?;
    let mut cur = stmt.query([Currency::BASE.code()])?;
    while let Some(r) = cur.next()? {
        let ym: String = r.get(0)?;
        let ccy: String = r.get(1)?;
        let (year, month) = crate::utils::parse_year_month(&ym)?;
        let from: Currency = ccy.parse()?;
        if crate::fx::find_rate(conn, from, Currency::BASE, year, month)?.is_none() {
            rows.push(vec!["missing_rate".into(), format!("{} {}", ym, ccy)]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
