// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::store::categories;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            let data = categories::get_all(conn)?
                .into_iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.name_en.clone(),
                        c.name_ar.clone(),
                        if c.is_expense { "expense" } else { "income" }.to_string(),
                        c.keywords,
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Id", "Name", "Arabic", "Kind", "Keywords"], data)
            );
        }
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let name_ar = sub.get_one::<String>("name-ar").unwrap();
            let keywords = sub.get_one::<String>("keywords").unwrap();
            let income = sub.get_flag("income");
            let id = categories::add(conn, name, name_ar, keywords, !income)?;
            println!("Added category '{}' (id {})", name, id);
        }
        _ => {}
    }
    Ok(())
}
