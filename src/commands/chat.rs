// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::service;
use crate::utils::maybe_print_json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let text = m.get_one::<String>("text").unwrap();

    let outcome = service::create_from_chat(conn, text);
    if maybe_print_json(json_flag, jsonl_flag, &outcome)? {
        return Ok(());
    }
    println!("{}", outcome.message);
    if !outcome.ok {
        std::process::exit(1);
    }
    Ok(())
}
