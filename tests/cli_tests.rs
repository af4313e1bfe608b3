// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use qirsh::store::categories;
use qirsh::{cli, commands};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    qirsh::db::init_schema(&mut conn).unwrap();
    qirsh::db::seed_categories(&conn).unwrap();
    categories::ensure_fallback(&conn).unwrap();
    conn
}

#[test]
fn cli_definition_is_consistent() {
    cli::build_cli().debug_assert();
}

#[test]
fn category_add_via_cli_matches() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "qirsh",
        "category",
        "add",
        "--name",
        "Health",
        "--name-ar",
        "صحة",
        "--keywords",
        "دواء,صيدلية,pharmacy,doctor",
    ]);

    if let Some(("category", sub)) = matches.subcommand() {
        commands::categories::handle(&conn, sub).unwrap();
    } else {
        panic!("category command not parsed");
    }

    let health = categories::find_by_name(&conn, "Health").unwrap().unwrap();
    assert!(health.is_expense);
    assert_eq!(health.name_ar, "صحة");
    // new category participates in keyword matching
    let found = categories::find_by_keyword(&conn, "pharmacy").unwrap().unwrap();
    assert_eq!(found.id, health.id);
}

#[test]
fn export_writes_csv() {
    let conn = setup();
    let outcome = qirsh::service::create_from_chat(&conn, "10 sar food");
    assert!(outcome.ok);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("expenses.csv");
    let out_s = out.to_str().unwrap().to_string();
    let matches =
        cli::build_cli().get_matches_from(["qirsh", "export", "--out", &out_s]);
    if let Some(("export", sub)) = matches.subcommand() {
        commands::exporter::handle(&conn, sub).unwrap();
    } else {
        panic!("export command not parsed");
    }

    let body = std::fs::read_to_string(&out).unwrap();
    let mut lines = body.lines();
    assert!(lines.next().unwrap().starts_with("id,occurred_at,amount"));
    let row = lines.next().unwrap();
    assert!(row.contains("SAR"));
    assert!(row.contains("Food"));
}

#[test]
fn rate_set_via_cli_matches() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "qirsh", "rate", "set", "--month", "2025-08", "--rate", "14.25",
    ]);
    if let Some(("rate", sub)) = matches.subcommand() {
        commands::rates::handle(&conn, sub).unwrap();
    } else {
        panic!("rate command not parsed");
    }
    let rate = qirsh::fx::find_rate(
        &conn,
        qirsh::models::Currency::Sar,
        qirsh::models::Currency::Egp,
        2025,
        8,
    )
    .unwrap()
    .unwrap();
    assert_eq!(rate, rust_decimal::Decimal::new(1425, 2));
}
