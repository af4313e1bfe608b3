// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.qirsh", "Qirsh", "qirsh"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("qirsh.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    seed_categories(&conn)?;
    crate::store::categories::ensure_fallback(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name_en TEXT NOT NULL UNIQUE,
        name_ar TEXT NOT NULL,
        keywords TEXT NOT NULL,
        icon TEXT NOT NULL DEFAULT 'fa-folder',
        color TEXT NOT NULL DEFAULT '#6c757d',
        is_expense INTEGER NOT NULL DEFAULT 1
    );

    -- One rate per (from, to, year, month); upserts rely on this key.
    CREATE TABLE IF NOT EXISTS exchange_rates(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        from_ccy TEXT NOT NULL,
        to_ccy TEXT NOT NULL,
        rate TEXT NOT NULL,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE(from_ccy, to_ccy, year, month)
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        currency TEXT NOT NULL,
        converted_base TEXT NOT NULL, -- stored in EGP
        category_id INTEGER NOT NULL,
        description TEXT NOT NULL,
        occurred_at TEXT NOT NULL,
        source TEXT NOT NULL CHECK(source IN ('manual','chat')),
        rate_used TEXT,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_occurred_at ON expenses(occurred_at);
    "#,
    )?;
    Ok(())
}

/// Seed the default bilingual categories on first run. Keyword order inside
/// each list and the insertion order of the categories both matter: the chat
/// matcher walks them in declaration order.
pub fn seed_categories(conn: &Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(());
    }
    let seeds: &[(&str, &str, &str, &str, &str, i64)] = &[
        (
            "Food",
            "أكل",
            "أكل,مطعم,قهوة,فطار,غدا,عشا,طعام,food,restaurant,coffee,lunch,dinner,breakfast",
            "fa-utensils",
            "#e74c3c",
            1,
        ),
        (
            "Transport",
            "مواصلات",
            "مواصلات,بنزين,تاكسي,سيارة,transport,taxi,gas,car,fuel,uber",
            "fa-car",
            "#3498db",
            1,
        ),
        (
            "Bills",
            "فواتير",
            "فواتير,كهرباء,ماء,نت,انترنت,bills,electricity,water,internet,utilities",
            "fa-bolt",
            "#e67e22",
            1,
        ),
        (
            "Rent",
            "إيجار",
            "إيجار,ايجار,سكن,rent,housing",
            "fa-home",
            "#9b59b6",
            1,
        ),
        (
            "Shopping",
            "تسوق",
            "تسوق,ملابس,شراء,shopping,clothes,purchase,buy",
            "fa-shopping-bag",
            "#f39c12",
            1,
        ),
        (
            "Salary",
            "راتب",
            "راتب,مرتب,salary,income",
            "fa-money-bill-wave",
            "#27ae60",
            0,
        ),
    ];
    for (en, ar, kw, icon, color, is_expense) in seeds {
        conn.execute(
            "INSERT INTO categories(name_en, name_ar, keywords, icon, color, is_expense)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![en, ar, kw, icon, color, is_expense],
        )?;
    }
    Ok(())
}
