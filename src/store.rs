// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed stores for categories and expenses. Amounts are stored as
//! TEXT and parsed into `Decimal` on the way out, timestamps as
//! `YYYY-MM-DD HH:MM:SS` so range scans work on the string order.

use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::models::{Category, Currency, Expense, ExpenseSource};

pub mod categories {
    use super::*;

    pub const FALLBACK_NAME: &str = "Other";

    fn from_row(r: &Row<'_>) -> rusqlite::Result<Category> {
        Ok(Category {
            id: r.get(0)?,
            name_en: r.get(1)?,
            name_ar: r.get(2)?,
            keywords: r.get(3)?,
            icon: r.get(4)?,
            color: r.get(5)?,
            is_expense: r.get::<_, i64>(6)? != 0,
        })
    }

    const COLS: &str = "id, name_en, name_ar, keywords, icon, color, is_expense";

    /// All categories for listing, English-name order.
    pub fn get_all(conn: &Connection) -> Result<Vec<Category>> {
        let sql = format!("SELECT {} FROM categories ORDER BY name_en", COLS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Categories in id (seed/declaration) order; this is the order the chat
    /// keyword matcher walks.
    pub fn keyword_order(conn: &Connection) -> Result<Vec<Category>> {
        let sql = format!("SELECT {} FROM categories ORDER BY id", COLS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn find_by_name(conn: &Connection, name_en: &str) -> Result<Option<Category>> {
        let sql = format!("SELECT {} FROM categories WHERE name_en=?1", COLS);
        let mut stmt = conn.prepare(&sql)?;
        let c = stmt.query_row(params![name_en], from_row).optional()?;
        Ok(c)
    }

    /// First category (id order) whose keyword list contains the keyword as a
    /// substring.
    pub fn find_by_keyword(conn: &Connection, keyword: &str) -> Result<Option<Category>> {
        let sql = format!(
            "SELECT {} FROM categories WHERE instr(lower(keywords), lower(?1)) > 0 ORDER BY id LIMIT 1",
            COLS
        );
        let mut stmt = conn.prepare(&sql)?;
        let c = stmt
            .query_row(params![keyword.to_lowercase()], from_row)
            .optional()?;
        Ok(c)
    }

    /// The "Other" fallback category, created with fixed seed values when
    /// missing. Idempotent; every uncategorized expense lands here.
    pub fn ensure_fallback(conn: &Connection) -> Result<Category> {
        if let Some(c) = find_by_name(conn, FALLBACK_NAME)? {
            return Ok(c);
        }
        conn.execute(
            "INSERT INTO categories(name_en, name_ar, keywords, icon, color, is_expense)
             VALUES (?1, ?2, ?3, ?4, ?5, 1)",
            params![FALLBACK_NAME, "أخرى", "other,أخرى,متفرقات", "fa-folder", "#6C757D"],
        )?;
        find_by_name(conn, FALLBACK_NAME)?
            .ok_or_else(|| anyhow::anyhow!("Fallback category missing after insert"))
    }

    pub fn add(
        conn: &Connection,
        name_en: &str,
        name_ar: &str,
        keywords: &str,
        is_expense: bool,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO categories(name_en, name_ar, keywords, is_expense)
             VALUES (?1, ?2, ?3, ?4)",
            params![name_en, name_ar, keywords, is_expense as i64],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

/// Column values for an expense about to be inserted.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Decimal,
    pub currency: Currency,
    pub converted_base: Decimal,
    pub category_id: i64,
    pub description: String,
    pub occurred_at: NaiveDateTime,
    pub source: ExpenseSource,
    pub rate_used: Option<Decimal>,
}

pub mod expenses {
    use super::*;

    const COLS: &str =
        "id, amount, currency, converted_base, category_id, description, occurred_at, source, rate_used";

    fn from_row(r: &Row<'_>) -> Result<Expense> {
        let amount_s: String = r.get(1)?;
        let ccy_s: String = r.get(2)?;
        let conv_s: String = r.get(3)?;
        let occurred_s: String = r.get(6)?;
        let source_s: String = r.get(7)?;
        let rate_s: Option<String> = r.get(8)?;
        Ok(Expense {
            id: r.get(0)?,
            amount: crate::utils::parse_decimal(&amount_s)?,
            currency: ccy_s.parse()?,
            converted_base: crate::utils::parse_decimal(&conv_s)?,
            category_id: r.get(4)?,
            description: r.get(5)?,
            occurred_at: crate::utils::parse_datetime(&occurred_s)?,
            source: source_s.parse()?,
            rate_used: rate_s.map(|s| crate::utils::parse_decimal(&s)).transpose()?,
        })
    }

    pub fn insert(conn: &Connection, e: &NewExpense) -> Result<i64> {
        conn.execute(
            "INSERT INTO expenses(amount, currency, converted_base, category_id, description, occurred_at, source, rate_used)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                e.amount.to_string(),
                e.currency.code(),
                e.converted_base.to_string(),
                e.category_id,
                e.description,
                e.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                e.source.as_str(),
                e.rate_used.map(|r| r.to_string()),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Expense>> {
        let sql = format!("SELECT {} FROM expenses WHERE id=?1", COLS);
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(r) => Ok(Some(from_row(r)?)),
            None => Ok(None),
        }
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
        Ok(n > 0)
    }

    /// Expenses with `start <= occurred_at < end`, optionally filtered by
    /// category, ordered by occurrence time in the caller's direction.
    pub fn query_range(
        conn: &Connection,
        start: NaiveDateTime,
        end: NaiveDateTime,
        category_id: Option<i64>,
        descending: bool,
    ) -> Result<Vec<Expense>> {
        let mut sql = format!(
            "SELECT {} FROM expenses WHERE occurred_at >= ?1 AND occurred_at < ?2",
            COLS
        );
        if category_id.is_some() {
            sql.push_str(" AND category_id = ?3");
        }
        sql.push_str(if descending {
            " ORDER BY occurred_at DESC, id DESC"
        } else {
            " ORDER BY occurred_at ASC, id ASC"
        });

        let start_s = start.format("%Y-%m-%d %H:%M:%S").to_string();
        let end_s = end.format("%Y-%m-%d %H:%M:%S").to_string();
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = match category_id {
            Some(cid) => stmt.query(params![start_s, end_s, cid])?,
            None => stmt.query(params![start_s, end_s])?,
        };
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(from_row(r)?);
        }
        Ok(out)
    }
}
