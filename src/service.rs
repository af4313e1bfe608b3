// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense creation flows and the aggregation behind the dashboard and
//! range reports. Creation never surfaces a raw error to callers: store
//! failures are caught and folded into an [`Outcome`] with `ok == false`.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::chat::{self, KeywordTable, ParseFailure};
use crate::models::{
    Category, CategorySummary, Currency, DailyEntry, Dashboard, Expense, ExpenseListItem,
    ExpenseSource, Report,
};
use crate::store::{categories, expenses, NewExpense};
use crate::{fx, utils};

/// Success flag + message + optional payload, the shape creation flows hand
/// back so callers must deal with the failure path explicitly.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
    pub expense: Option<Expense>,
}

impl Outcome {
    fn rejected(message: impl Into<String>) -> Self {
        Outcome {
            ok: false,
            message: message.into(),
            expense: None,
        }
    }
}

/// Parse a chat message and persist the resulting expense. Rejections (bad
/// input, store failure) come back as `ok == false`; this function does not
/// error.
pub fn create_from_chat(conn: &Connection, input: &str) -> Outcome {
    match create_from_chat_inner(conn, input) {
        Ok(outcome) => outcome,
        Err(_) => Outcome::rejected("An error occurred while processing your request"),
    }
}

fn create_from_chat_inner(conn: &Connection, input: &str) -> Result<Outcome> {
    let table = KeywordTable::from_categories(&categories::keyword_order(conn)?);
    let parsed = chat::parse(input, &table);
    if !parsed.valid {
        let reason = parsed.error.unwrap_or(ParseFailure::Internal);
        return Ok(Outcome::rejected(reason.to_string()));
    }

    let category = match &parsed.keyword {
        Some(kw) => match categories::find_by_keyword(conn, kw)? {
            Some(c) => c,
            None => categories::ensure_fallback(conn)?,
        },
        None => categories::ensure_fallback(conn)?,
    };

    let now = utils::now_local(conn)?;
    let (converted, rate_used) =
        fx::convert(conn, parsed.amount, parsed.currency, now.year(), now.month())?;

    let id = expenses::insert(
        conn,
        &NewExpense {
            amount: parsed.amount,
            currency: parsed.currency,
            converted_base: converted,
            category_id: category.id,
            description: parsed.original_text.clone(),
            occurred_at: now,
            source: ExpenseSource::Chat,
            rate_used,
        },
    )?;
    let expense = expenses::find_by_id(conn, id)?
        .with_context(|| format!("Expense {} missing after insert", id))?;

    let arabic = chat::is_arabic(input);
    let display_name = if arabic {
        &category.name_ar
    } else {
        &category.name_en
    };
    let message = chat::confirmation_message(parsed.amount, parsed.currency, display_name, arabic);
    Ok(Outcome {
        ok: true,
        message,
        expense: Some(expense),
    })
}

/// Persist a manually entered expense. Conversion uses the rate of the month
/// the expense occurred in, which defaults to now when no timestamp is given.
pub fn create_manual(
    conn: &Connection,
    amount: Decimal,
    currency: Currency,
    category_id: i64,
    description: &str,
    occurred_at: Option<NaiveDateTime>,
) -> Outcome {
    match create_manual_inner(conn, amount, currency, category_id, description, occurred_at) {
        Ok(outcome) => outcome,
        Err(_) => Outcome::rejected("An error occurred while creating the expense"),
    }
}

fn create_manual_inner(
    conn: &Connection,
    amount: Decimal,
    currency: Currency,
    category_id: i64,
    description: &str,
    occurred_at: Option<NaiveDateTime>,
) -> Result<Outcome> {
    if amount <= Decimal::ZERO {
        return Ok(Outcome::rejected("Amount must be positive"));
    }
    let occurred_at = match occurred_at {
        Some(t) => t,
        None => utils::now_local(conn)?,
    };
    let (converted, rate_used) = fx::convert(
        conn,
        amount,
        currency,
        occurred_at.year(),
        occurred_at.month(),
    )?;
    let id = expenses::insert(
        conn,
        &NewExpense {
            amount,
            currency,
            converted_base: converted,
            category_id,
            description: description.to_string(),
            occurred_at,
            source: ExpenseSource::Manual,
            rate_used,
        },
    )?;
    let expense = expenses::find_by_id(conn, id)?
        .with_context(|| format!("Expense {} missing after insert", id))?;
    Ok(Outcome {
        ok: true,
        message: "Expense created successfully".to_string(),
        expense: Some(expense),
    })
}

pub fn delete_expense(conn: &Connection, id: i64) -> Result<bool> {
    expenses::delete(conn, id)
}

fn category_map(conn: &Connection) -> Result<HashMap<i64, Category>> {
    Ok(categories::keyword_order(conn)?
        .into_iter()
        .map(|c| (c.id, c))
        .collect())
}

fn at_midnight(d: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(d, NaiveTime::MIN)
}

/// Month dashboard over the half-open window [first of month, first of next
/// month): the last instant of the month is in, the first instant of the
/// next month is out.
pub fn dashboard(conn: &Connection, year: i32, month: u32) -> Result<Dashboard> {
    let start = at_midnight(utils::month_start(year, month)?);
    let end = at_midnight(utils::next_month_start(year, month)?);
    let rows = expenses::query_range(conn, start, end, None, true)?;
    let cats = category_map(conn)?;

    let mut total_spending = Decimal::ZERO;
    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut by_currency: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in &rows {
        total_spending += e.converted_base;
        let name = cats
            .get(&e.category_id)
            .map(|c| c.name_en.clone())
            .unwrap_or_else(|| "(uncategorized)".to_string());
        *by_category.entry(name).or_insert(Decimal::ZERO) += e.converted_base;
        // By-currency buckets keep the original amounts, not the converted ones.
        *by_currency
            .entry(e.currency.code().to_string())
            .or_insert(Decimal::ZERO) += e.amount;
    }

    let latest = rows
        .iter()
        .take(10)
        .map(|e| list_item(e, &cats))
        .collect();

    Ok(Dashboard {
        year,
        month,
        month_name: utils::month_name(month).to_string(),
        total_spending,
        by_category,
        by_currency,
        latest,
    })
}

fn list_item(e: &Expense, cats: &HashMap<i64, Category>) -> ExpenseListItem {
    let (category, icon, color) = match cats.get(&e.category_id) {
        Some(c) => (c.name_en.clone(), c.icon.clone(), c.color.clone()),
        None => (
            "(uncategorized)".to_string(),
            "fa-folder".to_string(),
            "#6c757d".to_string(),
        ),
    };
    ExpenseListItem {
        id: e.id,
        amount: e.amount,
        currency: e.currency.code().to_string(),
        converted_base: e.converted_base,
        category,
        icon,
        color,
        description: e.description.clone(),
        occurred_at: e.occurred_at,
        source: e.source.as_str().to_string(),
    }
}

/// Report over the inclusive [start, end] date range: income/expense split by
/// the category classification, per-category shares, and a daily series with
/// leading all-zero days stripped.
pub fn report(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<Report> {
    if end < start {
        anyhow::bail!("Report range end {} precedes start {}", end, start);
    }
    let window_start = at_midnight(start);
    let window_end = at_midnight(end.succ_opt().context("Report end date out of range")?);
    let rows = expenses::query_range(conn, window_start, window_end, None, false)?;
    let cats = category_map(conn)?;

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    // (amount, count) per category id, insertion-ordered by first occurrence.
    let mut per_category: Vec<(i64, Decimal, usize)> = Vec::new();
    let mut by_day: HashMap<NaiveDate, (Decimal, Decimal)> = HashMap::new();

    for e in &rows {
        let is_expense = cats.get(&e.category_id).map(|c| c.is_expense).unwrap_or(true);
        if is_expense {
            total_expense += e.converted_base;
        } else {
            total_income += e.converted_base;
        }
        match per_category.iter_mut().find(|(id, _, _)| *id == e.category_id) {
            Some(entry) => {
                entry.1 += e.converted_base;
                entry.2 += 1;
            }
            None => per_category.push((e.category_id, e.converted_base, 1)),
        }
        let day = by_day
            .entry(e.occurred_at.date())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if is_expense {
            day.1 += e.converted_base;
        } else {
            day.0 += e.converted_base;
        }
    }

    let mut summaries: Vec<CategorySummary> = per_category
        .into_iter()
        .map(|(id, amount, count)| {
            let (name, color, is_expense) = match cats.get(&id) {
                Some(c) => (c.name_en.clone(), c.color.clone(), c.is_expense),
                None => ("(uncategorized)".to_string(), "#6c757d".to_string(), true),
            };
            // The denominator follows the row's own side. A mixed list of
            // income and expense rows therefore does not sum to 100%.
            let denom = if is_expense { total_expense } else { total_income };
            let percent = if denom.is_zero() {
                0.0
            } else {
                (amount / denom * Decimal::ONE_HUNDRED)
                    .to_f64()
                    .unwrap_or(0.0)
            };
            CategorySummary {
                name,
                color,
                amount,
                count,
                percent_of_total: percent,
            }
        })
        .collect();
    summaries.sort_by(|a, b| b.amount.cmp(&a.amount));

    // Fill every calendar day in range, then drop leading all-zero days.
    // Trailing zero days stay.
    let mut daily = Vec::new();
    let mut d = start;
    while d <= end {
        let (income, expense) = by_day.get(&d).copied().unwrap_or((Decimal::ZERO, Decimal::ZERO));
        daily.push(DailyEntry { date: d, income, expense });
        d = match d.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    let first_active = daily
        .iter()
        .position(|e| !e.income.is_zero() || !e.expense.is_zero());
    if let Some(idx) = first_active {
        daily.drain(..idx);
    }

    // Average spend per day over the days from the first kept day through
    // the end of the range; an entirely empty range averages to zero.
    let average_per_day = match daily.first() {
        Some(first) if first_active.is_some() => {
            let days = (end - first.date + Duration::days(1)).num_days();
            let spent: Decimal = daily.iter().map(|e| e.expense).sum();
            if days > 0 {
                spent / Decimal::from(days)
            } else {
                Decimal::ZERO
            }
        }
        _ => Decimal::ZERO,
    };

    Ok(Report {
        start,
        end,
        total_income,
        total_expense,
        net_savings: total_income - total_expense,
        average_per_day,
        categories: summaries,
        daily,
    })
}
