// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supported currencies. EGP is the base currency; every expense stores a
/// converted EGP amount alongside the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Egp,
    Sar,
}

impl Currency {
    pub const BASE: Currency = Currency::Egp;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Egp => "EGP",
            Currency::Sar => "SAR",
        }
    }

    /// Arabic symbol used in confirmation messages.
    pub fn symbol_ar(&self) -> &'static str {
        match self {
            Currency::Egp => "جنيه",
            Currency::Sar => "ريال",
        }
    }

    pub fn is_base(&self) -> bool {
        *self == Currency::BASE
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EGP" => Ok(Currency::Egp),
            "SAR" => Ok(Currency::Sar),
            other => Err(anyhow::anyhow!("Unknown currency '{}'", other)),
        }
    }
}

/// How an expense entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseSource {
    Manual,
    Chat,
}

impl ExpenseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseSource::Manual => "manual",
            ExpenseSource::Chat => "chat",
        }
    }
}

impl FromStr for ExpenseSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(ExpenseSource::Manual),
            "chat" => Ok(ExpenseSource::Chat),
            other => Err(anyhow::anyhow!("Unknown expense source '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    /// Detection keywords, comma-separated, Arabic and English mixed.
    pub keywords: String,
    pub icon: String,
    pub color: String,
    pub is_expense: bool,
}

impl Category {
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: i64,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub rate: Decimal,
    pub year: i32,
    pub month: u32,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Original amount in the transaction currency.
    pub amount: Decimal,
    pub currency: Currency,
    /// Converted amount in EGP, computed once at creation for fast queries.
    pub converted_base: Decimal,
    pub category_id: i64,
    pub description: String,
    pub occurred_at: NaiveDateTime,
    pub source: ExpenseSource,
    /// Rate applied at creation; None iff the currency is already EGP.
    pub rate_used: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseListItem {
    pub id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub converted_base: Decimal,
    pub category: String,
    pub icon: String,
    pub color: String,
    pub description: String,
    pub occurred_at: NaiveDateTime,
    pub source: String,
}

/// Month view for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_spending: Decimal,
    pub by_category: BTreeMap<String, Decimal>,
    /// Keyed by original currency; sums the original, non-converted amounts.
    pub by_currency: BTreeMap<String, Decimal>,
    pub latest: Vec<ExpenseListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub color: String,
    pub amount: Decimal,
    pub count: usize,
    /// Share of this row's own side: income rows against the income total,
    /// expense rows against the expense total. Percentages across a mixed
    /// list therefore do not sum to 100.
    pub percent_of_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Arbitrary-range report, income/expense split by category classification.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_savings: Decimal,
    pub average_per_day: Decimal,
    pub categories: Vec<CategorySummary>,
    pub daily: Vec<DailyEntry>,
}
