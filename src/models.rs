// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::month::{self, InvalidMonth};

/// Rejected user input. Surfaced inline by the CLI; the stored document is
/// never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("name must not be empty")]
    EmptyName,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("installment count must be at least 1")]
    NoInstallments,
    #[error(transparent)]
    BadMonth(#[from] InvalidMonth),
    #[error("unknown income kind '{0}' (salary|freelance|investment|bonus|sales|other)")]
    UnknownIncomeKind(String),
    #[error("no category matching '{0}'")]
    UnknownCategory(String),
    #[error("no income with id {0}")]
    UnknownIncome(i64),
    #[error("no expense item with id {0}")]
    UnknownItem(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeKind {
    Salary,
    Freelance,
    Investment,
    Bonus,
    Sales,
    Other,
}

impl IncomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeKind::Salary => "salary",
            IncomeKind::Freelance => "freelance",
            IncomeKind::Investment => "investment",
            IncomeKind::Bonus => "bonus",
            IncomeKind::Sales => "sales",
            IncomeKind::Other => "other",
        }
    }
}

impl fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "salary" => Ok(IncomeKind::Salary),
            "freelance" => Ok(IncomeKind::Freelance),
            "investment" => Ok(IncomeKind::Investment),
            "bonus" => Ok(IncomeKind::Bonus),
            "sales" => Ok(IncomeKind::Sales),
            "other" => Ok(IncomeKind::Other),
            other => Err(ValidationError::UnknownIncomeKind(other.to_string())),
        }
    }
}

/// One recorded income entry. Deleted explicitly, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: IncomeKind,
}

impl IncomeRecord {
    pub fn new(
        id: i64,
        description: &str,
        amount: Decimal,
        date: NaiveDate,
        kind: IncomeKind,
    ) -> Result<Self, ValidationError> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(Self {
            id,
            description,
            amount,
            date,
            kind,
        })
    }

    /// Month token the income falls in.
    pub fn month(&self) -> String {
        month::month_of_date(self.date)
    }
}

/// Kind-specific payload of an expense item. The discriminator lands in the
/// serialized item as `"kind": "installment" | "fixed" | "card"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpenseKind {
    /// Repeats identically for `installments` consecutive months starting
    /// at `start_month`.
    Installment {
        total_amount: Decimal,
        per_installment: Decimal,
        installments: u32,
        start_month: String,
    },
    /// Tied to exactly one reference month.
    Fixed {
        amount: Decimal,
        reference_month: String,
    },
    /// Card purchase tied to one closing month.
    Card {
        amount: Decimal,
        closing_month: String,
    },
}

impl ExpenseKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseKind::Installment { .. } => "installment",
            ExpenseKind::Fixed { .. } => "fixed",
            ExpenseKind::Card { .. } => "card",
        }
    }

    /// Amount the item contributes in a month it applies to.
    pub fn monthly_amount(&self) -> Decimal {
        match self {
            ExpenseKind::Installment {
                per_installment, ..
            } => *per_installment,
            ExpenseKind::Fixed { amount, .. } => *amount,
            ExpenseKind::Card { amount, .. } => *amount,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ExpenseKind::Installment {
                total_amount,
                per_installment,
                installments,
                start_month,
            } => {
                if *total_amount <= Decimal::ZERO || *per_installment <= Decimal::ZERO {
                    return Err(ValidationError::NonPositiveAmount);
                }
                if *installments == 0 {
                    return Err(ValidationError::NoInstallments);
                }
                month::check(start_month)?;
            }
            ExpenseKind::Fixed {
                amount,
                reference_month,
            } => {
                if *amount <= Decimal::ZERO {
                    return Err(ValidationError::NonPositiveAmount);
                }
                month::check(reference_month)?;
            }
            ExpenseKind::Card {
                amount,
                closing_month,
            } => {
                if *amount <= Decimal::ZERO {
                    return Err(ValidationError::NonPositiveAmount);
                }
                month::check(closing_month)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(flatten)]
    pub kind: ExpenseKind,
}

fn default_active() -> bool {
    true
}

impl ExpenseItem {
    pub fn new(id: i64, name: &str, kind: ExpenseKind) -> Result<Self, ValidationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        kind.validate()?;
        Ok(Self {
            id,
            name,
            active: true,
            kind,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: i64,
    pub name: String,
    pub items: Vec<ExpenseItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: String,
    pub reference_month: String,
}

impl Settings {
    pub fn new(currency: &str, reference_month: &str) -> Result<Self, ValidationError> {
        month::check(reference_month.trim())?;
        Ok(Self {
            currency: currency.trim().to_string(),
            reference_month: reference_month.trim().to_string(),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            reference_month: month::month_of_date(Local::now().date_naive()),
        }
    }
}

/// The single root aggregate: everything the planner knows, persisted whole
/// on every mutation. Mutations consume the document and return the next
/// value, so no collaborator ever observes a partially-updated structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub incomes: Vec<IncomeRecord>,
    pub categories: Vec<ExpenseCategory>,
    pub settings: Settings,
}

impl Default for Document {
    fn default() -> Self {
        // A fresh document seeds two categories; commands manage items
        // within them, not the category set itself.
        Self {
            incomes: Vec::new(),
            categories: vec![
                ExpenseCategory {
                    id: 1,
                    name: "Car".to_string(),
                    items: Vec::new(),
                },
                ExpenseCategory {
                    id: 2,
                    name: "Credit card".to_string(),
                    items: Vec::new(),
                },
            ],
            settings: Settings::default(),
        }
    }
}

impl Document {
    pub fn next_income_id(&self) -> i64 {
        next_id(self.incomes.iter().map(|r| r.id))
    }

    pub fn next_item_id(&self) -> i64 {
        next_id(
            self.categories
                .iter()
                .flat_map(|c| c.items.iter().map(|i| i.id)),
        )
    }

    pub fn add_income(mut self, income: IncomeRecord) -> Self {
        self.incomes.push(income);
        self
    }

    pub fn remove_income(mut self, id: i64) -> Result<Self, ValidationError> {
        let before = self.incomes.len();
        self.incomes.retain(|r| r.id != id);
        if self.incomes.len() == before {
            return Err(ValidationError::UnknownIncome(id));
        }
        Ok(self)
    }

    pub fn add_item(
        mut self,
        category_id: i64,
        item: ExpenseItem,
    ) -> Result<Self, ValidationError> {
        let cat = self
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| ValidationError::UnknownCategory(category_id.to_string()))?;
        cat.items.push(item);
        Ok(self)
    }

    /// Replace the item with the same id, wherever it lives.
    pub fn update_item(mut self, item: ExpenseItem) -> Result<Self, ValidationError> {
        for cat in &mut self.categories {
            if let Some(slot) = cat.items.iter_mut().find(|i| i.id == item.id) {
                *slot = item;
                return Ok(self);
            }
        }
        Err(ValidationError::UnknownItem(item.id))
    }

    pub fn remove_item(mut self, item_id: i64) -> Result<Self, ValidationError> {
        for cat in &mut self.categories {
            let before = cat.items.len();
            cat.items.retain(|i| i.id != item_id);
            if cat.items.len() != before {
                return Ok(self);
            }
        }
        Err(ValidationError::UnknownItem(item_id))
    }

    pub fn set_item_active(self, item_id: i64, active: bool) -> Result<Self, ValidationError> {
        let (_, item) = self
            .find_item(item_id)
            .ok_or(ValidationError::UnknownItem(item_id))?;
        let mut item = item.clone();
        item.active = active;
        self.update_item(item)
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Look a category up by numeric id or case-insensitive name.
    pub fn find_category(&self, selector: &str) -> Option<&ExpenseCategory> {
        if let Ok(id) = selector.trim().parse::<i64>() {
            if let Some(cat) = self.categories.iter().find(|c| c.id == id) {
                return Some(cat);
            }
        }
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(selector.trim()))
    }

    pub fn find_item(&self, item_id: i64) -> Option<(&ExpenseCategory, &ExpenseItem)> {
        self.categories
            .iter()
            .find_map(|c| c.items.iter().find(|i| i.id == item_id).map(|i| (c, i)))
    }
}

// Ids are creation-time-derived, matching the documents this tool imports;
// bump past collisions so rapid insertion stays unique.
fn next_id(existing: impl Iterator<Item = i64>) -> i64 {
    let taken: HashSet<i64> = existing.collect();
    let mut id = Utc::now().timestamp_millis();
    while taken.contains(&id) {
        id += 1;
    }
    id
}
