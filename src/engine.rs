// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Document, ExpenseItem, ExpenseKind};
use crate::month;

/// Whether an expense item contributes to `target` (a `YYYY-MM` token).
/// Pure predicate; items with malformed month tokens never apply.
pub fn applies(item: &ExpenseItem, target: &str) -> bool {
    match &item.kind {
        ExpenseKind::Installment {
            installments,
            start_month,
            ..
        } => match month::months_between(start_month, target) {
            Ok(k) => k >= 0 && (k as u32) < *installments,
            Err(_) => false,
        },
        ExpenseKind::Fixed {
            reference_month, ..
        } => reference_month == target,
        ExpenseKind::Card { closing_month, .. } => closing_month == target,
    }
}

/// `(current, total)` installment counter for display, 1-based. `None` for
/// non-installment items or months outside the window.
pub fn installment_progress(item: &ExpenseItem, target: &str) -> Option<(u32, u32)> {
    if let ExpenseKind::Installment {
        installments,
        start_month,
        ..
    } = &item.kind
    {
        let k = month::months_between(start_month, target).ok()?;
        if k >= 0 && (k as u32) < *installments {
            return Some((k as u32 + 1, *installments));
        }
    }
    None
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemLine {
    pub id: i64,
    pub name: String,
    pub kind: &'static str,
    pub amount: Decimal,
    pub installment: Option<(u32, u32)>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category_id: i64,
    pub name: String,
    pub total: Decimal,
    pub items: Vec<ItemLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub total_income: Decimal,
    /// True when `month` is past the reference month and income is the
    /// carried-forward projection rather than observed records.
    pub projected: bool,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub by_category: Vec<CategorySummary>,
}

impl MonthSummary {
    /// Categories worth displaying; the full set stays in `by_category`.
    pub fn non_zero_categories(&self) -> Vec<&CategorySummary> {
        self.by_category
            .iter()
            .filter(|c| !c.total.is_zero())
            .collect()
    }

    /// Percent of the month's income a category total takes; `None` when
    /// there is no income to compare against.
    pub fn income_share(&self, category_total: Decimal) -> Option<Decimal> {
        if self.total_income.is_zero() {
            return None;
        }
        Some(category_total / self.total_income * Decimal::from(100))
    }
}

fn income_by_month(doc: &Document) -> BTreeMap<String, Decimal> {
    let mut map: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in &doc.incomes {
        *map.entry(record.month()).or_insert(Decimal::ZERO) += record.amount;
    }
    map
}

/// Sum applicable expense items and income for one month.
///
/// For months up to the reference month the income is what was actually
/// recorded. For later months the latest month with any income stands in as
/// the forecast (0 when nothing was ever recorded).
pub fn aggregate(doc: &Document, target: &str) -> MonthSummary {
    let by_month = income_by_month(doc);
    let projected = target > doc.settings.reference_month.as_str();
    let total_income = if projected {
        by_month
            .iter()
            .next_back()
            .map(|(_, total)| *total)
            .unwrap_or(Decimal::ZERO)
    } else {
        by_month.get(target).copied().unwrap_or(Decimal::ZERO)
    };

    let by_category: Vec<CategorySummary> = doc
        .categories
        .iter()
        .map(|cat| {
            let items: Vec<ItemLine> = cat
                .items
                .iter()
                .filter(|item| applies(item, target))
                .map(|item| ItemLine {
                    id: item.id,
                    name: item.name.clone(),
                    kind: item.kind.label(),
                    amount: item.kind.monthly_amount(),
                    installment: installment_progress(item, target),
                    active: item.active,
                })
                .collect();
            let total = items.iter().map(|line| line.amount).sum();
            CategorySummary {
                category_id: cat.id,
                name: cat.name.clone(),
                total,
                items,
            }
        })
        .collect();

    let total_expense = by_category.iter().map(|c| c.total).sum::<Decimal>();

    MonthSummary {
        month: target.to_string(),
        total_income,
        projected,
        total_expense,
        balance: total_income - total_expense,
        by_category,
    }
}

/// Every month the document refers to: the reference month, income months,
/// each installment window expanded month by month, and fixed/card months.
/// Sorted ascending; malformed tokens are skipped.
pub fn available_months(doc: &Document) -> Vec<String> {
    let mut months: BTreeSet<String> = BTreeSet::new();
    months.insert(doc.settings.reference_month.clone());
    for record in &doc.incomes {
        months.insert(record.month());
    }
    for cat in &doc.categories {
        for item in &cat.items {
            match &item.kind {
                ExpenseKind::Installment {
                    installments,
                    start_month,
                    ..
                } => {
                    for k in 0..*installments {
                        if let Ok(m) = month::add_months(start_month, k as i32) {
                            months.insert(m);
                        }
                    }
                }
                ExpenseKind::Fixed {
                    reference_month, ..
                } => {
                    if month::check(reference_month).is_ok() {
                        months.insert(reference_month.clone());
                    }
                }
                ExpenseKind::Card { closing_month, .. } => {
                    if month::check(closing_month).is_ok() {
                        months.insert(closing_month.clone());
                    }
                }
            }
        }
    }
    months.into_iter().collect()
}
