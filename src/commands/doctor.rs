// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::ExpenseKind;
use crate::month;
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

pub fn handle(store: &Store) -> Result<()> {
    let doc = store.load()?;
    let mut rows: Vec<Vec<String>> = Vec::new();

    // 1) Duplicate ids
    let mut seen = HashSet::new();
    for r in &doc.incomes {
        if !seen.insert(r.id) {
            rows.push(vec![
                "duplicate-id".into(),
                format!("income {}", r.id),
                r.description.clone(),
            ]);
        }
    }
    let mut seen = HashSet::new();
    for cat in &doc.categories {
        if !seen.insert(cat.id) {
            rows.push(vec![
                "duplicate-id".into(),
                format!("category {}", cat.id),
                cat.name.clone(),
            ]);
        }
    }
    let mut seen = HashSet::new();
    for cat in &doc.categories {
        for item in &cat.items {
            if !seen.insert(item.id) {
                rows.push(vec![
                    "duplicate-id".into(),
                    format!("item {}", item.id),
                    item.name.clone(),
                ]);
            }
        }
    }

    // 2) Malformed month tokens
    if month::check(&doc.settings.reference_month).is_err() {
        rows.push(vec![
            "bad-month".into(),
            "settings".into(),
            doc.settings.reference_month.clone(),
        ]);
    }
    for cat in &doc.categories {
        for item in &cat.items {
            let token = match &item.kind {
                ExpenseKind::Installment { start_month, .. } => start_month,
                ExpenseKind::Fixed {
                    reference_month, ..
                } => reference_month,
                ExpenseKind::Card { closing_month, .. } => closing_month,
            };
            if month::check(token).is_err() {
                rows.push(vec![
                    "bad-month".into(),
                    format!("item {}", item.id),
                    token.clone(),
                ]);
            }
        }
    }

    // 3) Non-positive amounts and empty installment plans
    for r in &doc.incomes {
        if r.amount <= Decimal::ZERO {
            rows.push(vec![
                "non-positive-amount".into(),
                format!("income {}", r.id),
                r.amount.to_string(),
            ]);
        }
    }
    for cat in &doc.categories {
        for item in &cat.items {
            if item.kind.monthly_amount() <= Decimal::ZERO {
                rows.push(vec![
                    "non-positive-amount".into(),
                    format!("item {}", item.id),
                    item.kind.monthly_amount().to_string(),
                ]);
            }
            if let ExpenseKind::Installment { installments: 0, .. } = item.kind {
                rows.push(vec![
                    "zero-installments".into(),
                    format!("item {}", item.id),
                    item.name.clone(),
                ]);
            }
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Check", "Where", "Detail"], rows));
    }
    Ok(())
}
