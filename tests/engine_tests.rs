// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use saldo::engine;
use saldo::models::{Document, ExpenseItem, ExpenseKind, IncomeKind, IncomeRecord, Settings};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn income(id: i64, amount: &str, on: &str) -> IncomeRecord {
    IncomeRecord::new(id, "Paycheck", dec(amount), date(on), IncomeKind::Salary).unwrap()
}

fn installment(id: i64, per: &str, n: u32, start: &str) -> ExpenseItem {
    ExpenseItem::new(
        id,
        "Laptop",
        ExpenseKind::Installment {
            total_amount: dec(per) * Decimal::from(n),
            per_installment: dec(per),
            installments: n,
            start_month: start.to_string(),
        },
    )
    .unwrap()
}

fn fixed(id: i64, amount: &str, month: &str) -> ExpenseItem {
    ExpenseItem::new(
        id,
        "Insurance",
        ExpenseKind::Fixed {
            amount: dec(amount),
            reference_month: month.to_string(),
        },
    )
    .unwrap()
}

fn base_doc(reference: &str) -> Document {
    Document::default().with_settings(Settings::new("$", reference).unwrap())
}

#[test]
fn installment_applies_only_inside_its_window() {
    let item = installment(10, "100", 3, "2024-11");
    assert!(!engine::applies(&item, "2024-10"));
    assert!(engine::applies(&item, "2024-11"));
    assert!(engine::applies(&item, "2024-12"));
    assert!(engine::applies(&item, "2025-01"));
    assert!(!engine::applies(&item, "2025-02"));
}

#[test]
fn installment_progress_is_one_based() {
    let item = installment(10, "100", 3, "2024-11");
    assert_eq!(engine::installment_progress(&item, "2024-11"), Some((1, 3)));
    assert_eq!(engine::installment_progress(&item, "2025-01"), Some((3, 3)));
    assert_eq!(engine::installment_progress(&item, "2025-02"), None);
    assert_eq!(engine::installment_progress(&item, "2024-10"), None);
}

#[test]
fn fixed_applies_in_exactly_its_month() {
    let item = fixed(11, "50", "2024-06");
    assert!(engine::applies(&item, "2024-06"));
    assert!(!engine::applies(&item, "2024-05"));
    assert!(!engine::applies(&item, "2024-07"));
}

#[test]
fn card_applies_in_its_closing_month_only() {
    let item = ExpenseItem::new(
        12,
        "Groceries",
        ExpenseKind::Card {
            amount: dec("300"),
            closing_month: "2024-06".to_string(),
        },
    )
    .unwrap();
    assert!(engine::applies(&item, "2024-06"));
    assert!(!engine::applies(&item, "2024-07"));
}

#[test]
fn future_months_carry_the_latest_income_forward() {
    let doc = base_doc("2024-03")
        .add_income(income(1, "1000", "2024-01-05"))
        .add_income(income(2, "1200", "2024-03-05"));

    let summary = engine::aggregate(&doc, "2024-06");
    assert!(summary.projected);
    // 1200 from 2024-03, not 1000 from 2024-01.
    assert_eq!(summary.total_income, dec("1200"));
}

#[test]
fn past_months_use_recorded_income_only() {
    let doc = base_doc("2024-03")
        .add_income(income(1, "1000", "2024-01-05"))
        .add_income(income(2, "1200", "2024-03-05"));

    let jan = engine::aggregate(&doc, "2024-01");
    assert!(!jan.projected);
    assert_eq!(jan.total_income, dec("1000"));

    let feb = engine::aggregate(&doc, "2024-02");
    assert!(!feb.projected);
    assert_eq!(feb.total_income, Decimal::ZERO);
}

#[test]
fn reference_month_itself_is_not_projected() {
    let doc = base_doc("2024-03").add_income(income(1, "1200", "2024-03-05"));
    let summary = engine::aggregate(&doc, "2024-03");
    assert!(!summary.projected);
    assert_eq!(summary.total_income, dec("1200"));
}

#[test]
fn projection_with_no_income_at_all_is_zero() {
    let doc = base_doc("2024-03");
    let summary = engine::aggregate(&doc, "2024-09");
    assert!(summary.projected);
    assert_eq!(summary.total_income, Decimal::ZERO);
}

#[test]
fn balance_goes_negative_when_expenses_exceed_income() {
    let doc = base_doc("2024-06")
        .add_income(income(1, "100", "2024-06-01"))
        .add_item(1, fixed(10, "250", "2024-06"))
        .unwrap();
    let summary = engine::aggregate(&doc, "2024-06");
    assert_eq!(summary.total_expense, dec("250"));
    assert_eq!(summary.balance, dec("-150"));
}

#[test]
fn inactive_items_still_count_toward_totals() {
    let mut item = fixed(10, "80", "2024-06");
    item.active = false;
    let doc = base_doc("2024-06").add_item(1, item).unwrap();
    let summary = engine::aggregate(&doc, "2024-06");
    assert_eq!(summary.total_expense, dec("80"));
    assert!(!summary.by_category[0].items[0].active);
}

#[test]
fn zero_categories_stay_in_by_category_but_not_in_display_set() {
    let doc = base_doc("2024-06").add_item(1, fixed(10, "80", "2024-06")).unwrap();
    let summary = engine::aggregate(&doc, "2024-06");
    // Default document seeds two categories; only one has expenses.
    assert_eq!(summary.by_category.len(), 2);
    let shown = summary.non_zero_categories();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].total, dec("80"));
}

#[test]
fn income_share_is_none_without_income() {
    let doc = base_doc("2024-06").add_item(1, fixed(10, "80", "2024-06")).unwrap();
    let summary = engine::aggregate(&doc, "2024-06");
    assert_eq!(summary.income_share(dec("80")), None);
}

#[test]
fn income_share_is_a_percentage() {
    let doc = base_doc("2024-06").add_income(income(1, "200", "2024-06-01"));
    let summary = engine::aggregate(&doc, "2024-06");
    assert_eq!(summary.income_share(dec("50")), Some(dec("25")));
}

#[test]
fn available_months_cover_every_referenced_month() {
    let doc = base_doc("2024-03")
        .add_income(income(1, "1000", "2024-01-05"))
        .add_item(1, installment(10, "100", 3, "2024-11"))
        .unwrap()
        .add_item(2, fixed(11, "50", "2024-06"))
        .unwrap();

    let months = engine::available_months(&doc);
    assert_eq!(
        months,
        ["2024-01", "2024-03", "2024-06", "2024-11", "2024-12", "2025-01"]
    );
}
