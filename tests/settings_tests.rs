// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use saldo::models::{IncomeKind, IncomeRecord};
use saldo::store::Store;
use saldo::{cli, commands::settings};
use tempfile::TempDir;

fn run(store: &Store, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["saldo", "settings"];
    full.extend_from_slice(args);
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(full);
    match matches.subcommand() {
        Some(("settings", sub)) => settings::handle(store, sub),
        _ => panic!("no settings subcommand"),
    }
}

#[test]
fn set_changes_currency_and_reference_month() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));

    run(&store, &["set", "--currency", "R$", "--month", "2024-09"]).unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.settings.currency, "R$");
    assert_eq!(doc.settings.reference_month, "2024-09");
}

#[test]
fn set_keeps_the_untouched_field() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));
    run(&store, &["set", "--currency", "€", "--month", "2024-09"]).unwrap();

    run(&store, &["set", "--month", "2025-01"]).unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.settings.currency, "€");
    assert_eq!(doc.settings.reference_month, "2025-01");
}

#[test]
fn set_with_no_flags_is_an_error() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));
    let err = run(&store, &["set"]).unwrap_err();
    assert!(err.to_string().contains("Nothing to change"));
}

#[test]
fn set_rejects_malformed_months() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));
    assert!(run(&store, &["set", "--month", "2024-13"]).is_err());
    assert!(run(&store, &["set", "--month", "June"]).is_err());
}

#[test]
fn reset_requires_force() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));
    let record = IncomeRecord::new(
        1,
        "Paycheck",
        "1000".parse().unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        IncomeKind::Salary,
    )
    .unwrap();
    store.save(&store.load().unwrap().add_income(record)).unwrap();

    let err = run(&store, &["reset"]).unwrap_err();
    assert!(err.to_string().contains("--force"));
    assert_eq!(store.load().unwrap().incomes.len(), 1);

    run(&store, &["reset", "--force"]).unwrap();
    let doc = store.load().unwrap();
    assert!(doc.incomes.is_empty());
    assert_eq!(doc.categories.len(), 2);
}
