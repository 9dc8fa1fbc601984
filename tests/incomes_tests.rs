// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use saldo::models::IncomeKind;
use saldo::store::Store;
use saldo::{cli, commands::incomes};
use tempfile::TempDir;

fn run(store: &Store, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["saldo", "income"];
    full.extend_from_slice(args);
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(full);
    match matches.subcommand() {
        Some(("income", sub)) => incomes::handle(store, sub),
        _ => panic!("no income subcommand"),
    }
}

#[test]
fn add_records_an_income_with_trimmed_description() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));

    run(
        &store,
        &[
            "add",
            "--description",
            "  Paycheck  ",
            "--amount",
            "2500.50",
            "--date",
            "2024-06-05",
        ],
    )
    .unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.incomes.len(), 1);
    let r = &doc.incomes[0];
    assert_eq!(r.description, "Paycheck");
    assert_eq!(r.amount, "2500.50".parse().unwrap());
    assert_eq!(r.kind, IncomeKind::Salary);
}

#[test]
fn add_accepts_an_explicit_kind() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));

    run(
        &store,
        &[
            "add",
            "--description",
            "Stock dividend",
            "--amount",
            "75",
            "--date",
            "2024-06-10",
            "--kind",
            "investment",
        ],
    )
    .unwrap();

    assert_eq!(store.load().unwrap().incomes[0].kind, IncomeKind::Investment);
}

#[test]
fn add_rejects_unknown_kind_and_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));

    let err = run(
        &store,
        &[
            "add",
            "--description",
            "Gig",
            "--amount",
            "75",
            "--date",
            "2024-06-10",
            "--kind",
            "lottery",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown income kind 'lottery'"));
    assert!(store.load().unwrap().incomes.is_empty());
}

#[test]
fn add_rejects_non_positive_amounts() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));

    for amount in ["0", "-10"] {
        let err = run(
            &store,
            &[
                "add",
                "--description",
                "Gig",
                "--amount",
                amount,
                "--date",
                "2024-06-10",
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("greater than zero"), "{}", amount);
    }
    assert!(store.load().unwrap().incomes.is_empty());
}

#[test]
fn rm_deletes_by_id_and_rejects_unknown_ids() {
    let dir = TempDir::new().unwrap();
    let store = Store::at(dir.path().join("document.json"));

    run(
        &store,
        &[
            "add",
            "--description",
            "Gig",
            "--amount",
            "75",
            "--date",
            "2024-06-10",
        ],
    )
    .unwrap();
    let id = store.load().unwrap().incomes[0].id.to_string();

    run(&store, &["rm", &id]).unwrap();
    assert!(store.load().unwrap().incomes.is_empty());

    let err = run(&store, &["rm", "12345"]).unwrap_err();
    assert!(err.to_string().contains("no income with id 12345"));
}
