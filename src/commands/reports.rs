// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, MonthSummary};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => overview(store, sub)?,
        Some(("forecast", sub)) => forecast(store, sub)?,
        Some(("months", sub)) => months(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn balance_cell(balance: Decimal, ccy: &str) -> String {
    if balance < Decimal::ZERO {
        format!("{} (deficit)", fmt_money(&balance.abs(), ccy))
    } else {
        fmt_money(&balance, ccy)
    }
}

fn print_headline(summary: &MonthSummary, ccy: &str) {
    let income = if summary.projected {
        format!("{} (projected)", fmt_money(&summary.total_income, ccy))
    } else {
        fmt_money(&summary.total_income, ccy)
    };
    println!("Month:    {}", summary.month);
    println!("Income:   {}", income);
    println!("Expenses: {}", fmt_money(&summary.total_expense, ccy));
    println!("Balance:  {}", balance_cell(summary.balance, ccy));
}

fn category_rows(summary: &MonthSummary, ccy: &str) -> Vec<Vec<String>> {
    summary
        .non_zero_categories()
        .iter()
        .map(|cat| {
            let share = summary
                .income_share(cat.total)
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_default();
            vec![cat.name.clone(), fmt_money(&cat.total, ccy), share]
        })
        .collect()
}

fn overview(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let doc = store.load()?;
    let summary = engine::aggregate(&doc, &doc.settings.reference_month);
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    let ccy = &doc.settings.currency;
    print_headline(&summary, ccy);
    let rows = category_rows(&summary, ccy);
    if !rows.is_empty() {
        println!(
            "{}",
            pretty_table(&["Category", "Total", "% of income"], rows)
        );
    }
    Ok(())
}

fn forecast(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let target = parse_month(sub.get_one::<String>("month").unwrap())?;
    let doc = store.load()?;
    let summary = engine::aggregate(&doc, &target);
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    let ccy = &doc.settings.currency;
    print_headline(&summary, ccy);

    let mut rows = Vec::new();
    for cat in summary.non_zero_categories() {
        for line in &cat.items {
            rows.push(vec![
                cat.name.clone(),
                line.name.clone(),
                line.kind.to_string(),
                fmt_money(&line.amount, ccy),
                line.installment
                    .map(|(k, n)| format!("{}/{}", k, n))
                    .unwrap_or_default(),
            ]);
        }
    }
    if rows.is_empty() {
        println!("No expenses fall in {}", summary.month);
    } else {
        println!(
            "{}",
            pretty_table(
                &["Category", "Item", "Kind", "Amount", "Installment"],
                rows
            )
        );
    }
    Ok(())
}

fn months(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let doc = store.load()?;
    let data = engine::available_months(&doc);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data.iter().map(|m| vec![m.clone()]).collect();
        println!("{}", pretty_table(&["Month"], rows));
    }
    Ok(())
}
