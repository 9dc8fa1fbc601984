// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{IncomeKind, IncomeRecord};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let kind: IncomeKind = sub.get_one::<String>("kind").unwrap().parse()?;

    let doc = store.load()?;
    let record = IncomeRecord::new(doc.next_income_id(), description, amount, date, kind)?;
    let id = record.id;
    let currency = doc.settings.currency.clone();
    let doc = doc.add_income(record);
    store.save(&doc)?;
    println!(
        "Recorded {} on {} '{}' (id: {})",
        fmt_money(&amount, &currency),
        date,
        description.trim(),
        id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct IncomeRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };

    let doc = store.load()?;
    let mut records: Vec<&_> = doc
        .incomes
        .iter()
        .filter(|r| month.as_deref().is_none_or(|m| r.month() == m))
        .collect();
    records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let data: Vec<IncomeRow> = records
        .iter()
        .map(|r| IncomeRow {
            id: r.id,
            date: r.date.to_string(),
            description: r.description.clone(),
            kind: r.kind.to_string(),
            amount: format!("{:.2}", r.amount),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Kind", "Amount"], rows)
        );
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let doc = store.load()?;
    let doc = doc.remove_income(id)?;
    store.save(&doc)?;
    println!("Removed income {}", id);
    Ok(())
}
