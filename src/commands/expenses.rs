// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::models::{ExpenseItem, ExpenseKind, ValidationError};
use crate::month;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("toggle", sub)) => toggle(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let selector = sub.get_one::<String>("category").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let kind_s = sub.get_one::<String>("kind").unwrap().as_str();

    let doc = store.load()?;
    let cat = doc
        .find_category(selector)
        .with_context(|| format!("No category matching '{}'", selector))?;
    let (cat_id, cat_name) = (cat.id, cat.name.clone());

    let kind = match kind_s {
        "installment" => {
            let per = parse_decimal(
                sub.get_one::<String>("per-installment")
                    .context("--per-installment is required for installment items")?,
            )?;
            let installments = *sub
                .get_one::<u32>("installments")
                .context("--installments is required for installment items")?;
            let start_month = parse_month(
                sub.get_one::<String>("start-month")
                    .context("--start-month is required for installment items")?,
            )?;
            let total_amount = match sub.get_one::<String>("total-amount") {
                Some(s) => parse_decimal(s)?,
                None => per * Decimal::from(installments),
            };
            ExpenseKind::Installment {
                total_amount,
                per_installment: per,
                installments,
                start_month,
            }
        }
        "fixed" => {
            let amount = parse_decimal(
                sub.get_one::<String>("amount")
                    .context("--amount is required for fixed items")?,
            )?;
            let reference_month = match sub.get_one::<String>("month") {
                Some(m) => parse_month(m)?,
                None => doc.settings.reference_month.clone(),
            };
            ExpenseKind::Fixed {
                amount,
                reference_month,
            }
        }
        "card" => {
            let amount = parse_decimal(
                sub.get_one::<String>("amount")
                    .context("--amount is required for card items")?,
            )?;
            let closing_month = parse_month(
                sub.get_one::<String>("month")
                    .context("--month (closing month) is required for card items")?,
            )?;
            ExpenseKind::Card {
                amount,
                closing_month,
            }
        }
        other => bail!("Unknown expense kind '{}'", other),
    };

    let item = ExpenseItem::new(doc.next_item_id(), name, kind)?;
    let id = item.id;
    let doc = doc.add_item(cat_id, item)?;
    store.save(&doc)?;
    println!(
        "Added {} item '{}' to {} (id: {})",
        kind_s,
        name.trim(),
        cat_name,
        id
    );
    Ok(())
}

fn months_column(kind: &ExpenseKind) -> String {
    match kind {
        ExpenseKind::Installment {
            installments,
            start_month,
            ..
        } => {
            let end = month::add_months(start_month, *installments as i32 - 1)
                .unwrap_or_else(|_| start_month.clone());
            format!("{}..{} ({}x)", start_month, end, installments)
        }
        ExpenseKind::Fixed {
            reference_month, ..
        } => reference_month.clone(),
        ExpenseKind::Card { closing_month, .. } => closing_month.clone(),
    }
}

#[derive(Serialize)]
pub struct ItemRow {
    pub category: String,
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub amount: String,
    pub months: String,
    pub installment: Option<String>,
    pub active: bool,
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let all = sub.get_flag("all");
    let doc = store.load()?;
    let target = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => doc.settings.reference_month.clone(),
    };

    let mut data = Vec::new();
    for cat in &doc.categories {
        for item in &cat.items {
            if !all && (!item.active || !engine::applies(item, &target)) {
                continue;
            }
            data.push(ItemRow {
                category: cat.name.clone(),
                id: item.id,
                name: item.name.clone(),
                kind: item.kind.label().to_string(),
                amount: format!("{:.2}", item.kind.monthly_amount()),
                months: months_column(&item.kind),
                installment: engine::installment_progress(item, &target)
                    .map(|(k, n)| format!("{}/{}", k, n)),
                active: item.active,
            });
        }
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    r.id.to_string(),
                    r.name.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.months.clone(),
                    r.installment.clone().unwrap_or_default(),
                    if r.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Category",
                    "ID",
                    "Name",
                    "Kind",
                    "Amount",
                    "Months",
                    "Installment",
                    "Active"
                ],
                rows
            )
        );
    }
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let doc = store.load()?;
    let (_, found) = doc
        .find_item(id)
        .ok_or(ValidationError::UnknownItem(id))?;
    let mut item = found.clone();

    if let Some(n) = sub.get_one::<String>("name") {
        item.name = n.clone();
    }
    match &mut item.kind {
        ExpenseKind::Installment {
            total_amount,
            per_installment,
            installments,
            start_month,
        } => {
            if sub.get_one::<String>("amount").is_some() {
                bail!("--amount does not apply to installment items; use --per-installment");
            }
            if sub.get_one::<String>("month").is_some() {
                bail!("--month does not apply to installment items; use --start-month");
            }
            if let Some(s) = sub.get_one::<String>("per-installment") {
                *per_installment = parse_decimal(s)?;
            }
            if let Some(n) = sub.get_one::<u32>("installments") {
                *installments = *n;
            }
            if let Some(s) = sub.get_one::<String>("start-month") {
                *start_month = parse_month(s)?;
            }
            if let Some(s) = sub.get_one::<String>("total-amount") {
                *total_amount = parse_decimal(s)?;
            }
        }
        ExpenseKind::Fixed {
            amount,
            reference_month,
        } => {
            reject_installment_flags(sub, "fixed")?;
            if let Some(s) = sub.get_one::<String>("amount") {
                *amount = parse_decimal(s)?;
            }
            if let Some(s) = sub.get_one::<String>("month") {
                *reference_month = parse_month(s)?;
            }
        }
        ExpenseKind::Card {
            amount,
            closing_month,
        } => {
            reject_installment_flags(sub, "card")?;
            if let Some(s) = sub.get_one::<String>("amount") {
                *amount = parse_decimal(s)?;
            }
            if let Some(s) = sub.get_one::<String>("month") {
                *closing_month = parse_month(s)?;
            }
        }
    }

    // Re-run construction-time validation on the edited fields.
    let rebuilt = ExpenseItem {
        active: item.active,
        ..ExpenseItem::new(item.id, &item.name, item.kind)?
    };
    let doc = doc.update_item(rebuilt)?;
    store.save(&doc)?;
    println!("Updated item {}", id);
    Ok(())
}

fn reject_installment_flags(sub: &clap::ArgMatches, kind: &str) -> Result<()> {
    for flag in ["per-installment", "total-amount", "start-month"] {
        if sub.get_one::<String>(flag).is_some() {
            bail!("--{} does not apply to {} items", flag, kind);
        }
    }
    if sub.get_one::<u32>("installments").is_some() {
        bail!("--installments does not apply to {} items", kind);
    }
    Ok(())
}

fn rm(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let doc = store.load()?;
    let doc = doc.remove_item(id)?;
    store.save(&doc)?;
    println!("Removed item {}", id);
    Ok(())
}

fn toggle(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let doc = store.load()?;
    let active = !doc
        .find_item(id)
        .ok_or(ValidationError::UnknownItem(id))?
        .1
        .active;
    let doc = doc.set_item_active(id, active)?;
    store.save(&doc)?;
    println!(
        "Item {} is now {}",
        id,
        if active { "active" } else { "inactive" }
    );
    Ok(())
}
