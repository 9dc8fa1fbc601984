// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub items: usize,
    pub active_items: usize,
    pub month_total: String,
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let doc = store.load()?;
    let summary = engine::aggregate(&doc, &doc.settings.reference_month);

    let data: Vec<CategoryRow> = doc
        .categories
        .iter()
        .map(|cat| {
            let total = summary
                .by_category
                .iter()
                .find(|c| c.category_id == cat.id)
                .map(|c| c.total)
                .unwrap_or_default();
            CategoryRow {
                id: cat.id,
                name: cat.name.clone(),
                items: cat.items.len(),
                active_items: cat.items.iter().filter(|i| i.active).count(),
                month_total: format!("{:.2}", total),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.items.to_string(),
                    r.active_items.to_string(),
                    r.month_total.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Category", "Items", "Active", "Total (ref. month)"],
                rows
            )
        );
    }
    Ok(())
}
