// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{bail, Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("document", sub)) => document(store, sub)?,
        Some(("incomes", sub)) => incomes(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn document(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let out: PathBuf = match sub.get_one::<String>("out") {
        Some(p) => p.into(),
        None => format!("saldo-{}.json", Local::now().format("%Y-%m-%d")).into(),
    };
    let doc = store.load()?;
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(&out, json).with_context(|| format!("Write {}", out.display()))?;
    println!(
        "Exported document ({} incomes, {} categories) to {}",
        doc.incomes.len(),
        doc.categories.len(),
        out.display()
    );
    Ok(())
}

fn incomes(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let format = sub.get_one::<String>("format").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    let doc = store.load()?;
    let mut records = doc.incomes.clone();
    records.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match format.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["id", "date", "description", "kind", "amount"])?;
            for r in &records {
                wtr.write_record([
                    r.id.to_string(),
                    r.date.to_string(),
                    r.description.clone(),
                    r.kind.to_string(),
                    r.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let json = serde_json::to_string_pretty(&records)?;
            fs::write(out, json).with_context(|| format!("Write {}", out))?;
        }
        other => bail!("Unknown export format '{}'; expected csv or json", other),
    }
    println!("Exported {} income entries to {}", records.len(), out);
    Ok(())
}
