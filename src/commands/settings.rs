// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Document, Settings};
use crate::store::Store;
use crate::utils::parse_month;
use anyhow::{bail, Result};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(store)?,
        Some(("set", sub)) => set(store, sub)?,
        Some(("reset", sub)) => reset(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(store: &Store) -> Result<()> {
    let doc = store.load()?;
    println!("Currency:        {}", doc.settings.currency);
    println!("Reference month: {}", doc.settings.reference_month);
    println!("Document:        {}", store.path().display());
    Ok(())
}

fn set(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let currency = sub.get_one::<String>("currency");
    let month = sub.get_one::<String>("month");
    if currency.is_none() && month.is_none() {
        bail!("Nothing to change; pass --currency and/or --month");
    }

    let doc = store.load()?;
    let currency = currency
        .map(String::as_str)
        .unwrap_or(&doc.settings.currency);
    let month = match month {
        Some(m) => parse_month(m)?,
        None => doc.settings.reference_month.clone(),
    };
    let settings = Settings::new(currency, &month)?;
    let doc = doc.with_settings(settings);
    store.save(&doc)?;
    println!(
        "Settings updated: currency '{}', reference month {}",
        doc.settings.currency, doc.settings.reference_month
    );
    Ok(())
}

fn reset(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("force") {
        bail!("This deletes all incomes and expense items; re-run with --force");
    }
    let doc = Document::default();
    store.save(&doc)?;
    println!("Document reset to defaults at {}", store.path().display());
    Ok(())
}
