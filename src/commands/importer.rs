// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Document;
use crate::store::Store;
use anyhow::{Context, Result};
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportFormatError {
    #[error("Not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing top-level key '{0}'; is this a document export?")]
    MissingKey(&'static str),
}

/// Parse an exported document. The whole file is rejected on the first
/// problem; a partial document is never produced.
pub fn parse_document(data: &str) -> Result<Document, ImportFormatError> {
    let value: serde_json::Value = serde_json::from_str(data)?;
    for key in ["incomes", "categories", "settings"] {
        if value.get(key).is_none() {
            return Err(ImportFormatError::MissingKey(key));
        }
    }
    Ok(serde_json::from_value(value)?)
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("document", sub)) => document(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn document(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap();
    let data = fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let doc = parse_document(&data).with_context(|| format!("Import {}", path))?;
    store.save(&doc)?;
    println!(
        "Imported document from {} ({} incomes, {} categories)",
        path,
        doc.incomes.len(),
        doc.categories.len()
    );
    Ok(())
}
