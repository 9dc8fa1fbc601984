// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Document;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.saldo", "Saldo", "saldo"));

pub fn document_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("document.json"))
}

/// Owns the one persisted document. Every mutation flows through
/// `load` -> pure document transformation -> `save`.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            path: document_path()?,
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a fresh document, not an error.
    pub fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::default());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Read document at {}", self.path.display()))?;
        let doc = serde_json::from_str(&data)
            .with_context(|| format!("Parse document at {}", self.path.display()))?;
        Ok(doc)
    }

    /// Serialize the whole document and replace the file through a temp
    /// file + rename, so a crash mid-write never leaves a torn document.
    pub fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Create data dir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).with_context(|| format!("Write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Replace {}", self.path.display()))?;
        Ok(())
    }
}
