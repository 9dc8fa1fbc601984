// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// A month token could not be parsed as `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month '{0}', expected YYYY-MM")]
pub struct InvalidMonth(pub String);

fn split(token: &str) -> Result<(i32, i32), InvalidMonth> {
    let bad = || InvalidMonth(token.to_string());
    let (y, m) = token.split_once('-').ok_or_else(bad)?;
    // Tokens must stay zero-padded so string comparison orders them.
    if y.len() != 4 || m.len() != 2 {
        return Err(bad());
    }
    let year: i32 = y.parse().map_err(|_| bad())?;
    let month: i32 = m.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&month) {
        return Err(bad());
    }
    Ok((year, month))
}

pub fn check(token: &str) -> Result<(), InvalidMonth> {
    split(token).map(|_| ())
}

/// Signed number of calendar months from `a` to `b`.
/// `months_between(a, b) == -months_between(b, a)`; same token gives 0.
pub fn months_between(a: &str, b: &str) -> Result<i32, InvalidMonth> {
    let (ya, ma) = split(a)?;
    let (yb, mb) = split(b)?;
    Ok((yb - ya) * 12 + (mb - ma))
}

/// Shift a month token by `offset` months, carrying into the year in
/// both directions.
pub fn add_months(token: &str, offset: i32) -> Result<String, InvalidMonth> {
    let (year, month) = split(token)?;
    let total = year * 12 + (month - 1) + offset;
    Ok(format!(
        "{:04}-{:02}",
        total.div_euclid(12),
        total.rem_euclid(12) + 1
    ))
}

/// Truncate a calendar date to its month token.
pub fn month_of_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
