// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod incomes;
pub mod categories;
pub mod expenses;
pub mod reports;
pub mod settings;
pub mod importer;
pub mod exporter;
pub mod doctor;
