// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use saldo::{cli, commands, store::Store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = Store::open_default()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let doc = store.load()?;
            store.save(&doc)?;
            println!("Document initialized at {}", store.path().display());
        }
        Some(("income", sub)) => commands::incomes::handle(&store, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
