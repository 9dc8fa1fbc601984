// Copyright (c) 2025 Saldo Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn income_cmd() -> Command {
    Command::new("income")
        .about("Record and review income entries")
        .subcommand(
            Command::new("add")
                .about("Record an income entry")
                .arg(
                    Arg::new("description")
                        .long("description")
                        .required(true)
                        .help("What the income is"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Amount received (positive)"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("Date received, YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .default_value("salary")
                        .help("salary|freelance|investment|bonus|sales|other"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List income entries")
                .arg(Arg::new("month").long("month").help("Filter by YYYY-MM")),
        ))
        .subcommand(
            Command::new("rm").about("Delete an income entry").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Manage expense items inside a category")
        .subcommand(
            Command::new("add")
                .about("Add an expense item to a category")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Category id or name"),
                )
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(["installment", "fixed", "card"]),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .allow_hyphen_values(true)
                        .help("Amount for fixed/card items"),
                )
                .arg(
                    Arg::new("per-installment")
                        .long("per-installment")
                        .help("Amount of each installment"),
                )
                .arg(
                    Arg::new("installments")
                        .long("installments")
                        .value_parser(value_parser!(u32))
                        .help("Number of installments"),
                )
                .arg(
                    Arg::new("total-amount")
                        .long("total-amount")
                        .help("Total financed amount (default: per-installment * installments)"),
                )
                .arg(
                    Arg::new("start-month")
                        .long("start-month")
                        .help("First installment month, YYYY-MM"),
                )
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("Reference month (fixed) or closing month (card), YYYY-MM"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List expense items applicable in a month")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("Month to resolve against (default: reference month)"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("List every item, including inactive and out-of-window ones"),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit fields of an expense item (kind stays fixed)")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("amount").long("amount").allow_hyphen_values(true))
                .arg(Arg::new("per-installment").long("per-installment"))
                .arg(
                    Arg::new("installments")
                        .long("installments")
                        .value_parser(value_parser!(u32)),
                )
                .arg(Arg::new("total-amount").long("total-amount"))
                .arg(Arg::new("start-month").long("start-month"))
                .arg(Arg::new("month").long("month")),
        )
        .subcommand(
            Command::new("rm").about("Delete an expense item").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("toggle")
                .about("Flip an item's active flag without deleting it")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Month summaries and projections")
        .subcommand(json_flags(
            Command::new("overview").about("Income, expenses and balance for the reference month"),
        ))
        .subcommand(json_flags(
            Command::new("forecast")
                .about("Project any month; future income carries the latest known month forward")
                .arg(Arg::new("month").long("month").required(true)),
        ))
        .subcommand(json_flags(
            Command::new("months").about("Every month the document refers to"),
        ))
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Currency and reference month")
        .subcommand(Command::new("show").about("Show current settings"))
        .subcommand(
            Command::new("set")
                .about("Change currency symbol and/or reference month")
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("month").long("month").help("Reference YYYY-MM")),
        )
        .subcommand(
            Command::new("reset")
                .about("Discard all data and restore the seeded default document")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Required; this cannot be undone"),
                ),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Write data out as files")
        .subcommand(
            Command::new("document")
                .about("Export the whole document as JSON")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Output path (default: saldo-YYYY-MM-DD.json)"),
                ),
        )
        .subcommand(
            Command::new("incomes")
                .about("Export income entries")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

fn import_cmd() -> Command {
    Command::new("import").about("Load data from files").subcommand(
        Command::new("document")
            .about("Replace the stored document with an exported JSON file")
            .arg(Arg::new("path").required(true)),
    )
}

pub fn build_cli() -> Command {
    Command::new("saldo")
        .about("Personal income and expense planner with month-by-month projections")
        .version(crate_version!())
        .subcommand(
            Command::new("init").about("Create the document file if missing and print its location"),
        )
        .subcommand(income_cmd())
        .subcommand(expense_cmd())
        .subcommand(
            Command::new("category")
                .about("Expense categories")
                .subcommand(json_flags(
                    Command::new("list").about("List categories with reference-month totals"),
                )),
        )
        .subcommand(report_cmd())
        .subcommand(settings_cmd())
        .subcommand(export_cmd())
        .subcommand(import_cmd())
        .subcommand(Command::new("doctor").about("Scan the document for integrity issues"))
}
