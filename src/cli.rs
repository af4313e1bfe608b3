// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON lines instead of a table"),
    )
}

pub fn build_cli() -> Command {
    Command::new("qirsh")
        .about("Bilingual (Arabic/English) expense tracker with chat-style entry")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database and seed data"))
        .subcommand(
            json_flags(
                Command::new("chat")
                    .about("Record an expense from a natural-language message")
                    .arg(
                        Arg::new("text")
                            .required(true)
                            .help("Message, e.g. \"5 ريال أكل\" or \"10 sar food\""),
                    ),
            ),
        )
        .subcommand(
            Command::new("expense")
                .about("Manage expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense manually")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .default_value("EGP")
                                .help("EGP or SAR"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category English name"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value(""),
                        )
                        .arg(
                            Arg::new("datetime")
                                .long("datetime")
                                .help("YYYY-MM-DD HH:MM:SS, defaults to now"),
                        ),
                )
                .subcommand(
                    json_flags(
                        Command::new("list")
                            .about("List expenses in a date range")
                            .arg(
                                Arg::new("start")
                                    .long("start")
                                    .required(true)
                                    .help("YYYY-MM-DD"),
                            )
                            .arg(Arg::new("end").long("end").required(true).help("YYYY-MM-DD"))
                            .arg(Arg::new("category").long("category")),
                    ),
                )
                .subcommand(
                    Command::new("rm").about("Delete an expense by id").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(Command::new("list").about("List categories"))
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("name-ar").long("name-ar").required(true))
                        .arg(
                            Arg::new("keywords")
                                .long("keywords")
                                .required(true)
                                .help("Comma-separated detection keywords"),
                        )
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Classify as income rather than expense"),
                        ),
                ),
        )
        .subcommand(
            Command::new("rate")
                .about("Manage monthly exchange rates")
                .subcommand(
                    Command::new("set")
                        .about("Set the rate for a month (upsert)")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .help("YYYY-MM"),
                        )
                        .arg(
                            Arg::new("from")
                                .long("from")
                                .default_value("SAR")
                                .help("Source currency"),
                        )
                        .arg(Arg::new("rate").long("rate").required(true)),
                )
                .subcommand(
                    Command::new("list").about("List rates for a month").arg(
                        Arg::new("month")
                            .long("month")
                            .required(true)
                            .help("YYYY-MM"),
                    ),
                ),
        )
        .subcommand(
            json_flags(
                Command::new("dashboard")
                    .about("Month dashboard: totals, category and currency breakdowns")
                    .arg(
                        Arg::new("month")
                            .long("month")
                            .help("YYYY-MM, defaults to the current month"),
                    ),
            ),
        )
        .subcommand(
            json_flags(
                Command::new("report")
                    .about("Income/expense report over a date range")
                    .arg(
                        Arg::new("start")
                            .long("start")
                            .required(true)
                            .help("YYYY-MM-DD"),
                    )
                    .arg(Arg::new("end").long("end").required(true).help("YYYY-MM-DD")),
            ),
        )
        .subcommand(
            Command::new("export")
                .about("Export all expenses to CSV")
                .arg(Arg::new("out").long("out").required(true).help("Output file")),
        )
        .subcommand(Command::new("doctor").about("Check for months missing exchange rates"))
}
