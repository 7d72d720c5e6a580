// Copyright (c) 2025 AlphaRise Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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

fn user_arg() -> Arg {
    Arg::new("user").long("user").required(true).help("Username")
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .help("Calendar date YYYY-MM-DD (defaults to today)")
}

pub fn build_cli() -> Command {
    Command::new("alpharise")
        .about("AlphaRise coin-economy ledger and community Q&A")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add")
                        .about("Register a user")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(
                            Arg::new("subscription")
                                .long("subscription")
                                .default_value("trial")
                                .help("trial|premium"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List users")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a user and all their records")
                        .arg(Arg::new("username").long("username").required(true)),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Record a daily login (idempotent per calendar day)")
                .arg(user_arg())
                .arg(date_arg()),
        )
        .subcommand(
            Command::new("allocate")
                .about("Grant the monthly subscription coin allocation")
                .arg(user_arg())
                .arg(date_arg()),
        )
        .subcommand(
            Command::new("coins")
                .about("Catalog-driven coin actions")
                .subcommand(
                    Command::new("earn")
                        .about("Credit a fixed-amount catalog action")
                        .arg(user_arg())
                        .arg(Arg::new("action").long("action").required(true))
                        .arg(date_arg()),
                )
                .subcommand(
                    Command::new("spend")
                        .about("Debit a catalog spend action")
                        .arg(user_arg())
                        .arg(Arg::new("action").long("action").required(true))
                        .arg(date_arg()),
                ),
        )
        .subcommand(
            Command::new("tx").about("Transaction log").subcommand(json_flags(
                Command::new("list")
                    .about("List transactions, most recent first")
                    .arg(Arg::new("user").long("user").help("Limit to one user"))
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
            )),
        )
        .subcommand(
            Command::new("catalog")
                .about("Action catalog")
                .subcommand(json_flags(Command::new("list").about("List catalog actions"))),
        )
        .subcommand(
            Command::new("qa")
                .about("Community Q&A")
                .subcommand(
                    Command::new("ask")
                        .about("Ask a question (spends coins)")
                        .arg(user_arg())
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("body").long("body").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("regular")
                                .help("regular|urgent|private|vip|boost"),
                        )
                        .arg(
                            Arg::new("bounty")
                                .long("bounty")
                                .default_value("0")
                                .value_parser(value_parser!(i64))
                                .help("Extra coins paid to the best answer"),
                        )
                        .arg(date_arg()),
                )
                .subcommand(
                    Command::new("answer")
                        .about("Answer an open question")
                        .arg(user_arg())
                        .arg(
                            Arg::new("question")
                                .long("question")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("body").long("body").required(true))
                        .arg(date_arg()),
                )
                .subcommand(
                    Command::new("rate")
                        .about("Rate an answer to your question (pays the answerer)")
                        .arg(user_arg())
                        .arg(
                            Arg::new("answer")
                                .long("answer")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("rating")
                                .long("rating")
                                .required(true)
                                .value_parser(value_parser!(u8)),
                        )
                        .arg(date_arg()),
                )
                .subcommand(
                    Command::new("best")
                        .about("Mark the best answer to your question")
                        .arg(user_arg())
                        .arg(
                            Arg::new("answer")
                                .long("answer")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(date_arg()),
                )
                .subcommand(
                    Command::new("vote")
                        .about("Up/down vote an answer")
                        .arg(
                            Arg::new("answer")
                                .long("answer")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("down")
                                .long("down")
                                .action(ArgAction::SetTrue)
                                .help("Downvote instead of upvote"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List open questions").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("show").about("Show a question with its answers").arg(
                        Arg::new("question")
                            .long("question")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )),
        )
        .subcommand(json_flags(
            Command::new("stats")
                .about("Ledger stats for a user")
                .arg(user_arg())
                .arg(date_arg()),
        ))
        .subcommand(json_flags(
            Command::new("advisor")
                .about("Heuristic recommendations for a user")
                .arg(user_arg())
                .arg(date_arg()),
        ))
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export the transaction log")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check ledger integrity"))
}
