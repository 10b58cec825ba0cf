// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

/// One week.
pub const MAX_KEEPALIVE_MINUTES: u64 = 7 * 24 * 60;
/// Ten years.
pub const MAX_UPCOMING_DAYS: i64 = 3650;

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
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Record id")
}

fn month_arg() -> Arg {
    Arg::new("month").long("month").help("Month as YYYY-MM")
}

pub fn build_cli() -> Command {
    Command::new("moneydash")
        .version(clap::crate_version!())
        .about("Client for the Moneydash finance API: transactions, budgets, subscriptions, cards, workspaces")
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .env("MONEYDASH_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and sign in")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .env("MONEYDASH_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("forgot-password")
                .about("Request a password reset email")
                .arg(Arg::new("email").long("email").required(true)),
        )
        .subcommand(Command::new("logout").about("Sign out and forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("session")
                .about("Inspect or keep alive the stored session")
                .subcommand(Command::new("status").about("Show token expiry and refresh schedule"))
                .subcommand(
                    Command::new("keepalive")
                        .about("Keep refreshing the session in the background for a while")
                        .arg(
                            Arg::new("minutes")
                                .long("minutes")
                                .value_parser(value_parser!(u64).range(1..=MAX_KEEPALIVE_MINUTES))
                                .default_value("60"),
                        ),
                ),
        )
        .subcommand(
            json_flags(Command::new("dashboard").about("Monthly summary").arg(month_arg())),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(month_arg())
                        .arg(Arg::new("search").long("search").help("Match description, notes or category"))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(Arg::new("category").long("category").help("Category id"))
                        .arg(Arg::new("from").long("from").help("From date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("To date YYYY-MM-DD"))
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(value_parser!(usize))
                                .default_value("1"),
                        )
                        .arg(
                            Arg::new("per_page")
                                .long("per-page")
                                .value_parser(value_parser!(usize))
                                .default_value("20"),
                        ),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income|expense"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("category").long("category").help("Category id"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg()))
                .subcommand(json_flags(
                    Command::new("stats")
                        .about("Income, expenses and spend by category")
                        .arg(month_arg()),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Export transactions to a file")
                        .arg(month_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Budgets")
                .subcommand(json_flags(
                    Command::new("list").about("List budgets with usage").arg(month_arg()),
                ))
                .subcommand(
                    Command::new("add")
                        .about("Create a budget")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").help("Category id"))
                        .arg(month_arg()),
                )
                .subcommand(Command::new("rm").about("Delete a budget").arg(id_arg())),
        )
        .subcommand(
            Command::new("sub")
                .about("Subscriptions")
                .subcommand(json_flags(Command::new("list").about("List subscriptions")))
                .subcommand(
                    Command::new("add")
                        .about("Add a subscription")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("cycle")
                                .long("cycle")
                                .default_value("monthly")
                                .help("weekly|monthly|yearly"),
                        )
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .required(true)
                                .value_parser(value_parser!(u32))
                                .help("Day of month, weekday (1=Mon) for weekly"),
                        )
                        .arg(
                            Arg::new("billing_month")
                                .long("billing-month")
                                .value_parser(value_parser!(u32))
                                .help("Month 1-12, yearly only"),
                        )
                        .arg(Arg::new("category").long("category").help("Category id"))
                        .arg(Arg::new("card").long("card").help("Credit card id")),
                )
                .subcommand(Command::new("rm").about("Delete a subscription").arg(id_arg()))
                .subcommand(json_flags(
                    Command::new("upcoming")
                        .about("Charges due soon")
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .value_parser(value_parser!(i64).range(0..=MAX_UPCOMING_DAYS))
                                .default_value("30"),
                        ),
                )),
        )
        .subcommand(
            Command::new("card")
                .about("Credit cards")
                .subcommand(json_flags(Command::new("list").about("List credit cards")))
                .subcommand(
                    Command::new("add")
                        .about("Add a credit card")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("last_four").long("last-four").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(
                            Arg::new("closing_day")
                                .long("closing-day")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("due_day")
                                .long("due-day")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        ),
                )
                .subcommand(Command::new("rm").about("Delete a credit card").arg(id_arg())),
        )
        .subcommand(
            Command::new("notify")
                .about("Notifications")
                .subcommand(json_flags(
                    Command::new("list").about("List notifications").arg(
                        Arg::new("unread")
                            .long("unread")
                            .action(ArgAction::SetTrue)
                            .help("Only unread"),
                    ),
                ))
                .subcommand(
                    Command::new("read")
                        .about("Mark notifications as read")
                        .arg(Arg::new("id").long("id").help("Notification id"))
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("id"),
                        ),
                ),
        )
        .subcommand(
            Command::new("workspace")
                .about("Workspaces and members")
                .subcommand(json_flags(Command::new("list").about("List workspaces")))
                .subcommand(
                    Command::new("use")
                        .about("Scope later commands to a workspace")
                        .arg(id_arg()),
                )
                .subcommand(
                    Command::new("create")
                        .about("Create a workspace")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("members")
                        .about("List members of the current (or given) workspace")
                        .arg(Arg::new("id").long("id")),
                ))
                .subcommand(
                    Command::new("invite")
                        .about("Invite someone to the current workspace")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("role").long("role").default_value("member")),
                ),
        )
}
