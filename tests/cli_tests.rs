// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use moneydash::api::RawResponse;
use moneydash::cli;
use moneydash::commands::{budgets, transactions};
use moneydash::error::ApiError;

const MARCH: &str = r#"[
    {"id": 1, "description": "Salary", "amount": "3000", "type": "income", "date": "2025-03-01"},
    {"id": 2, "description": "Rent", "amount": "1200", "type": "expense", "date": "2025-03-02"},
    {"id": 3, "description": "Market", "amount": "150.25", "type": "expense", "date": "2025-03-05"}
]"#;

#[test]
fn tx_list_pages_newest_first() {
    let (_h, transport, api) =
        signed_in_client(MockAuth::refreshing_to(Err(ApiError::Unauthorized)), |_| {
            RawResponse::new(200, MARCH)
        });
    let matches = cli::build_cli().get_matches_from([
        "moneydash", "tx", "list", "--month", "2025-03", "--per-page", "2",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let page = transactions::query_rows(&api, list_m).unwrap();
            assert_eq!(page.total_items, 3);
            assert_eq!(page.total_pages, 2);
            assert_eq!(page.items.len(), 2);
            assert_eq!(page.items[0].date, "2025-03-05");
            assert_eq!(page.items[0].amount, "150.25");
            assert_eq!(page.items[1].description, "Rent");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
    assert_eq!(transport.sent()[0].query[0].1, "2025-03");
}

#[test]
fn tx_list_filters_by_type() {
    let (_h, _t, api) =
        signed_in_client(MockAuth::refreshing_to(Err(ApiError::Unauthorized)), |_| {
            RawResponse::new(200, MARCH)
        });
    let matches =
        cli::build_cli().get_matches_from(["moneydash", "tx", "list", "--type", "income"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    let page = transactions::query_rows(&api, list_m).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].kind, "income");
}

#[test]
fn bad_month_is_rejected_before_fetching() {
    let (_h, transport, api) =
        signed_in_client(MockAuth::refreshing_to(Err(ApiError::Unauthorized)), |_| {
            RawResponse::new(200, "[]")
        });
    let matches =
        cli::build_cli().get_matches_from(["moneydash", "tx", "list", "--month", "March"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    assert!(transactions::query_rows(&api, list_m).is_err());
    assert!(transport.sent().is_empty());
}

#[test]
fn budget_rows_show_usage() {
    let (_h, _t, api) =
        signed_in_client(MockAuth::refreshing_to(Err(ApiError::Unauthorized)), |_| {
            RawResponse::new(
                200,
                r#"{"success": true, "data": [
                    {"id": "b1", "name": "Food", "amount": "200", "spent": "170", "month": "2025-03"},
                    {"id": "b2", "name": "Fun", "amount": "50", "spent": "75.5"}
                ]}"#,
            )
        });
    let matches = cli::build_cli().get_matches_from(["moneydash", "budget", "list"]);
    let (_, b_m) = matches.subcommand().unwrap();
    let (_, list_m) = b_m.subcommand().unwrap();
    let rows = budgets::query_rows(&api, list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].percent.starts_with("85"));
    assert_eq!(rows[0].status, "warning");
    assert_eq!(rows[0].remaining, "30.00");
    assert_eq!(rows[1].status, "exceeded");
    assert_eq!(rows[1].remaining, "-25.50");
}

#[test]
fn parses_subscription_and_card_commands() {
    let m = cli::build_cli()
        .try_get_matches_from([
            "moneydash", "sub", "add", "--name", "Gym", "--amount", "30", "--cycle", "yearly",
            "--day", "15", "--billing-month", "6",
        ])
        .unwrap();
    let (_, s) = m.subcommand().unwrap();
    let (_, add) = s.subcommand().unwrap();
    assert_eq!(add.get_one::<u32>("day"), Some(&15));
    assert_eq!(add.get_one::<u32>("billing_month"), Some(&6));

    let err = cli::build_cli().try_get_matches_from([
        "moneydash", "card", "add", "--name", "Visa", "--last-four", "4242", "--limit", "100",
        "--closing-day", "x", "--due-day", "5",
    ]);
    assert!(err.is_err());

    let err = cli::build_cli()
        .try_get_matches_from(["moneydash", "notify", "read", "--id", "n1", "--all"]);
    assert!(err.is_err());
}

#[test]
fn out_of_range_durations_are_rejected() {
    let days = cli::build_cli()
        .try_get_matches_from(["moneydash", "sub", "upcoming", "--days", "1000000000"]);
    assert!(days.is_err());
    let negative =
        cli::build_cli().try_get_matches_from(["moneydash", "sub", "upcoming", "--days", "-1"]);
    assert!(negative.is_err());
    let minutes = cli::build_cli().try_get_matches_from([
        "moneydash",
        "session",
        "keepalive",
        "--minutes",
        "18446744073709551615",
    ]);
    assert!(minutes.is_err());
    assert!(
        cli::build_cli()
            .try_get_matches_from(["moneydash", "sub", "upcoming", "--days", "3650"])
            .is_ok()
    );
}
