// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::services::dashboard;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let summary = dashboard::summary(api, month.as_deref())?;
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let mut rows = vec![
            vec!["Income".to_string(), fmt_money(&summary.total_income)],
            vec!["Expenses".to_string(), fmt_money(&summary.total_expenses)],
            vec!["Balance".to_string(), fmt_money(&summary.balance)],
        ];
        if let Some(used) = summary.budget_used {
            rows.push(vec!["Budget used".to_string(), format!("{}%", used.round_dp(1))]);
        }
        if let Some(n) = summary.upcoming_subscriptions {
            rows.push(vec!["Upcoming charges".to_string(), n.to_string()]);
        }
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}
