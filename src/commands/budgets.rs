// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::budget_usage;
use crate::api::ApiClient;
use crate::forms::BudgetForm;
use crate::services::budgets;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(api: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, sub)?,
        Some(("add", sub)) => add(api, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            budgets::delete(api, id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let form = BudgetForm {
        name: sub.get_one::<String>("name").unwrap(),
        amount: sub.get_one::<String>("amount").unwrap(),
        category_id: sub.get_one::<String>("category").map(String::as_str),
        month: sub.get_one::<String>("month").map(String::as_str),
    };
    let new_budget = form.validate()?;
    let created = budgets::create(api, &new_budget)?;
    println!(
        "Budget '{}' set to {} (id {})",
        created.name,
        fmt_money(&created.amount),
        created.id
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BudgetRow {
    pub id: String,
    pub name: String,
    pub month: String,
    pub amount: String,
    pub spent: String,
    pub remaining: String,
    pub percent: String,
    pub status: String,
}

pub fn query_rows(api: &ApiClient, sub: &clap::ArgMatches) -> Result<Vec<BudgetRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let items = budgets::list(api, month.as_deref())?;
    Ok(items
        .iter()
        .map(|b| {
            let u = budget_usage(b);
            BudgetRow {
                id: b.id.clone(),
                name: b.name.clone(),
                month: b.month.clone().unwrap_or_default(),
                amount: format!("{:.2}", b.amount),
                spent: format!("{:.2}", b.spent),
                remaining: format!("{:.2}", u.remaining),
                percent: format!("{}%", u.percent),
                status: u.status.label().to_string(),
            }
        })
        .collect())
}

fn list(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = query_rows(api, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.id, r.name, r.month, r.amount, r.spent, r.remaining, r.percent, r.status,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Budget", "Month", "Amount", "Spent", "Remaining", "Used", "Status"],
                data
            )
        );
    }
    Ok(())
}
