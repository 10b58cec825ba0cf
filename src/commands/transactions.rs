// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{Page, TransactionFilter, paginate, transaction_stats};
use crate::api::ApiClient;
use crate::forms::TransactionForm;
use crate::models::{Transaction, TransactionType};
use crate::services::transactions;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle(api: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, sub)?,
        Some(("add", sub)) => add(api, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            transactions::delete(api, id)?;
            println!("Removed transaction {}", id);
        }
        Some(("stats", sub)) => stats(api, sub)?,
        Some(("export", sub)) => crate::commands::exporter::export_transactions(api, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive().to_string();
    let form = TransactionForm {
        description: sub.get_one::<String>("description").unwrap(),
        amount: sub.get_one::<String>("amount").unwrap(),
        kind: sub.get_one::<String>("type").unwrap(),
        date: sub.get_one::<String>("date").map(String::as_str).unwrap_or(&today),
        category_id: sub.get_one::<String>("category").map(String::as_str),
        notes: sub.get_one::<String>("notes").map(String::as_str),
    };
    let new_tx = form.validate()?;
    let created = transactions::create(api, &new_tx)?;
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        created.kind.as_str(),
        fmt_money(&created.amount),
        created.date,
        created.description,
        created.id
    );
    Ok(())
}

fn list(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let page = query_rows(api, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &page.items)? {
        let rows: Vec<Vec<String>> = page
            .items
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Type", "Amount", "Category", "Notes"],
                rows,
            )
        );
        println!(
            "Page {}/{} ({} transactions)",
            page.page, page.total_pages, page.total_items
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub notes: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.to_string(),
            description: t.description.clone(),
            kind: t.kind.as_str().to_string(),
            amount: format!("{:.2}", t.amount),
            category: t.category_name().to_string(),
            notes: t.notes.clone().unwrap_or_default(),
        }
    }
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>().map_err(|e| anyhow!(e)))
        .transpose()?;
    Ok(TransactionFilter {
        search: sub.get_one::<String>("search").cloned(),
        kind,
        category_id: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
        from: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        to: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
    })
}

pub fn query_rows(api: &ApiClient, sub: &clap::ArgMatches) -> Result<Page<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let filter = filter_from_args(sub)?;
    let mut items = transactions::list(api, month.as_deref())?;
    items.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    let rows: Vec<TransactionRow> = filter
        .apply(&items)
        .into_iter()
        .map(TransactionRow::from)
        .collect();
    let page = *sub.get_one::<usize>("page").unwrap_or(&1);
    let per_page = *sub.get_one::<usize>("per_page").unwrap_or(&20);
    Ok(paginate(&rows, page, per_page))
}

fn stats(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let items = transactions::list(api, month.as_deref())?;
    let stats = transaction_stats(&items);
    if !maybe_print_json(json_flag, jsonl_flag, &stats)? {
        println!(
            "{}",
            pretty_table(
                &["Income", "Expenses", "Balance", "Count"],
                vec![vec![
                    fmt_money(&stats.income),
                    fmt_money(&stats.expenses),
                    fmt_money(&stats.balance),
                    stats.count.to_string(),
                ]],
            )
        );
        let data = stats
            .expenses_by_category
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}
