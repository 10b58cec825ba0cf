// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::Transaction;
use crate::services::transactions;
use crate::utils::parse_month;
use anyhow::{Result, bail};
use serde_json::json;
use std::path::Path;

pub fn export_transactions(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;

    let mut items = transactions::list(api, month.as_deref())?;
    items.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    write_transactions(&items, &fmt, Path::new(out))?;
    println!("Exported {} transactions to {}", items.len(), out);
    Ok(())
}

pub fn write_transactions(items: &[Transaction], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "description",
                "type",
                "amount",
                "category",
                "notes",
            ])?;
            for t in items {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.kind.as_str().to_string(),
                    t.amount.to_string(),
                    t.category_name().to_string(),
                    t.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let rows: Vec<_> = items
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date.to_string(), "description": t.description,
                        "type": t.kind.as_str(), "amount": t.amount.to_string(),
                        "category": t.category.as_ref().map(|c| c.name.clone()), "notes": t.notes
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}
