// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::forms::CreditCardForm;
use crate::services::cards;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(api: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let items = cards::list(api)?;
            if !maybe_print_json(json_flag, jsonl_flag, &items)? {
                let data = items
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.name.clone(),
                            format!("**** {}", c.last_four),
                            fmt_money(&c.limit),
                            fmt_money(&c.balance),
                            fmt_money(&c.available()),
                            c.closing_day.to_string(),
                            c.due_day.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Card", "Number", "Limit", "Balance", "Available", "Closes", "Due"],
                        data
                    )
                );
            }
        }
        Some(("add", sub)) => {
            let form = CreditCardForm {
                name: sub.get_one::<String>("name").unwrap(),
                last_four: sub.get_one::<String>("last_four").unwrap(),
                limit: sub.get_one::<String>("limit").unwrap(),
                closing_day: *sub.get_one::<u32>("closing_day").unwrap(),
                due_day: *sub.get_one::<u32>("due_day").unwrap(),
            };
            let new_card = form.validate()?;
            let created = cards::create(api, &new_card)?;
            println!(
                "Added card '{}' ending {} (id {})",
                created.name, created.last_four, created.id
            );
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            cards::delete(api, id)?;
            println!("Removed card {}", id);
        }
        _ => {}
    }
    Ok(())
}
