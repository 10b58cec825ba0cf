// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::services::notifications;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, bail};

pub fn handle(api: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let mut items = notifications::list(api)?;
            let unread = notifications::unread_count(&items);
            if sub.get_flag("unread") {
                items.retain(|n| !n.read);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &items)? {
                let data = items
                    .iter()
                    .map(|n| {
                        vec![
                            n.id.clone(),
                            if n.read { String::new() } else { "*".into() },
                            n.title.clone(),
                            n.message.clone(),
                            n.created_at.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "New", "Title", "Message", "When"], data)
                );
                println!("{} unread", unread);
            }
        }
        Some(("read", sub)) => {
            if sub.get_flag("all") {
                notifications::mark_all_read(api)?;
                println!("All notifications marked as read");
            } else if let Some(id) = sub.get_one::<String>("id") {
                notifications::mark_read(api, id.trim())?;
                println!("Notification {} marked as read", id.trim());
            } else {
                bail!("Pass --id <ID> or --all");
            }
        }
        _ => {}
    }
    Ok(())
}
