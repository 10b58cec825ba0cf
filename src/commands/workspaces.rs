// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::services::workspaces;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(api: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let items = workspaces::list(api)?;
            if !maybe_print_json(json_flag, jsonl_flag, &items)? {
                let current = api.workspace();
                let data = items
                    .iter()
                    .map(|w| {
                        vec![
                            if current.as_deref() == Some(w.id.as_str()) {
                                "*".into()
                            } else {
                                String::new()
                            },
                            w.id.clone(),
                            w.name.clone(),
                            w.role.clone().unwrap_or_default(),
                            w.member_count.map(|n| n.to_string()).unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["", "ID", "Workspace", "Role", "Members"], data)
                );
            }
        }
        Some(("use", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let ws = workspaces::select(api, id)?;
            println!("Now working in '{}'", ws.name);
        }
        Some(("create", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            anyhow::ensure!(!name.is_empty(), "Workspace name is required");
            let ws = workspaces::create(api, name)?;
            println!("Created workspace '{}' (id {})", ws.name, ws.id);
        }
        Some(("members", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let id = current_or(api, sub.get_one::<String>("id"))?;
            let items = workspaces::members(api, &id)?;
            if !maybe_print_json(json_flag, jsonl_flag, &items)? {
                let data = items
                    .iter()
                    .map(|mb| {
                        vec![
                            mb.name.clone().unwrap_or_default(),
                            mb.email.clone(),
                            mb.role.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Name", "Email", "Role"], data));
            }
        }
        Some(("invite", sub)) => {
            let email = sub.get_one::<String>("email").unwrap().trim();
            let role = sub.get_one::<String>("role").unwrap().trim();
            anyhow::ensure!(email.contains('@'), "'{}' is not a valid email", email);
            let id = current_or(api, None)?;
            let member = workspaces::invite(api, &id, email, role)?;
            println!("Invited {} as {}", member.email, member.role);
        }
        _ => {}
    }
    Ok(())
}

fn current_or(api: &ApiClient, explicit: Option<&String>) -> Result<String> {
    explicit
        .map(|s| s.trim().to_string())
        .or_else(|| api.workspace())
        .context("No workspace selected; run `moneydash workspace use --id <ID>` first")
}
