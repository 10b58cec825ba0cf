// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{
    monthly_cost, next_billing_date, subscriptions_monthly_total, upcoming_subscriptions,
};
use crate::api::ApiClient;
use crate::forms::SubscriptionForm;
use crate::services::subscriptions;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(api: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, sub)?,
        Some(("add", sub)) => add(api, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            subscriptions::delete(api, id)?;
            println!("Removed subscription {}", id);
        }
        Some(("upcoming", sub)) => upcoming(api, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let form = SubscriptionForm {
        name: sub.get_one::<String>("name").unwrap(),
        amount: sub.get_one::<String>("amount").unwrap(),
        cycle: sub.get_one::<String>("cycle").unwrap(),
        billing_day: *sub.get_one::<u32>("day").unwrap(),
        billing_month: sub.get_one::<u32>("billing_month").copied(),
        category_id: sub.get_one::<String>("category").map(String::as_str),
        credit_card_id: sub.get_one::<String>("card").map(String::as_str),
    };
    let new_sub = form.validate()?;
    let created = subscriptions::create(api, &new_sub)?;
    println!(
        "Added subscription '{}' {} {} (id {})",
        created.name,
        fmt_money(&created.amount),
        created.billing_cycle.as_str(),
        created.id
    );
    Ok(())
}

fn list(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let items = subscriptions::list(api)?;
    if maybe_print_json(json_flag, jsonl_flag, &items)? {
        return Ok(());
    }
    let today = chrono::Local::now().date_naive();
    let data = items
        .iter()
        .map(|s| {
            let next = s
                .next_billing_date
                .or_else(|| next_billing_date(s, today))
                .map(|d| d.to_string())
                .unwrap_or_default();
            vec![
                s.id.clone(),
                s.name.clone(),
                fmt_money(&s.amount),
                s.billing_cycle.as_str().to_string(),
                next,
                fmt_money(&monthly_cost(s)),
                if s.active { "yes".into() } else { "no".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Amount", "Cycle", "Next", "Per month", "Active"],
            data
        )
    );
    println!(
        "Active subscriptions cost {} per month",
        fmt_money(&subscriptions_monthly_total(&items))
    );
    Ok(())
}

fn upcoming(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let days = *sub.get_one::<i64>("days").unwrap_or(&30);
    let items = subscriptions::list(api)?;
    let today = chrono::Local::now().date_naive();
    let due = upcoming_subscriptions(&items, today, days);
    if !maybe_print_json(json_flag, jsonl_flag, &due)? {
        let data = due
            .iter()
            .map(|u| vec![u.date.to_string(), u.name.clone(), fmt_money(&u.amount)])
            .collect();
        println!("{}", pretty_table(&["Date", "Subscription", "Amount"], data));
    }
    Ok(())
}
