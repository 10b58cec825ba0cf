// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneydash::analytics::{
    BudgetStatus, TransactionFilter, monthly_cost, next_billing_date, paginate,
    subscriptions_monthly_total, transaction_stats, upcoming_subscriptions, usage,
};
use moneydash::models::{Subscription, Transaction, TransactionType};
use rust_decimal::Decimal;
use serde_json::json;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn txs() -> Vec<Transaction> {
    serde_json::from_value(json!([
        {"id": 1, "description": "Salary", "amount": "3000", "type": "income", "date": "2025-03-01"},
        {"id": 2, "description": "Rent", "amount": "1200", "type": "expense", "date": "2025-03-02",
         "categoryId": "c1", "category": {"id": "c1", "name": "Housing"}},
        {"id": 3, "description": "Market", "amount": "150.25", "type": "expense", "date": "2025-03-05",
         "categoryId": "c2", "category": {"id": "c2", "name": "Food"}, "notes": "veggies"},
        {"id": 4, "description": "Bakery", "amount": "", "type": "expense", "date": "2025-03-09",
         "categoryId": "c2", "category": {"id": "c2", "name": "Food"}},
        {"id": 5, "description": "Gift", "amount": 40, "type": "expense", "date": "2025-03-10"}
    ]))
    .unwrap()
}

fn sub(cycle: &str, day: u32, month: Option<u32>) -> Subscription {
    serde_json::from_value(json!({
        "id": format!("{}-{}", cycle, day), "name": format!("{} {}", cycle, day), "amount": "12.00",
        "billingCycle": cycle, "billingDay": day, "billingMonth": month
    }))
    .unwrap()
}

#[test]
fn filter_by_search_type_and_dates() {
    let items = txs();
    let f = TransactionFilter {
        search: Some("VEG".into()),
        ..Default::default()
    };
    let hits: Vec<_> = f.apply(&items).iter().map(|t| t.id.clone()).collect();
    assert_eq!(hits, vec!["3"]);

    let f = TransactionFilter {
        search: Some("food".into()),
        ..Default::default()
    };
    assert_eq!(f.apply(&items).len(), 2);

    let f = TransactionFilter {
        kind: Some(TransactionType::Expense),
        from: Some(d(2025, 3, 2)),
        to: Some(d(2025, 3, 9)),
        ..Default::default()
    };
    assert_eq!(f.apply(&items).len(), 3);

    let f = TransactionFilter {
        category_id: Some("c1".into()),
        search: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(f.apply(&items).len(), 1);
}

#[test]
fn stats_totals_and_categories() {
    let items = txs();
    let s = transaction_stats(&items);
    assert_eq!(s.income, dec("3000"));
    assert_eq!(s.expenses, dec("1390.25"));
    assert_eq!(s.balance, dec("1609.75"));
    assert_eq!(s.count, 5);
    let cats: Vec<_> = s
        .expenses_by_category
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(cats, vec!["Housing", "Food", "Uncategorized"]);
    assert_eq!(s.expenses_by_category[1].total, dec("150.25"));
}

#[test]
fn pagination_clamps() {
    let items: Vec<u32> = (1..=45).collect();
    let p = paginate(&items, 3, 20);
    assert_eq!(p.items, (41..=45).collect::<Vec<_>>());
    assert_eq!(p.total_pages, 3);
    assert_eq!(paginate(&items, 0, 20).page, 1);
    assert_eq!(paginate(&items, 9, 20).page, 3);

    let empty: Vec<u32> = Vec::new();
    let p = paginate(&empty, 2, 10);
    assert_eq!(p.page, 1);
    assert_eq!(p.total_pages, 1);
    assert!(p.items.is_empty());
}

#[test]
fn budget_usage_thresholds() {
    let u = usage(dec("50"), dec("200"));
    assert_eq!(u.percent, dec("25"));
    assert_eq!(u.status, BudgetStatus::OnTrack);
    assert_eq!(u.remaining, dec("150"));

    assert_eq!(usage(dec("160"), dec("200")).status, BudgetStatus::Warning);
    assert_eq!(usage(dec("200"), dec("200")).status, BudgetStatus::Warning);
    let over = usage(dec("201"), dec("200"));
    assert_eq!(over.status, BudgetStatus::Exceeded);
    assert_eq!(over.percent, dec("100.5"));
    assert_eq!(over.remaining, dec("-1"));

    let zero = usage(dec("10"), Decimal::ZERO);
    assert_eq!(zero.percent, Decimal::ZERO);
    assert_eq!(zero.status, BudgetStatus::OnTrack);
}

#[test]
fn monthly_billing_clamps_to_short_months() {
    let s = sub("monthly", 31, None);
    assert_eq!(next_billing_date(&s, d(2025, 2, 10)), Some(d(2025, 2, 28)));
    assert_eq!(next_billing_date(&s, d(2024, 2, 10)), Some(d(2024, 2, 29)));
    assert_eq!(next_billing_date(&s, d(2025, 1, 31)), Some(d(2025, 1, 31)));

    let s = sub("monthly", 5, None);
    assert_eq!(next_billing_date(&s, d(2025, 12, 6)), Some(d(2026, 1, 5)));
}

#[test]
fn weekly_and_yearly_billing() {
    // 2025-03-05 is a Wednesday.
    let monday = sub("weekly", 1, None);
    assert_eq!(next_billing_date(&monday, d(2025, 3, 5)), Some(d(2025, 3, 10)));
    let wednesday = sub("weekly", 3, None);
    assert_eq!(next_billing_date(&wednesday, d(2025, 3, 5)), Some(d(2025, 3, 5)));

    let leap = sub("yearly", 29, Some(2));
    assert_eq!(next_billing_date(&leap, d(2025, 1, 1)), Some(d(2025, 2, 28)));
    assert_eq!(next_billing_date(&leap, d(2025, 3, 1)), Some(d(2026, 2, 28)));
    assert_eq!(next_billing_date(&sub("yearly", 1, None), d(2025, 1, 1)), None);
}

#[test]
fn monthly_cost_normalizes_cycles() {
    assert_eq!(monthly_cost(&sub("weekly", 1, None)), dec("52.00"));
    assert_eq!(monthly_cost(&sub("yearly", 1, Some(1))), dec("1.00"));
    let subs = vec![
        sub("monthly", 1, None),
        sub("yearly", 1, Some(1)),
        Subscription {
            active: false,
            ..sub("monthly", 2, None)
        },
    ];
    assert_eq!(subscriptions_monthly_total(&subs), dec("13.00"));
}

#[test]
fn upcoming_sorted_within_horizon() {
    let subs = vec![
        sub("monthly", 20, None),
        sub("monthly", 7, None),
        sub("yearly", 1, Some(9)),
    ];
    let up = upcoming_subscriptions(&subs, d(2025, 3, 5), 30);
    let dates: Vec<_> = up.iter().map(|u| u.date).collect();
    assert_eq!(dates, vec![d(2025, 3, 7), d(2025, 3, 20)]);
}

#[test]
fn spending_just_over_budget_is_exceeded() {
    let u = usage(dec("1000.40"), dec("1000"));
    assert_eq!(u.status, BudgetStatus::Exceeded);
    assert_eq!(u.percent, dec("100.0"));
    assert_eq!(u.remaining, dec("-0.40"));

    let edge = usage(dec("79.96"), dec("100"));
    assert_eq!(edge.status, BudgetStatus::OnTrack);
    assert_eq!(edge.percent, dec("80.0"));
}

#[test]
fn huge_horizons_do_not_overflow() {
    let subs = vec![sub("monthly", 20, None), sub("yearly", 1, Some(9))];
    let all = upcoming_subscriptions(&subs, d(2025, 3, 1), 1_000_000_000);
    assert_eq!(all.len(), 2);
    assert!(upcoming_subscriptions(&subs, d(2025, 3, 1), i64::MIN).is_empty());
}
