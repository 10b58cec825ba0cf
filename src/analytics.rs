// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over lists already fetched from the API.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BillingCycle, Budget, Subscription, Transaction, TransactionType};
use crate::utils::last_day_of_month;

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub search: Option<String>,
    pub kind: Option<TransactionType>,
    pub category_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if t.kind != kind {
                return false;
            }
        }
        if let Some(cat) = &self.category_id {
            if t.category_id.as_deref() != Some(cat.as_str()) {
                return false;
            }
        }
        if self.from.is_some_and(|from| t.date < from) || self.to.is_some_and(|to| t.date > to) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                t.description.to_lowercase().contains(&q)
                    || t.notes
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&q))
                    || t.category_name().to_lowercase().contains(&q)
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, items: &'a [Transaction]) -> Vec<&'a Transaction> {
        items.iter().filter(|t| self.matches(t)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// 1-based. Page 0 reads as page 1; pages past the end clamp to the last.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionStats {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub count: usize,
    pub expenses_by_category: Vec<CategoryTotal>,
}

pub fn transaction_stats<'a, I>(items: I) -> TransactionStats
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut count = 0;
    let mut by_cat: HashMap<String, Decimal> = HashMap::new();
    for t in items {
        count += 1;
        let amt = t.amount.abs();
        match t.kind {
            TransactionType::Income => income += amt,
            TransactionType::Expense => {
                expenses += amt;
                let name = match t.category_name() {
                    "" => "Uncategorized".to_string(),
                    n => n.to_string(),
                };
                *by_cat.entry(name).or_insert(Decimal::ZERO) += amt;
            }
        }
    }
    let mut expenses_by_category: Vec<CategoryTotal> = by_cat
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    expenses_by_category.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
    TransactionStats {
        income,
        expenses,
        balance: income - expenses,
        count,
        expenses_by_category,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "on track",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub percent: Decimal,
    pub remaining: Decimal,
    pub status: BudgetStatus,
}

const WARNING_PERCENT: i64 = 80;

pub fn budget_usage(budget: &Budget) -> BudgetUsage {
    usage(budget.spent, budget.amount)
}

pub fn usage(spent: Decimal, amount: Decimal) -> BudgetUsage {
    let raw = if amount.is_zero() {
        Decimal::ZERO
    } else {
        spent / amount * Decimal::ONE_HUNDRED
    };
    // Classify before rounding so 100.04 % still counts as exceeded.
    let status = if raw > Decimal::ONE_HUNDRED {
        BudgetStatus::Exceeded
    } else if raw >= Decimal::from(WARNING_PERCENT) {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OnTrack
    };
    BudgetUsage {
        percent: raw.round_dp(1),
        remaining: amount - spent,
        status,
    }
}

/// First billing date on or after `from`. Monthly days past the end of a
/// short month fall on its last day; weekly `billing_day` is 1 = Monday.
pub fn next_billing_date(sub: &Subscription, from: NaiveDate) -> Option<NaiveDate> {
    match sub.billing_cycle {
        BillingCycle::Weekly => {
            let target = sub.billing_day.checked_sub(1)?;
            if target > 6 {
                return None;
            }
            let today = from.weekday().num_days_from_monday();
            let ahead = (target + 7 - today) % 7;
            from.checked_add_signed(Duration::days(ahead as i64))
        }
        BillingCycle::Monthly => {
            let this_month = clamp_day(from.year(), from.month(), sub.billing_day);
            if this_month >= from {
                return Some(this_month);
            }
            let (y, m) = if from.month() == 12 {
                (from.year() + 1, 1)
            } else {
                (from.year(), from.month() + 1)
            };
            Some(clamp_day(y, m, sub.billing_day))
        }
        BillingCycle::Yearly => {
            let month = sub.billing_month?;
            if !(1..=12).contains(&month) {
                return None;
            }
            let this_year = clamp_day(from.year(), month, sub.billing_day);
            if this_year >= from {
                Some(this_year)
            } else {
                Some(clamp_day(from.year() + 1, month, sub.billing_day))
            }
        }
    }
}

fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let last = last_day_of_month(year, month);
    NaiveDate::from_ymd_opt(year, month, day.max(1)).unwrap_or(last)
}

/// What a subscription costs per month, for comparing cycles.
pub fn monthly_cost(sub: &Subscription) -> Decimal {
    match sub.billing_cycle {
        BillingCycle::Weekly => (sub.amount * Decimal::new(52, 0) / Decimal::new(12, 0)).round_dp(2),
        BillingCycle::Monthly => sub.amount,
        BillingCycle::Yearly => (sub.amount / Decimal::new(12, 0)).round_dp(2),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Upcoming {
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Active subscriptions billing within `days` of `today`, soonest first.
/// A horizon past the calendar's range means no upper bound.
pub fn upcoming_subscriptions(subs: &[Subscription], today: NaiveDate, days: i64) -> Vec<Upcoming> {
    let horizon = Duration::try_days(days)
        .and_then(|d| today.checked_add_signed(d))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
    let mut out: Vec<Upcoming> = subs
        .iter()
        .filter(|s| s.active)
        .filter_map(|s| {
            let date = next_billing_date(s, today)?;
            (date <= horizon).then(|| Upcoming {
                name: s.name.clone(),
                amount: s.amount,
                date,
            })
        })
        .collect();
    out.sort_by(|a, b| a.date.cmp(&b.date).then(a.name.cmp(&b.name)));
    out
}

/// Total monthly cost of active subscriptions.
pub fn subscriptions_monthly_total(subs: &[Subscription]) -> Decimal {
    subs.iter().filter(|s| s.active).map(monthly_cost).sum()
}
