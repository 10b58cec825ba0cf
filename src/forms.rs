// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input checks that run before anything is sent. A form that fails here
//! never reaches the network.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{
    BillingCycle, NewBudget, NewCreditCard, NewSubscription, NewTransaction, TransactionType,
};
use crate::session::{Credentials, Registration};
use crate::utils::{last_day_of_month, parse_currency, parse_date, parse_month};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

fn required(errors: &mut FormErrors, field: &'static str, value: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        errors.add(field, "is required");
    }
    v.to_string()
}

fn positive_amount(errors: &mut FormErrors, field: &'static str, raw: &str) -> Decimal {
    match parse_currency(raw) {
        Ok(v) if v > Decimal::ZERO => v,
        Ok(_) => {
            errors.add(field, "must be greater than zero");
            Decimal::ZERO
        }
        Err(_) => {
            errors.add(field, "is not a valid amount");
            Decimal::ZERO
        }
    }
}

fn day_in_range(errors: &mut FormErrors, field: &'static str, day: u32, max: u32) {
    if !(1..=max).contains(&day) {
        errors.add(field, format!("must be between 1 and {}", max));
    }
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default)]
pub struct TransactionForm<'a> {
    pub description: &'a str,
    pub amount: &'a str,
    pub kind: &'a str,
    pub date: &'a str,
    pub category_id: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl TransactionForm<'_> {
    pub fn validate(&self) -> Result<NewTransaction, FormErrors> {
        let mut errors = FormErrors::default();
        let description = required(&mut errors, "description", self.description);
        let amount = positive_amount(&mut errors, "amount", self.amount);
        let kind = self.kind.parse::<TransactionType>().unwrap_or_else(|_| {
            errors.add("type", "must be income or expense");
            TransactionType::Expense
        });
        let date = parse_date(self.date).unwrap_or_else(|_| {
            errors.add("date", "must be a date (YYYY-MM-DD)");
            NaiveDate::MIN
        });
        errors.into_result(|| NewTransaction {
            description,
            amount,
            kind,
            date,
            category_id: optional(self.category_id),
            notes: optional(self.notes),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionForm<'a> {
    pub name: &'a str,
    pub amount: &'a str,
    pub cycle: &'a str,
    pub billing_day: u32,
    pub billing_month: Option<u32>,
    pub category_id: Option<&'a str>,
    pub credit_card_id: Option<&'a str>,
}

impl SubscriptionForm<'_> {
    pub fn validate(&self) -> Result<NewSubscription, FormErrors> {
        let mut errors = FormErrors::default();
        let name = required(&mut errors, "name", self.name);
        let amount = positive_amount(&mut errors, "amount", self.amount);
        let cycle = match self.cycle.parse::<BillingCycle>() {
            Ok(c) => Some(c),
            Err(_) => {
                errors.add("billingCycle", "must be weekly, monthly or yearly");
                None
            }
        };
        let mut billing_month = None;
        match cycle {
            Some(BillingCycle::Weekly) => day_in_range(&mut errors, "billingDay", self.billing_day, 7),
            Some(BillingCycle::Monthly) => {
                day_in_range(&mut errors, "billingDay", self.billing_day, 31)
            }
            Some(BillingCycle::Yearly) => match self.billing_month {
                Some(m) if (1..=12).contains(&m) => {
                    // Leap day is allowed; non-leap years bill on the 28th.
                    let max = last_day_of_month(2024, m).day();
                    day_in_range(&mut errors, "billingDay", self.billing_day, max);
                    billing_month = Some(m);
                }
                Some(_) => errors.add("billingMonth", "must be between 1 and 12"),
                None => errors.add("billingMonth", "is required for yearly billing"),
            },
            None => {}
        }
        errors.into_result(|| NewSubscription {
            name,
            amount,
            billing_cycle: cycle.unwrap_or(BillingCycle::Monthly),
            billing_day: self.billing_day,
            billing_month,
            category_id: optional(self.category_id),
            credit_card_id: optional(self.credit_card_id),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetForm<'a> {
    pub name: &'a str,
    pub amount: &'a str,
    pub category_id: Option<&'a str>,
    pub month: Option<&'a str>,
}

impl BudgetForm<'_> {
    pub fn validate(&self) -> Result<NewBudget, FormErrors> {
        let mut errors = FormErrors::default();
        let name = required(&mut errors, "name", self.name);
        let amount = positive_amount(&mut errors, "amount", self.amount);
        let month = match optional(self.month) {
            Some(m) => match parse_month(&m) {
                Ok(m) => Some(m),
                Err(_) => {
                    errors.add("month", "must be a month (YYYY-MM)");
                    None
                }
            },
            None => None,
        };
        errors.into_result(|| NewBudget {
            name,
            amount,
            category_id: optional(self.category_id),
            month,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreditCardForm<'a> {
    pub name: &'a str,
    pub last_four: &'a str,
    pub limit: &'a str,
    pub closing_day: u32,
    pub due_day: u32,
}

impl CreditCardForm<'_> {
    pub fn validate(&self) -> Result<NewCreditCard, FormErrors> {
        let mut errors = FormErrors::default();
        let name = required(&mut errors, "name", self.name);
        let last_four = self.last_four.trim().to_string();
        if last_four.len() != 4 || !last_four.chars().all(|c| c.is_ascii_digit()) {
            errors.add("lastFour", "must be exactly four digits");
        }
        let limit = positive_amount(&mut errors, "limit", self.limit);
        day_in_range(&mut errors, "closingDay", self.closing_day, 31);
        day_in_range(&mut errors, "dueDay", self.due_day, 31);
        errors.into_result(|| NewCreditCard {
            name,
            last_four,
            limit,
            closing_day: self.closing_day,
            due_day: self.due_day,
        })
    }
}

fn check_email(errors: &mut FormErrors, email: &str) -> String {
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "is required");
    } else if !email.contains('@') {
        errors.add("email", "is not a valid email");
    }
    email.to_string()
}

pub fn login_form(email: &str, password: &str) -> Result<Credentials, FormErrors> {
    let mut errors = FormErrors::default();
    let email = check_email(&mut errors, email);
    if password.is_empty() {
        errors.add("password", "is required");
    }
    errors.into_result(|| Credentials {
        email,
        password: password.to_string(),
    })
}

pub fn register_form(name: &str, email: &str, password: &str) -> Result<Registration, FormErrors> {
    let mut errors = FormErrors::default();
    let name = required(&mut errors, "name", name);
    let email = check_email(&mut errors, email);
    if password.chars().count() < 8 {
        errors.add("password", "must be at least 8 characters");
    }
    errors.into_result(|| Registration {
        name,
        email,
        password: password.to_string(),
    })
}

pub fn forgot_password_form(email: &str) -> Result<String, FormErrors> {
    let mut errors = FormErrors::default();
    let email = check_email(&mut errors, email);
    errors.into_result(|| email)
}
