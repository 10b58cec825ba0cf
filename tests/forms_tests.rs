// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneydash::forms::{
    BudgetForm, CreditCardForm, SubscriptionForm, TransactionForm, forgot_password_form,
    login_form, register_form,
};
use moneydash::models::{BillingCycle, TransactionType};
use rust_decimal::Decimal;

fn sub_form<'a>(cycle: &'a str, day: u32, month: Option<u32>) -> SubscriptionForm<'a> {
    SubscriptionForm {
        name: "Streaming",
        amount: "9.99",
        cycle,
        billing_day: day,
        billing_month: month,
        ..Default::default()
    }
}

#[test]
fn transaction_form_accepts_formatted_amount() {
    let tx = TransactionForm {
        description: "  Groceries ",
        amount: "$1,234.56",
        kind: "Expense",
        date: "2025-03-02",
        category_id: Some(" "),
        notes: Some("weekly run"),
    }
    .validate()
    .unwrap();
    assert_eq!(tx.description, "Groceries");
    assert_eq!(tx.amount, Decimal::new(123456, 2));
    assert_eq!(tx.kind, TransactionType::Expense);
    assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    assert_eq!(tx.category_id, None);
    assert_eq!(tx.notes.as_deref(), Some("weekly run"));
}

#[test]
fn transaction_form_collects_every_problem() {
    let errs = TransactionForm {
        description: "",
        amount: "-5",
        kind: "transfer",
        date: "02/03/2025",
        ..Default::default()
    }
    .validate()
    .unwrap_err();
    assert_eq!(errs.len(), 4);
    assert_eq!(errs.get("description"), Some("is required"));
    assert_eq!(errs.get("amount"), Some("must be greater than zero"));
    assert!(errs.get("type").is_some());
    assert!(errs.get("date").is_some());
}

#[test]
fn unparsable_amount_is_reported() {
    let errs = TransactionForm {
        description: "x",
        amount: "abc",
        kind: "income",
        date: "2025-01-01",
        ..Default::default()
    }
    .validate()
    .unwrap_err();
    assert_eq!(errs.get("amount"), Some("is not a valid amount"));
    assert_eq!(errs.to_string(), "amount: is not a valid amount");
}

#[test]
fn weekly_billing_day_is_a_weekday() {
    assert!(sub_form("weekly", 7, None).validate().is_ok());
    let errs = sub_form("weekly", 8, None).validate().unwrap_err();
    assert_eq!(errs.get("billingDay"), Some("must be between 1 and 7"));
}

#[test]
fn monthly_billing_day_within_31() {
    let s = sub_form("monthly", 31, None).validate().unwrap();
    assert_eq!(s.billing_cycle, BillingCycle::Monthly);
    assert_eq!(s.billing_month, None);
    assert!(sub_form("monthly", 0, None).validate().is_err());
    assert!(sub_form("monthly", 32, None).validate().is_err());
}

#[test]
fn monthly_ignores_stray_billing_month() {
    let s = sub_form("monthly", 15, Some(4)).validate().unwrap();
    assert_eq!(s.billing_month, None);
}

#[test]
fn yearly_needs_month_and_fitting_day() {
    let errs = sub_form("yearly", 10, None).validate().unwrap_err();
    assert_eq!(errs.get("billingMonth"), Some("is required for yearly billing"));

    assert!(sub_form("yearly", 10, Some(13)).validate().is_err());
    assert!(sub_form("yearly", 29, Some(2)).validate().is_ok());
    let errs = sub_form("yearly", 30, Some(2)).validate().unwrap_err();
    assert_eq!(errs.get("billingDay"), Some("must be between 1 and 29"));
    assert!(sub_form("yearly", 31, Some(4)).validate().is_err());

    let s = sub_form("annual", 31, Some(12)).validate().unwrap();
    assert_eq!(s.billing_cycle, BillingCycle::Yearly);
    assert_eq!(s.billing_month, Some(12));
}

#[test]
fn unknown_cycle_rejected() {
    let errs = sub_form("daily", 1, None).validate().unwrap_err();
    assert!(errs.get("billingCycle").is_some());
    assert_eq!(errs.len(), 1);
}

#[test]
fn budget_form_checks_month() {
    let b = BudgetForm {
        name: "Food",
        amount: "300",
        category_id: Some("c1"),
        month: Some("2025-04"),
    }
    .validate()
    .unwrap();
    assert_eq!(b.month.as_deref(), Some("2025-04"));
    assert_eq!(b.category_id.as_deref(), Some("c1"));

    let errs = BudgetForm {
        name: "Food",
        amount: "300",
        month: Some("2025-13"),
        ..Default::default()
    }
    .validate()
    .unwrap_err();
    assert!(errs.get("month").is_some());
}

#[test]
fn credit_card_form_rules() {
    let c = CreditCardForm {
        name: "Visa",
        last_four: "4242",
        limit: "5.000,00",
        closing_day: 25,
        due_day: 5,
    }
    .validate()
    .unwrap();
    assert_eq!(c.limit, Decimal::new(5000, 0));

    let errs = CreditCardForm {
        name: "Visa",
        last_four: "42a2",
        limit: "0",
        closing_day: 0,
        due_day: 32,
    }
    .validate()
    .unwrap_err();
    assert_eq!(errs.len(), 4);
    assert!(errs.get("lastFour").is_some());
    assert!(errs.get("limit").is_some());
    assert!(errs.get("closingDay").is_some());
    assert!(errs.get("dueDay").is_some());
}

#[test]
fn auth_forms() {
    let creds = login_form(" ana@example.com ", "pw").unwrap();
    assert_eq!(creds.email, "ana@example.com");
    assert!(login_form("ana", "pw").unwrap_err().get("email").is_some());
    assert!(login_form("ana@example.com", "").unwrap_err().get("password").is_some());

    assert!(register_form("Ana", "ana@example.com", "longenough").is_ok());
    let errs = register_form("", "ana@example.com", "short").unwrap_err();
    assert_eq!(errs.get("name"), Some("is required"));
    assert_eq!(errs.get("password"), Some("must be at least 8 characters"));

    assert_eq!(forgot_password_form("a@b.c").unwrap(), "a@b.c");
    assert_eq!(
        forgot_password_form("").unwrap_err().get("email"),
        Some("is required")
    );
}

#[test]
fn minus_inside_amount_is_invalid() {
    let errs = TransactionForm {
        description: "x",
        amount: "1-2",
        kind: "expense",
        date: "2025-01-01",
        ..Default::default()
    }
    .validate()
    .unwrap_err();
    assert_eq!(errs.get("amount"), Some("is not a valid amount"));
}
