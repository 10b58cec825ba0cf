// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::SessionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    Home,
    Transactions,
    Budgets,
    Subscriptions,
    CreditCards,
    Notifications,
    Workspaces,
    Session,
}

impl Route {
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::ForgotPassword)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ForgotPassword => "/forgot-password",
            Route::Home => "/",
            Route::Transactions => "/transactions",
            Route::Budgets => "/budgets",
            Route::Subscriptions => "/subscriptions",
            Route::CreditCards => "/credit-cards",
            Route::Notifications => "/notifications",
            Route::Workspaces => "/workspaces",
            Route::Session => "/session",
        }
    }

    /// Which screen a top-level command stands for.
    pub fn for_command(name: &str) -> Option<Route> {
        Some(match name {
            "login" => Route::Login,
            "register" => Route::Register,
            "forgot-password" => Route::ForgotPassword,
            "dashboard" | "whoami" => Route::Home,
            "tx" => Route::Transactions,
            "budget" => Route::Budgets,
            "sub" => Route::Subscriptions,
            "card" => Route::CreditCards,
            "notify" => Route::Notifications,
            "workspace" => Route::Workspaces,
            "session" | "logout" => Route::Session,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Render,
    Redirect(Route),
}

pub fn guard(route: Route, status: SessionStatus) -> GuardDecision {
    match status {
        SessionStatus::Loading => GuardDecision::Loading,
        SessionStatus::Unauthenticated if !route.is_public() => GuardDecision::Redirect(Route::Login),
        SessionStatus::Authenticated if route.is_public() => GuardDecision::Redirect(Route::Home),
        _ => GuardDecision::Render,
    }
}
