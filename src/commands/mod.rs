// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod budgets;
pub mod cards;
pub mod dashboard;
pub mod exporter;
pub mod notifications;
pub mod session;
pub mod subscriptions;
pub mod transactions;
pub mod workspaces;
