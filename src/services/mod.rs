// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Thin wrappers over the API endpoints. Each call goes through
//! [`ApiClient`], so auth, workspace scoping and error envelopes are handled
//! there.

pub mod budgets;
pub mod cards;
pub mod dashboard;
pub mod notifications;
pub mod subscriptions;
pub mod transactions;
pub mod workspaces;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;

// Lists come back bare or as { items: [...] } depending on the endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "data", alias = "results")]
        items: Vec<T>,
    },
}

pub(crate) fn fetch_list<T: DeserializeOwned>(
    api: &ApiClient,
    req: ApiRequest,
) -> Result<Vec<T>, ApiError> {
    let payload: ListPayload<T> = api.execute(req)?;
    Ok(match payload {
        ListPayload::Bare(items) => items,
        ListPayload::Wrapped { items } => items,
    })
}
