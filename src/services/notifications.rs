// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::{Value, json};

use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::Notification;

pub fn list(api: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    super::fetch_list(api, ApiRequest::get("/notifications"))
}

pub fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.read).count()
}

pub fn mark_read(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.patch::<Value, _>(&format!("/notifications/{}/read", id), &json!({}))
        .map(|_| ())
}

pub fn mark_all_read(api: &ApiClient) -> Result<(), ApiError> {
    api.patch::<Value, _>("/notifications/read-all", &json!({}))
        .map(|_| ())
}
