// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{NewSubscription, Subscription};

pub fn list(api: &ApiClient) -> Result<Vec<Subscription>, ApiError> {
    super::fetch_list(api, ApiRequest::get("/subscriptions"))
}

pub fn create(api: &ApiClient, sub: &NewSubscription) -> Result<Subscription, ApiError> {
    api.post("/subscriptions", sub)
}

pub fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.delete(&format!("/subscriptions/{}", id))
}
