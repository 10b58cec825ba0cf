// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{Budget, NewBudget};

pub fn list(api: &ApiClient, month: Option<&str>) -> Result<Vec<Budget>, ApiError> {
    let mut req = ApiRequest::get("/budgets");
    if let Some(m) = month {
        req = req.query("month", m);
    }
    super::fetch_list(api, req)
}

pub fn create(api: &ApiClient, budget: &NewBudget) -> Result<Budget, ApiError> {
    api.post("/budgets", budget)
}

pub fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.delete(&format!("/budgets/{}", id))
}
