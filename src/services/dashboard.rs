// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::DashboardSummary;

pub fn summary(api: &ApiClient, month: Option<&str>) -> Result<DashboardSummary, ApiError> {
    let mut req = ApiRequest::get("/dashboard");
    if let Some(m) = month {
        req = req.query("month", m);
    }
    api.execute(req)
}
