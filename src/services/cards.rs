// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{CreditCard, NewCreditCard};

pub fn list(api: &ApiClient) -> Result<Vec<CreditCard>, ApiError> {
    super::fetch_list(api, ApiRequest::get("/credit-cards"))
}

pub fn create(api: &ApiClient, card: &NewCreditCard) -> Result<CreditCard, ApiError> {
    api.post("/credit-cards", card)
}

pub fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.delete(&format!("/credit-cards/{}", id))
}
