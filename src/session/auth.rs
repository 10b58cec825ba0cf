// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use crate::api::{ApiRequest, Transport, decode_response};
use crate::error::ApiError;
use crate::models::AuthPayload;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The unauthenticated side of the API. These calls never go through the
/// 401 refresh-and-retry path.
pub trait Authenticator: Send + Sync {
    fn login(&self, creds: &Credentials) -> Result<AuthPayload, ApiError>;
    fn register(&self, registration: &Registration) -> Result<AuthPayload, ApiError>;
    fn refresh(&self, refresh_token: &str) -> Result<AuthPayload, ApiError>;
    fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), ApiError>;
    fn forgot_password(&self, email: &str) -> Result<(), ApiError>;
}

pub struct HttpAuthenticator {
    transport: Arc<dyn Transport>,
}

impl HttpAuthenticator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    fn post<T: serde::de::DeserializeOwned>(&self, req: ApiRequest) -> Result<T, ApiError> {
        let resp = self.transport.send(&req)?;
        decode_response(resp)
    }
}

impl Authenticator for HttpAuthenticator {
    fn login(&self, creds: &Credentials) -> Result<AuthPayload, ApiError> {
        self.post(ApiRequest::post("/auth/login").json(creds)?)
    }

    fn register(&self, registration: &Registration) -> Result<AuthPayload, ApiError> {
        self.post(ApiRequest::post("/auth/register").json(registration)?)
    }

    fn refresh(&self, refresh_token: &str) -> Result<AuthPayload, ApiError> {
        self.post(
            ApiRequest::post("/auth/refresh").json(&json!({ "refreshToken": refresh_token }))?,
        )
    }

    fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), ApiError> {
        let mut req =
            ApiRequest::post("/auth/logout").json(&json!({ "refreshToken": refresh_token }))?;
        req.bearer = Some(access_token.to_string());
        self.post::<Value>(req).map(|_| ())
    }

    fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.post::<Value>(
            ApiRequest::post("/auth/forgot-password").json(&json!({ "email": email }))?,
        )
        .map(|_| ())
    }
}
