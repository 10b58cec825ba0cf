// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The one HTTP client every service goes through.
//!
//! Requests get the bearer token and selected workspace attached, responses
//! are unwrapped from the API envelope, and a 401 triggers a single
//! refresh-and-retry through the [`SessionManager`].

pub mod envelope;

use std::sync::{Arc, RwLock};

use log::debug;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;
use crate::session::{RefreshTrigger, SessionManager};
use crate::utils::UA;

pub use envelope::{error_message, unwrap_envelope};

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
    pub workspace_id: Option<String>,
    /// Set once the request has been replayed after a refresh.
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            workspace_id: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

pub trait Transport: Send + Sync {
    fn send(&self, req: &ApiRequest) -> Result<RawResponse, ApiError>;
}

pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(cfg: &Config) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(UA)
            .build()?;
        Ok(Self {
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, req: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, req.path);
        debug!("{} {}", req.method, url);
        let mut rb = self.client.request(req.method.clone(), &url);
        if !req.query.is_empty() {
            rb = rb.query(&req.query);
        }
        if let Some(token) = &req.bearer {
            rb = rb.bearer_auth(token);
        }
        if let Some(ws) = &req.workspace_id {
            rb = rb.header("X-Workspace-Id", ws);
        }
        if let Some(body) = &req.body {
            rb = rb.json(body);
        }
        let resp = rb.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(RawResponse { status, body })
    }
}

/// Turn a raw response into `T`, or into a readable [`ApiError`].
pub fn decode_response<T: DeserializeOwned>(resp: RawResponse) -> Result<T, ApiError> {
    let parsed: Option<Value> = if resp.body.trim().is_empty() {
        Some(Value::Null)
    } else {
        serde_json::from_str(&resp.body).ok()
    };

    if !(200..300).contains(&resp.status) {
        if resp.status == 401 {
            return Err(ApiError::Unauthorized);
        }
        let message = parsed
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| envelope::fallback_message(resp.status));
        return Err(ApiError::Api {
            status: resp.status,
            message,
        });
    }

    let body = parsed.ok_or_else(|| ApiError::Decode("response is not JSON".into()))?;
    let data = unwrap_envelope(body).map_err(|message| ApiError::Api {
        status: resp.status,
        message: message.unwrap_or_else(|| envelope::fallback_message(resp.status)),
    })?;
    Ok(serde_json::from_value(data)?)
}

pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
    workspace: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionManager>) -> Self {
        Self {
            transport,
            session,
            workspace: RwLock::new(None),
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn set_workspace(&self, id: Option<String>) {
        let mut ws = self.workspace.write().unwrap_or_else(|e| e.into_inner());
        *ws = id;
    }

    pub fn workspace(&self) -> Option<String> {
        self.workspace
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn execute<T: DeserializeOwned>(&self, mut req: ApiRequest) -> Result<T, ApiError> {
        req.bearer = self.session.access_token();
        req.workspace_id = self.workspace();
        let resp = self.transport.send(&req)?;
        if resp.status != 401 || req.retried {
            return decode_response(resp);
        }

        debug!("{} {} got 401, refreshing", req.method, req.path);
        let token = self.session.refresh(RefreshTrigger::Unauthorized)?;
        req.bearer = Some(token);
        req.retried = true;
        let resp = self.transport.send(&req)?;
        decode_response(resp)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::get(path))
    }

    pub fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(ApiRequest::post(path).json(body)?)
    }

    pub fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(ApiRequest::patch(path).json(body)?)
    }

    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute::<Value>(ApiRequest::delete(path)).map(|_| ())
    }
}
