// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use log::info;
use serde_json::json;

use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{Member, Workspace};
use crate::session::store::WORKSPACE_KEY;

pub fn list(api: &ApiClient) -> Result<Vec<Workspace>, ApiError> {
    super::fetch_list(api, ApiRequest::get("/workspaces"))
}

pub fn create(api: &ApiClient, name: &str) -> Result<Workspace, ApiError> {
    api.post("/workspaces", &json!({ "name": name }))
}

pub fn members(api: &ApiClient, workspace_id: &str) -> Result<Vec<Member>, ApiError> {
    super::fetch_list(
        api,
        ApiRequest::get(format!("/workspaces/{}/members", workspace_id)),
    )
}

pub fn invite(
    api: &ApiClient,
    workspace_id: &str,
    email: &str,
    role: &str,
) -> Result<Member, ApiError> {
    api.post(
        &format!("/workspaces/{}/members", workspace_id),
        &json!({ "email": email, "role": role }),
    )
}

/// Load the remembered workspace into the client so requests are scoped.
pub fn restore(api: &ApiClient) -> Result<Option<String>, ApiError> {
    let id = api.session().store().get(WORKSPACE_KEY)?;
    api.set_workspace(id.clone());
    Ok(id)
}

/// Remember `id` as the current workspace. It must be one the user belongs to.
pub fn select(api: &ApiClient, id: &str) -> Result<Workspace, ApiError> {
    let found = list(api)?
        .into_iter()
        .find(|w| w.id == id)
        .ok_or_else(|| ApiError::Api {
            status: 404,
            message: format!("Workspace '{}' not found", id),
        })?;
    api.session().store().set(WORKSPACE_KEY, &found.id)?;
    api.set_workspace(Some(found.id.clone()));
    info!("switched to workspace {}", found.name);
    Ok(found)
}
