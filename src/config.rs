// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3333/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Refresh this long before the access token actually expires.
pub const REFRESH_MARGIN_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub refresh_margin: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_margin: REFRESH_MARGIN_SECS,
        }
    }
}

impl Config {
    /// Reads `MONEYDASH_API_URL` and `MONEYDASH_TIMEOUT_SECS`; call after
    /// `dotenvy::dotenv()` so a local `.env` is honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(url) = lookup("MONEYDASH_API_URL").filter(|s| !s.trim().is_empty()) {
            cfg.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("MONEYDASH_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid MONEYDASH_TIMEOUT_SECS '{}'", raw))?;
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }
}
