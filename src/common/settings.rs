// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use serde::Deserialize;
use std::collections::HashMap;

/// The `[route53]` configuration table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Route53Settings {
    /// Base URL of the API, without the version segment.
    pub endpoint: String,
    /// Versioned path prefix of every request.
    pub api_version: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Page size requested from list operations (`maxitems`).
    pub max_items: Option<u32>,
    /// Extra headers sent with every request, e.g. from a signing proxy.
    pub headers: HashMap<String, String>,
}

impl Route53Settings {
    /// The API version this crate's XML codec implements.
    pub const API_VERSION: &'static str = "2013-04-01";
}

impl Default for Route53Settings {
    fn default() -> Self {
        Self {
            endpoint: "https://route53.amazonaws.com".to_string(),
            api_version: Self::API_VERSION.to_string(),
            timeout_secs: 20,
            user_agent: "cub-route53".to_string(),
            max_items: None,
            headers: HashMap::new(),
        }
    }
}
