// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Authenticated session handling against the case-management service.
//!
//! [`establish`] harvests the anti-forgery token and logs in; [`submit`]
//! performs the single authenticated incident write.

mod establisher;
mod submitter;

pub use establisher::establish;
pub use submitter::submit;

use crate::core::constants::http;
use crate::core::errors::RelayError;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Service endpoints derived from the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub root: Url,
    pub login: Url,
    pub incident: Url,
}

impl Endpoints {
    /// Parse the base URL. Fails before any network call is made.
    pub fn parse(base_url: &str) -> Result<Self, RelayError> {
        if base_url.trim().is_empty() {
            return Err(RelayError::ConfigurationError(
                "base_url is not set".to_string(),
            ));
        }

        let root = Self::parse_url(base_url)?;
        if root.scheme() != "http" && root.scheme() != "https" {
            return Err(RelayError::ConfigurationError(format!(
                "Invalid base_url '{}': scheme must be http or https",
                base_url
            )));
        }

        let trimmed = base_url.trim_end_matches('/');
        Ok(Self {
            login: Self::parse_url(&format!("{}{}", trimmed, http::LOGIN_PATH))?,
            incident: Self::parse_url(&format!("{}{}", trimmed, http::INCIDENT_PATH))?,
            root,
        })
    }

    fn parse_url(raw: &str) -> Result<Url, RelayError> {
        Url::parse(raw).map_err(|e| {
            RelayError::ConfigurationError(format!("Invalid base_url '{}': {}", raw, e))
        })
    }
}

/// Authenticated session: client, cookie store and the captured XSRF token.
///
/// Only [`establish`] can build one, and only after the login returned 200,
/// so holding a `Session` means it is usable for a write.
pub struct Session {
    client: Client,
    jar: Arc<Jar>,
    xsrf_token: String,
    xsrf_header: HeaderValue,
    endpoints: Endpoints,
}

impl Session {
    /// Token captured from the root GET, echoed on every write.
    pub fn xsrf_token(&self) -> &str {
        &self.xsrf_token
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Cookies the service has set so far, as they would be sent on a write.
    pub fn cookies(&self) -> Option<String> {
        self.jar
            .cookies(&self.endpoints.incident)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn xsrf_header(&self) -> &HeaderValue {
        &self.xsrf_header
    }
}

/// `Accept`, `Content-type` and `X-XSRF-TOKEN` headers for a JSON request.
pub(crate) fn json_headers(xsrf_token: &HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(http::APPLICATION_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(http::APPLICATION_JSON));
    headers.insert(HeaderName::from_static(http::XSRF_HEADER), xsrf_token.clone());
    headers
}
