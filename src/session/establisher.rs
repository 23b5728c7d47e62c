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

use super::{json_headers, Endpoints, Session};
use crate::core::constants::http;
use crate::core::errors::{RelayError, Stage};
use crate::core::models::Credentials;
use crate::transport::{Transport, TransportConfig};
use reqwest::header::HeaderValue;
use reqwest::{Response, StatusCode};
use tracing::{debug, info, warn};

/// Harvest the XSRF token and log in.
///
/// Issues exactly one unauthenticated `GET <base_url>` and one
/// `POST <base_url>/login`. Only a 200 on the login yields a [`Session`].
pub async fn establish(
    base_url: &str,
    credentials: &Credentials,
    transport: &TransportConfig,
) -> Result<Session, RelayError> {
    let endpoints = Endpoints::parse(base_url)?;
    let Transport { client, jar } = Transport::new(transport)?;

    debug!(url = %endpoints.root, "Requesting XSRF token");
    let root_response = client
        .get(endpoints.root.clone())
        .send()
        .await
        .map_err(RelayError::transport(Stage::XsrfProbe))?;

    let xsrf_token = xsrf_token(&root_response);
    let xsrf_header = xsrf_header(&xsrf_token)?;
    if xsrf_token.is_empty() {
        // Login still goes ahead; the service reports the real cause.
        warn!(
            status = %root_response.status(),
            "No {} cookie on root response, logging in without a token",
            http::XSRF_COOKIE
        );
    }

    debug!(url = %endpoints.login, user = %credentials.username, "Logging in");
    let login = client
        .post(endpoints.login.clone())
        .headers(json_headers(&xsrf_header))
        .json(&credentials.login_body())
        .send()
        .await
        .map_err(RelayError::transport(Stage::Login))?;

    let status = login.status();
    if status != StatusCode::OK {
        return Err(RelayError::AuthenticationError { status });
    }

    info!(url = %endpoints.login, "Login succeeded");

    Ok(Session {
        client,
        jar,
        xsrf_token,
        xsrf_header,
        endpoints,
    })
}

/// Value of the `XSRF-TOKEN` cookie set on the response, or `""` when absent.
fn xsrf_token(response: &Response) -> String {
    response
        .cookies()
        .filter(|cookie| cookie.name() == http::XSRF_COOKIE)
        .last()
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default()
}

/// The token is echoed verbatim, so it must be usable as a header value.
fn xsrf_header(token: &str) -> Result<HeaderValue, RelayError> {
    HeaderValue::from_str(token)
        .map_err(|_| RelayError::XsrfTokenError(token.escape_debug().to_string()))
}
