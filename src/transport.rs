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

// HTTP transport for talking to the case-management service

use crate::core::constants::config as defaults;
use crate::core::errors::RelayError;
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Transport knobs for the per-invocation HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Skip certificate chain validation. On-prem appliances usually serve a
    /// self-signed certificate, so this is on unless the deployment opts out.
    pub accept_invalid_certs: bool,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            request_timeout: Duration::from_secs(defaults::DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// A fresh HTTP client together with the cookie store it writes into.
pub struct Transport {
    pub(crate) client: Client,
    pub(crate) jar: Arc<Jar>,
}

impl Transport {
    /// Create a client with an empty cookie jar.
    ///
    /// No retries and no connection reuse across invocations: the client lives
    /// for exactly one login and one write.
    pub fn new(config: &TransportConfig) -> Result<Self, RelayError> {
        let jar = Arc::new(Jar::default());

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                RelayError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        debug!(
            accept_invalid_certs = config.accept_invalid_certs,
            timeout_secs = config.request_timeout.as_secs(),
            "HTTP transport ready"
        );

        Ok(Self { client, jar })
    }
}
