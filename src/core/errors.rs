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

// Error taxonomy for the relay pipeline

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Protocol step during which a transport failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Unauthenticated GET of the service root
    XsrfProbe,
    Login,
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::XsrfProbe => "xsrf-probe",
            Stage::Login => "login",
            Stage::Submit => "submit",
        };
        f.write_str(name)
    }
}

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum RelayError {
    /// Malformed base URL or unusable runtime settings. No network call was made.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The inbound envelope could not be turned into settings.
    #[error("Invalid payload: {0}")]
    PayloadError(String),

    /// DNS, connect, timeout or TLS failure.
    #[error("Transport error during {stage}: {source}")]
    TransportError {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    /// The root response carried an XSRF token that cannot be sent back as a header.
    #[error("Unusable XSRF token '{0}'")]
    XsrfTokenError(String),

    /// Login completed with a status other than 200.
    #[error("Bad login response: {}", .status.as_u16())]
    AuthenticationError { status: StatusCode },

    /// Incident write completed with a status other than 200.
    #[error("Response {status}")]
    DeliveryError { status: StatusCode },
}

impl RelayError {
    pub(crate) fn transport(stage: Stage) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| RelayError::TransportError { stage, source }
    }

    /// Whether the login exchange had succeeded before this error occurred.
    pub fn session_established(&self) -> bool {
        match self {
            RelayError::DeliveryError { .. } => true,
            RelayError::TransportError { stage, .. } => *stage == Stage::Submit,
            _ => false,
        }
    }
}
