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

pub mod http {
    /// Cookie set by the service on the unauthenticated root GET
    pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
    /// Header echoing the anti-forgery token on state-changing requests.
    /// Lowercase so it can back a `HeaderName::from_static`.
    pub const XSRF_HEADER: &str = "x-xsrf-token";
    pub const APPLICATION_JSON: &str = "application/json";
    pub const LOGIN_PATH: &str = "/login";
    pub const INCIDENT_PATH: &str = "/incident";
}

pub mod exit {
    /// Incident delivered.
    pub const SUCCESS: u8 = 0;
    /// Process invoked without `--execute`.
    pub const INVALID_MODE: u8 = 1;
    /// Standard input could not be read.
    pub const INPUT_UNREADABLE: u8 = 2;
    /// Normalization, authentication or delivery failed.
    pub const RELAY_FAILED: u8 = 3;
}

pub mod diagnostics {
    pub const WARN_PREFIX: &str = "WARN";
    pub const ERROR_PREFIX: &str = "ERROR";
}

pub mod config {
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
    pub const ENV_REQUEST_TIMEOUT_SECS: &str = "RELAY_REQUEST_TIMEOUT_SECS";
    pub const ENV_CONNECT_TIMEOUT_SECS: &str = "RELAY_CONNECT_TIMEOUT_SECS";
    pub const ENV_VERIFY_TLS: &str = "RELAY_VERIFY_TLS";

    pub const DEFAULT_LOG_LEVEL: tracing::level_filters::LevelFilter =
        tracing::level_filters::LevelFilter::WARN;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

pub mod limits {
    /// Maximum accepted size of the inbound envelope (10 MB)
    pub const MAX_PAYLOAD_SIZE_BYTES: u64 = 10 * 1024 * 1024;
}
