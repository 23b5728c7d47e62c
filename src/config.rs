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

// Runtime configuration management

use crate::core::constants::config as keys;
use crate::core::errors::RelayError;
use crate::transport::TransportConfig;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Formatter used for diagnostic events on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'text' or 'json', got '{}'", other)),
        }
    }
}

/// Process-level configuration loaded from environment variables.
///
/// Per-invocation settings (base URL, credentials, incident fields) arrive in
/// the inbound envelope instead; see [`crate::normalizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: LevelFilter,
    pub log_format: LogFormat,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Validate the service certificate chain. Off for self-signed appliances.
    pub verify_tls: bool,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first
    /// when present. Any unusable value is a `ConfigurationError`.
    pub fn from_env() -> Result<Self, RelayError> {
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok();
        }

        Ok(Self {
            log_level: env_parsed(keys::ENV_LOG_LEVEL)?.unwrap_or(keys::DEFAULT_LOG_LEVEL),
            log_format: env_parsed(keys::ENV_LOG_FORMAT)?.unwrap_or_default(),
            request_timeout: env_timeout(
                keys::ENV_REQUEST_TIMEOUT_SECS,
                keys::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_timeout: env_timeout(
                keys::ENV_CONNECT_TIMEOUT_SECS,
                keys::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
            verify_tls: env_flag(keys::ENV_VERIFY_TLS)?.unwrap_or(false),
        })
    }

    /// Transport settings derived from this configuration.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            accept_invalid_certs: !self.verify_tls,
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: keys::DEFAULT_LOG_LEVEL,
            log_format: LogFormat::default(),
            request_timeout: Duration::from_secs(keys::DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(keys::DEFAULT_CONNECT_TIMEOUT_SECS),
            verify_tls: false,
        }
    }
}

/// `None` when the variable is unset or empty.
fn env_parsed<T>(key: &str) -> Result<Option<T>, RelayError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(|e| {
            RelayError::ConfigurationError(format!("Invalid {} value '{}': {}", key, raw, e))
        }),
        _ => Ok(None),
    }
}

fn env_timeout(key: &str, default_secs: u64) -> Result<Duration, RelayError> {
    match env_parsed::<u64>(key)? {
        Some(0) => Err(RelayError::ConfigurationError(format!(
            "{} must be greater than 0",
            key
        ))),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(Duration::from_secs(default_secs)),
    }
}

fn env_flag(key: &str) -> Result<Option<bool>, RelayError> {
    let Some(raw) = env_parsed::<String>(key)? else {
        return Ok(None);
    };
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        _ => Err(RelayError::ConfigurationError(format!(
            "Invalid {} value '{}': expected true or false",
            key, raw
        ))),
    }
}
