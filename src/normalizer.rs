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

//! Turns the inbound envelope into typed settings and the canonical incident.
//!
//! Envelope shape: `{"configuration": {<string-keyed settings>}}`. Every
//! setting is optional and must be a string when present.

use crate::core::errors::RelayError;
use crate::core::models::{Credentials, IncidentRecord, Label, Severity};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    configuration: Option<Settings>,
}

/// Settings carried in the envelope's `configuration` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Epoch seconds, optionally followed by `.<fraction>`
    pub occured: String,
    pub severity: String,
    /// Comma-separated `type:value` tokens
    pub labels: String,
    pub details: String,
    pub name: String,
    /// `"1"` requests an investigation
    pub investigate: String,
}

/// Non-fatal findings while normalizing. Reported, never aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeWarning {
    /// `occured` was not an epoch; the current time was used.
    IllegalOccurredEpoch(String),
}

impl fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeWarning::IllegalOccurredEpoch(raw) => {
                write!(f, "Illegal occured epoch time {}", raw)
            }
        }
    }
}

/// Everything the session layer needs for one invocation.
#[derive(Debug)]
pub struct RelayInput {
    pub base_url: String,
    pub credentials: Credentials,
    pub incident: IncidentRecord,
    pub warnings: Vec<NormalizeWarning>,
}

/// Parse the raw envelope bytes into [`Settings`].
///
/// A missing or `null` configuration block yields empty settings.
pub fn parse_envelope(input: &[u8]) -> Result<Settings, RelayError> {
    let envelope: Envelope = serde_json::from_slice(input)
        .map_err(|e| RelayError::PayloadError(format!("Failed to parse envelope: {}", e)))?;
    Ok(envelope.configuration.unwrap_or_default())
}

/// Build the relay input. `now` stamps `created` and is the fallback for
/// an unparseable `occured`.
pub fn normalize(settings: Settings, now: DateTime<Utc>) -> RelayInput {
    let mut warnings = Vec::new();

    let occured = parse_epoch(&settings.occured).unwrap_or_else(|| {
        warnings.push(NormalizeWarning::IllegalOccurredEpoch(
            settings.occured.clone(),
        ));
        now
    });

    let incident = IncidentRecord::new(
        settings.name,
        settings.details,
        Severity::parse_safe(&settings.severity),
        now,
        occured,
        settings.investigate == "1",
        parse_labels(&settings.labels),
    );

    RelayInput {
        base_url: settings.base_url,
        credentials: Credentials::new(settings.username, settings.password),
        incident,
        warnings,
    }
}

/// Parse whole epoch seconds, discarding anything after the first `.`.
pub fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let seconds = raw.split('.').next()?.parse::<i64>().ok()?;
    DateTime::from_timestamp(seconds, 0)
}

/// Parse `type:value` tokens separated by commas.
///
/// Tokens that do not split into exactly two parts are dropped.
pub fn parse_labels(raw: &str) -> Vec<Label> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let mut parts = token.split(':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(label_type), Some(value), None) => Some(Label::new(label_type, value)),
                _ => None,
            }
        })
        .collect()
}
