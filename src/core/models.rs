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

// Domain models - credentials and the canonical incident record

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

/// Login credentials for the case-management service.
///
/// The password is kept in a [`SecretString`] so it never shows up in `Debug`
/// output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Login body as expected by `POST /login`.
    pub(crate) fn login_body(&self) -> serde_json::Value {
        serde_json::json!({
            "user": self.username,
            "password": self.password.expose_secret(),
        })
    }
}

/// Incident severity levels understood by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Maps a severity name to its level. Anything unrecognized is `Unknown`.
    pub fn parse_safe(s: &str) -> Self {
        match s {
            "Unknown" => Severity::Unknown,
            "Low" => Severity::Low,
            "Medium" => Severity::Medium,
            "High" => Severity::High,
            "Critical" => Severity::Critical,
            _ => Severity::Unknown,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Severity::Unknown => 0,
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

/// A `{type, value}` label attached to an incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    #[serde(rename = "type")]
    pub label_type: String,
    pub value: String,
}

impl Label {
    pub fn new(label_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label_type: label_type.into(),
            value: value.into(),
        }
    }
}

/// Canonical incident record sent to `POST /incident`.
///
/// The trailing block of fields is reserved by the service and always sent
/// empty on creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    pub name: String,
    pub details: String,
    pub severity: Severity,
    pub created: DateTime<Utc>,
    // Field name as spelled by the service API.
    pub occured: DateTime<Utc>,
    pub create_investigation: bool,
    pub labels: Vec<Label>,

    pub status: u32,
    pub owner: String,
    pub id: String,
    pub version: u32,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub artifacts: Vec<String>,
    pub tasks: Vec<String>,
    pub evidence: Vec<String>,
    pub insights: u32,
}

impl IncidentRecord {
    /// Creates a record with the server-reserved fields zeroed.
    pub fn new(
        name: String,
        details: String,
        severity: Severity,
        created: DateTime<Utc>,
        occured: DateTime<Utc>,
        create_investigation: bool,
        labels: Vec<Label>,
    ) -> Self {
        Self {
            name,
            details,
            severity,
            created,
            occured,
            create_investigation,
            labels,
            status: 0,
            owner: String::new(),
            id: String::new(),
            version: 0,
            incident_type: String::new(),
            artifacts: Vec::new(),
            tasks: Vec::new(),
            evidence: Vec::new(),
            insights: 0,
        }
    }
}
