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

// Pipeline: normalize -> establish -> submit

use crate::core::errors::RelayError;
use crate::normalizer::{self, RelayInput};
use crate::session::{establish, submit};
use crate::transport::TransportConfig;
use chrono::Utc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Parse and normalize a raw envelope, stamped with the current time.
pub fn prepare(payload: &[u8]) -> Result<RelayInput, RelayError> {
    let settings = normalizer::parse_envelope(payload)?;
    Ok(normalizer::normalize(settings, Utc::now()))
}

/// Log in and write the incident. One login call, one write call, no retry.
pub async fn deliver(input: &RelayInput, transport: &TransportConfig) -> Result<(), RelayError> {
    let span = info_span!("relay", run_id = %Uuid::new_v4());

    async {
        let session = establish(&input.base_url, &input.credentials, transport).await?;
        submit(&session, &input.incident).await?;
        info!(incident = %input.incident.name, "Relay complete");
        Ok(())
    }
    .instrument(span)
    .await
}

/// Incident JSON as it would be sent, for dry runs.
pub fn render(input: &RelayInput) -> Result<String, RelayError> {
    serde_json::to_string_pretty(&input.incident)
        .map_err(|e| RelayError::PayloadError(format!("Failed to serialize incident: {}", e)))
}
