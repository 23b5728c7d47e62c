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

use super::{json_headers, Session};
use crate::core::errors::{RelayError, Stage};
use crate::core::models::IncidentRecord;
use reqwest::StatusCode;
use tracing::{debug, info};

/// Write the incident using an established session.
///
/// The response body is not read; the service-assigned incident id is not
/// needed by the caller.
pub async fn submit(session: &Session, incident: &IncidentRecord) -> Result<(), RelayError> {
    let body = serde_json::to_vec(incident)
        .map_err(|e| RelayError::PayloadError(format!("Failed to serialize incident: {}", e)))?;

    let url = &session.endpoints().incident;
    debug!(url = %url, name = %incident.name, bytes = body.len(), "Submitting incident");

    let response = session
        .client()
        .post(url.clone())
        .headers(json_headers(session.xsrf_header()))
        .body(body)
        .send()
        .await
        .map_err(RelayError::transport(Stage::Submit))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(RelayError::DeliveryError { status });
    }

    info!(url = %url, name = %incident.name, "Incident delivered");
    Ok(())
}
