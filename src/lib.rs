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

//! incident-relay: delivers alert payloads to a case-management service.
//!
//! One invocation reads an envelope, normalizes it into an incident record,
//! logs in over an XSRF-protected session and writes the incident once.

pub mod config;
pub mod core;
pub mod normalizer;
pub mod relay;
pub mod session;
pub mod transport;
