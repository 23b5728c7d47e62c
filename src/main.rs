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

use anyhow::{Context, Result};
use clap::Parser;
use incident_relay::config::{Config, LogFormat};
use incident_relay::core::constants::{diagnostics, exit, limits};
use incident_relay::core::errors::RelayError;
use incident_relay::relay;
use std::fmt::Display;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "incident-relay",
    version,
    about = "Reads an alert envelope on stdin and creates an incident on the case-management service"
)]
struct Cli {
    /// Execution mode. Required; the relay does nothing without it.
    #[arg(long)]
    execute: bool,

    /// Print the normalized incident to stdout instead of sending it.
    #[arg(long)]
    dry_run: bool,

    /// Validate the service's TLS certificate (overrides RELAY_VERIFY_TLS).
    #[arg(long)]
    verify_tls: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    install_panic_hook();

    if !cli.execute {
        report_fatal("Unsupported execution mode");
        return ExitCode::from(exit::INVALID_MODE);
    }

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            report_fatal(e);
            return ExitCode::from(exit::RELAY_FAILED);
        }
    };
    if cli.verify_tls {
        config.verify_tls = true;
    }

    if let Err(e) = init_tracing(&config) {
        eprintln!("{} Logging disabled: {}", diagnostics::WARN_PREFIX, e);
    }

    let payload = match read_payload().await {
        Ok(payload) => payload,
        Err(e) => {
            report_fatal(format!("{:#}", e));
            return ExitCode::from(exit::INPUT_UNREADABLE);
        }
    };

    match run(&cli, &config, &payload).await {
        Ok(()) => ExitCode::from(exit::SUCCESS),
        Err(e) => {
            report_fatal(e);
            ExitCode::from(exit::RELAY_FAILED)
        }
    }
}

async fn run(cli: &Cli, config: &Config, payload: &[u8]) -> Result<(), RelayError> {
    let input = relay::prepare(payload)?;

    for warning in &input.warnings {
        eprintln!("{} {}", diagnostics::WARN_PREFIX, warning);
    }

    if cli.dry_run {
        println!("{}", relay::render(&input)?);
        return Ok(());
    }

    relay::deliver(&input, &config.transport()).await
}

/// Read the whole envelope from stdin, refusing anything over the size limit.
async fn read_payload() -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    tokio::io::stdin()
        .take(limits::MAX_PAYLOAD_SIZE_BYTES + 1)
        .read_to_end(&mut payload)
        .await
        .context("Failed to read input")?;

    if payload.len() as u64 > limits::MAX_PAYLOAD_SIZE_BYTES {
        anyhow::bail!(
            "Input exceeded size limit of {} bytes",
            limits::MAX_PAYLOAD_SIZE_BYTES
        );
    }

    Ok(payload)
}

fn report_fatal(message: impl Display) {
    eprintln!("{} {}", diagnostics::ERROR_PREFIX, message);
}

/// Panics surface as a fatal diagnostic line like any other failure.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown panic");
        let location = info
            .location()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown location".to_string());

        report_fatal(format_args!("panic at {}: {}", location, message));
    }));
}

/// Library events go to stderr next to the WARN/ERROR lines. `RUST_LOG`
/// takes precedence over `LOG_LEVEL`.
fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.log_level.into())
        .from_env()?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().flatten_event(true).try_init()?,
        LogFormat::Text => builder.without_time().try_init()?,
    }
    Ok(())
}
