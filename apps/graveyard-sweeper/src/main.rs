//! Graveyard sweeper: one-shot reconciliation of the holding group.
//!
//! Invoked either by a closure event (pass the payload via `--event`) or
//! on a schedule with no payload. The event payload only triggers the
//! run; selection always re-derives candidates from a full directory
//! listing rather than trusting the payload's identity, so behavior
//! after entry is identical for both triggers.

mod config;
mod directory;
mod logging;
mod notifier;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::Deserialize;
use tracing::{error, info, warn};

use config::Config;
use directory::RestDirectory;
use graveyard_engine::{EngineConfig, ReconciliationEngine};
use notifier::WebhookNotifier;

/// Move closed accounts into the organization's holding group.
#[derive(Debug, Parser)]
#[command(name = "graveyard-sweeper", version, about)]
struct Args {
    /// Path to a closure event payload (JSON). Omit for a scheduled
    /// sweep.
    #[arg(long)]
    event: Option<PathBuf>,
}

/// Loosely-typed closure event, consumed only for logging.
#[derive(Debug, Default, Deserialize)]
struct ClosureEvent {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    account_id: Option<String>,
}

fn log_trigger(event_path: Option<&PathBuf>) {
    let Some(path) = event_path else {
        info!(trigger = "schedule", "Starting scheduled graveyard sweep");
        return;
    };

    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let event: ClosureEvent = serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Unparseable event payload, proceeding with full sweep");
                ClosureEvent::default()
            });
            info!(
                trigger = "event",
                source = event.source.as_deref().unwrap_or("unknown"),
                account_id = event.account_id.as_deref().unwrap_or("unknown"),
                "Starting event-triggered graveyard sweep"
            );
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read event payload, proceeding with full sweep");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Fail fast on missing configuration, before logging is up.
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        target_group = %config.target_group_name,
        "Starting graveyard sweeper"
    );
    log_trigger(args.event.as_ref());

    let run_result = async {
        let directory = RestDirectory::new(
            &config.directory_base_url,
            config.directory_api_token.clone(),
        )?;

        let mut engine = ReconciliationEngine::new(
            directory,
            EngineConfig::new(&config.target_group_name),
        );
        if let Some(url) = &config.notify_webhook_url {
            engine = engine.with_notifier(Arc::new(WebhookNotifier::new(url)?));
        }

        engine.run().await
    }
    .await;

    match run_result {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!(error = %e, "Failed to serialize report");
                std::process::exit(1);
            }
        },
        Err(err) => {
            error!(
                error = %err,
                error_code = err.error_code(),
                "Reconciliation failed"
            );
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
