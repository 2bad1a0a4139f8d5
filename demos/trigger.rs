//! Triggers one event using settings from `pusher.toml` / `PUSHER_*`.
//!
//! ```text
//! PUSHER_AUTH_KEY=... PUSHER_SECRET=... PUSHER_APP_ID=... \
//!     RUST_LOG=pusher_trigger=debug cargo run --example trigger -- my-channel my-event
//! ```

use pusher_trigger::{Config, Options, Pusher, TriggerOutcome, TriggerParams};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> pusher_trigger::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let channel = args.next().unwrap_or_else(|| "test-channel".to_string());
    let event = args.next().unwrap_or_else(|| "test-event".to_string());

    let config = Config::load(Options {
        debug: Some(true),
        ..Options::default()
    })?;
    let pusher = Pusher::new(config)?;

    let outcome = pusher
        .trigger(&channel, &event, json!({"message": "hello world"}), TriggerParams::default())
        .await?;

    match outcome {
        TriggerOutcome::Debug { status, body } => {
            tracing::info!(status, body = %body.trim_end(), "response");
        }
        other => tracing::info!(accepted = other.is_accepted(), "response"),
    }

    Ok(())
}
