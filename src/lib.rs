//! Pusher HTTP API client for Rust
//!
//! Triggers events on channels through the signed REST endpoint and computes
//! the auth strings that private and presence channel subscriptions need.
//!
//! ```no_run
//! use pusher_trigger::{Config, Pusher, TriggerParams};
//! use serde_json::json;
//!
//! # async fn run() -> pusher_trigger::Result<()> {
//! let pusher = Pusher::new(Config::new("key", "secret", "123"))?;
//! let outcome = pusher
//!     .trigger("my-channel", "my-event", json!({"message": "hello"}), TriggerParams::default())
//!     .await?;
//! assert!(outcome.is_accepted());
//!
//! let auth = pusher.socket_auth("private-room", "1234.5678", None)?;
//! # let _ = auth;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod channel;
pub mod config;
pub mod errors;
pub mod events;
pub mod pusher;
pub mod token;
pub mod transport;
pub mod util;

pub use pusher::Pusher;
pub use config::{Config, Options};
pub use errors::{PusherError, TransportError};
pub use events::{Payload, TriggerOutcome, TriggerParams};
pub use token::Token;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Result type alias for Pusher operations
pub type Result<T> = std::result::Result<T, PusherError>;
