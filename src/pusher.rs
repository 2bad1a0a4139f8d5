use std::sync::Arc;
use serde_json::Value;
use crate::{
    Config, Result, auth, util,
    channel::{Channel, ChannelType},
    events::{self, Payload, TriggerOutcome, TriggerParams},
    transport::{HttpRequest, HttpTransport, ReqwestTransport},
};

const LIBRARY_HEADER: &str = concat!("pusher-trigger-rust/", env!("CARGO_PKG_VERSION"));

/// Main Pusher client
#[derive(Clone)]
pub struct Pusher {
    config: Config,
    transport: Arc<dyn HttpTransport>,
}

impl Pusher {
    /// Creates a new Pusher client backed by `reqwest`
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client from the `pusher` config file and `PUSHER_*`
    /// environment, with no caller overrides
    pub fn from_env() -> Result<Self> {
        Self::new(Config::load(Default::default())?)
    }

    /// Creates a client that sends through the given transport
    pub fn with_transport(config: Config, transport: impl HttpTransport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Gets the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Triggers an event on a channel
    pub async fn trigger(
        &self,
        channel: &str,
        event: &str,
        payload: impl Into<Payload>,
        params: TriggerParams,
    ) -> Result<TriggerOutcome> {
        Channel::new(channel)?;
        util::validate_event_name(event)?;
        if let Some(ref socket_id) = params.socket_id {
            util::validate_socket_id(socket_id)?;
        }

        let body = payload.into().encode()?;
        let request = events::build_trigger_request(
            &self.config,
            channel,
            event,
            body,
            params.socket_id.as_deref(),
            util::current_timestamp(),
        );

        let response = self
            .transport
            .post(HttpRequest {
                url: request.url,
                headers: vec![
                    ("Content-Type".to_string(), "application/json".to_string()),
                    ("X-Pusher-Library".to_string(), LIBRARY_HEADER.to_string()),
                ],
                body: request.body,
                timeout: self.config.timeout,
            })
            .await
            .inspect_err(|err| {
                tracing::warn!(channel, event, error = %err, "trigger failed to send");
            })?;

        let outcome = TriggerOutcome::from_response(response, params.debug || self.config.debug);
        match &outcome {
            TriggerOutcome::Accepted => tracing::info!(channel, event, "event accepted"),
            TriggerOutcome::Rejected { status, body } => {
                tracing::warn!(channel, event, status, body = %body, "event rejected")
            }
            TriggerOutcome::Debug { status, .. } => {
                tracing::debug!(channel, event, status, "trigger response returned raw")
            }
        }

        Ok(outcome)
    }

    /// Signs a private channel subscription, returning the JSON auth body
    pub fn socket_auth(
        &self,
        channel: &str,
        socket_id: &str,
        custom_data: Option<&str>,
    ) -> Result<String> {
        let channel = validate_auth_request(channel, socket_id)?;
        if !channel.requires_auth() {
            tracing::warn!(channel = %channel, "signing a subscription to a public channel");
        }

        auth::socket_signature(&self.config.token, channel.as_str(), socket_id, custom_data).to_json()
    }

    /// Signs a presence channel subscription, returning the JSON auth body
    pub fn presence_auth(
        &self,
        channel: &str,
        socket_id: &str,
        user_id: &str,
        user_info: Option<&Value>,
    ) -> Result<String> {
        let channel = validate_auth_request(channel, socket_id)?;
        if channel.channel_type() != ChannelType::Presence {
            tracing::warn!(
                channel = %channel,
                kind = %channel.channel_type(),
                "presence auth requested for a non-presence channel"
            );
        }

        auth::presence_signature(&self.config.token, channel.as_str(), socket_id, user_id, user_info)?
            .to_json()
    }
}

fn validate_auth_request(channel: &str, socket_id: &str) -> Result<Channel> {
    util::validate_socket_id(socket_id)?;
    Channel::new(channel)
}

impl std::fmt::Debug for Pusher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pusher")
            .field("config", &self.config)
            .finish()
    }
}
