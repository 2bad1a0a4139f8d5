use std::collections::BTreeMap;
use serde_json::Value;
use crate::{Config, Token, transport::HttpResponse, util};

/// Body the legacy REST endpoint returns for an accepted event
pub const ACCEPTED_BODY: &str = "202 ACCEPTED\n";

pub const AUTH_VERSION: &str = "1.0";

/// Event payload
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Serialized to JSON before sending
    Json(Value),
    /// Already serialized, sent byte for byte
    Encoded(String),
}

impl Payload {
    pub fn already_encoded(body: impl Into<String>) -> Self {
        Payload::Encoded(body.into())
    }

    /// The exact request body
    pub fn encode(&self) -> crate::Result<String> {
        match self {
            Payload::Json(value) => Ok(serde_json::to_string(value)?),
            Payload::Encoded(body) => Ok(body.clone()),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<&Value> for Payload {
    fn from(value: &Value) -> Self {
        Payload::Json(value.clone())
    }
}

/// Optional trigger arguments
#[derive(Debug, Clone, Default)]
pub struct TriggerParams {
    /// Connection to exclude from receiving the event
    pub socket_id: Option<String>,
    /// Return the raw response body for this call
    pub debug: bool,
}

impl TriggerParams {
    pub fn socket_id(mut self, socket_id: impl Into<String>) -> Self {
        self.socket_id = Some(socket_id.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// A fully signed trigger request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRequest {
    /// `/apps/{app_id}/channels/{channel}/events`
    pub path: String,
    /// Signed query string, `auth_signature` last
    pub query: String,
    pub body: String,
    pub url: String,
}

impl TriggerRequest {
    /// Looks up a query parameter by name
    #[cfg(test)]
    pub(crate) fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// What a trigger call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The backend accepted the event
    Accepted,
    /// The backend answered, but not with an acceptance
    Rejected { status: u16, body: String },
    /// Debug mode: the response as received
    Debug { status: u16, body: String },
}

impl TriggerOutcome {
    /// Applies the result policy to a response
    pub fn from_response(response: HttpResponse, debug: bool) -> Self {
        let HttpResponse { status, body } = response;
        if debug {
            TriggerOutcome::Debug { status, body }
        } else if is_accepted(status, &body) {
            TriggerOutcome::Accepted
        } else {
            TriggerOutcome::Rejected { status, body }
        }
    }

    pub fn is_accepted(&self) -> bool {
        match self {
            TriggerOutcome::Accepted => true,
            TriggerOutcome::Rejected { .. } => false,
            TriggerOutcome::Debug { status, body } => is_accepted(*status, body),
        }
    }

    /// Raw response body; only kept in debug mode
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            TriggerOutcome::Debug { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<TriggerOutcome> for bool {
    fn from(outcome: TriggerOutcome) -> bool {
        outcome.is_accepted()
    }
}

fn is_accepted(status: u16, body: &str) -> bool {
    status == 202 || body == ACCEPTED_BODY
}

/// Builds the string that gets signed: method, path and query on separate lines
pub fn string_to_sign(method: &str, path: &str, query: &str) -> String {
    format!("{}\n{}\n{}", method.to_uppercase(), path, query)
}

/// Creates a signed query string for Pusher API requests.
///
/// `auth_key`, `auth_timestamp`, `auth_version` and `body_md5` are added to
/// `params`; all keys are emitted in lexical order, which for a trigger gives
/// `auth_key, auth_timestamp, auth_version, body_md5, name, socket_id`.
pub fn create_signed_query_string(
    token: &Token,
    method: &str,
    path: &str,
    body: Option<&str>,
    params: &BTreeMap<&str, String>,
    timestamp: u64,
) -> String {
    let mut query_params = params.clone();
    query_params.insert("auth_key", token.key.clone());
    query_params.insert("auth_timestamp", timestamp.to_string());
    query_params.insert("auth_version", AUTH_VERSION.to_string());

    if let Some(body) = body {
        query_params.insert("body_md5", util::get_md5(body));
    }

    let query_string = util::to_ordered_array(&query_params).join("&");
    let signature = token.sign(&string_to_sign(method, path, &query_string));

    format!("{}&auth_signature={}", query_string, signature)
}

/// Builds and signs the request for one event on one channel
pub fn build_trigger_request(
    config: &Config,
    channel: &str,
    event: &str,
    body: String,
    socket_id: Option<&str>,
    timestamp: u64,
) -> TriggerRequest {
    let path = config.prefix_path(&format!("/channels/{}/events", channel));

    let mut params = BTreeMap::new();
    params.insert("name", event.to_string());
    if let Some(socket_id) = socket_id {
        params.insert("socket_id", socket_id.to_string());
    }

    let query = create_signed_query_string(
        &config.token,
        "POST",
        &path,
        Some(&body),
        &params,
        timestamp,
    );
    let url = format!("{}{}?{}", config.base_url(), path, query);

    tracing::debug!(
        path = %path,
        event,
        timestamp,
        body_len = body.len(),
        "built trigger request"
    );

    TriggerRequest {
        path,
        query,
        body,
        url,
    }
}
