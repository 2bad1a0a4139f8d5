use std::time::Duration;
use serde::Deserialize;
use crate::{PusherError, Token};

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_HOST: &str = "api.pusherapp.com";
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Pusher client
#[derive(Clone, Debug)]
pub struct Config {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub app_id: String,
    pub token: Token,
    pub timeout: Duration,
    /// Return raw response bodies from every trigger
    pub debug: bool,
}

impl Config {
    /// Creates a new configuration with the default host, port and timeout
    pub fn new(
        auth_key: impl Into<String>,
        secret: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            app_id: app_id.into(),
            token: Token::new(auth_key, secret),
            timeout: DEFAULT_TIMEOUT,
            debug: false,
        }
    }

    /// Loads defaults from the `pusher` file / `PUSHER_*` environment and
    /// overlays the caller's options on top
    pub fn load(overrides: Options) -> crate::Result<Self> {
        let defaults = Options::load()?;
        Self::from_options(defaults.overlay(overrides))
    }

    /// Builds a configuration from structured options
    pub fn from_options(options: Options) -> crate::Result<Self> {
        let auth_key = required(options.auth_key, "auth_key")?;
        let secret = required(options.secret, "secret")?;
        let app_id = required(options.app_id, "app_id")?;

        let mut config = Self::new(auth_key, secret, app_id);

        if let Some(host) = options.host.as_deref() {
            config = config.host(host)?;
        }
        if let Some(port) = options.port {
            config = config.port(port);
        }
        if let Some(timeout) = options.timeout {
            config = config.timeout(Duration::from_secs(timeout));
        }
        if let Some(debug) = options.debug {
            config = config.debug(debug);
        }

        Ok(config)
    }

    /// Sets the host, either bare (`api.pusherapp.com`) or as a URL
    /// (`https://api.pusherapp.com`). A scheme or port in the URL replaces the
    /// current one.
    pub fn host(mut self, host: &str) -> crate::Result<Self> {
        if !host.contains("://") {
            let host = host.trim_end_matches('/');
            if host.is_empty() || host.contains('/') {
                return Err(PusherError::config(format!("Invalid Pusher host: '{}'", host)));
            }
            self.host = host.to_string();
            return Ok(self);
        }

        let parsed = url::Url::parse(host)
            .map_err(|_| PusherError::config(format!("Invalid Pusher host URL: '{}'", host)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PusherError::config(format!(
                "Unsupported scheme '{}' in Pusher host URL",
                parsed.scheme()
            )));
        }

        self.host = parsed
            .host_str()
            .ok_or_else(|| PusherError::config(format!("No host in Pusher host URL: '{}'", host)))?
            .to_string();
        self = self.use_tls(parsed.scheme() == "https");
        if let Some(port) = parsed.port() {
            self.port = port;
        }

        Ok(self)
    }

    /// Sets whether to use TLS
    pub fn use_tls(mut self, use_tls: bool) -> Self {
        self.scheme = if use_tls { "https" } else { "http" }.to_string();
        self
    }

    /// Sets the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the debug flag
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Gets the base URL, port always included
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Gets the app path, `/apps/{app_id}`
    pub fn app_path(&self) -> String {
        format!("/apps/{}", self.app_id)
    }

    /// Gets the prefix path for API requests
    pub fn prefix_path(&self, sub_path: &str) -> String {
        format!("{}{}", self.app_path(), sub_path)
    }
}

fn required(value: Option<String>, name: &str) -> crate::Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(PusherError::config(format!("Missing required setting '{}'", name))),
    }
}

// Values stay strings so credentials like "0042" survive; port, timeout and
// debug are converted when deserialized
fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix("PUSHER").try_parsing(false)
}

/// Structured client settings, every field optional.
///
/// Used both for values read from the configuration source and for values
/// supplied by the caller.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Options {
    pub auth_key: Option<String>,
    pub secret: Option<String>,
    pub app_id: Option<String>,
    pub debug: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl Options {
    /// Reads options from an optional `pusher` config file in the working
    /// directory, then from `PUSHER_*` environment variables
    pub fn load() -> crate::Result<Self> {
        Self::load_with(environment())
    }

    fn load_with(environment: ::config::Environment) -> crate::Result<Self> {
        let source = ::config::Config::builder()
            .add_source(::config::File::with_name("pusher").required(false))
            .add_source(environment)
            .build()?;

        Self::from_source(source)
    }

    /// Deserializes options from an already built configuration source
    pub fn from_source(source: ::config::Config) -> crate::Result<Self> {
        let options = source.try_deserialize::<Options>()?;
        tracing::debug!(
            auth_key = options.auth_key.as_deref().unwrap_or(""),
            app_id = options.app_id.as_deref().unwrap_or(""),
            "loaded pusher options"
        );
        Ok(options)
    }

    /// Overlays `other` on top of `self`; fields set in `other` win
    pub fn overlay(self, other: Options) -> Options {
        Options {
            auth_key: other.auth_key.or(self.auth_key),
            secret: other.secret.or(self.secret),
            app_id: other.app_id.or(self.app_id),
            debug: other.debug.or(self.debug),
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            timeout: other.timeout.or(self.timeout),
        }
    }
}
