use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use regex::Regex;
use crate::{PusherError, Result};

static CHANNEL_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-=@,.;]+$").unwrap()
});

/// Longest channel name the API accepts, prefix included
pub const MAX_CHANNEL_NAME_LEN: usize = 200;

/// Channel type, derived from the name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Public,
    Private,
    Presence,
    Encrypted,
}

impl ChannelType {
    /// Detects the type from a full channel name
    pub fn detect(name: &str) -> Self {
        // "private-encrypted-" must be checked before "private-"
        if name.starts_with("private-encrypted-") {
            ChannelType::Encrypted
        } else if name.starts_with("presence-") {
            ChannelType::Presence
        } else if name.starts_with("private-") {
            ChannelType::Private
        } else {
            ChannelType::Public
        }
    }

    /// Name prefix that selects this type
    pub fn prefix(&self) -> &'static str {
        match self {
            ChannelType::Public => "",
            ChannelType::Private => "private-",
            ChannelType::Presence => "presence-",
            ChannelType::Encrypted => "private-encrypted-",
        }
    }

    /// Checks if subscribing requires a signed auth string
    pub fn requires_auth(&self) -> bool {
        !matches!(self, ChannelType::Public)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelType::Public => "public",
            ChannelType::Private => "private",
            ChannelType::Presence => "presence",
            ChannelType::Encrypted => "encrypted",
        };
        f.write_str(name)
    }
}

/// Validated channel name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel {
    name: String,
    kind: ChannelType,
}

impl Channel {
    /// Validates a full channel name and detects its type
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_channel_name(&name)?;
        let kind = ChannelType::detect(&name);

        if name.len() == kind.prefix().len() {
            return Err(PusherError::validation(format!(
                "Channel name '{}' has a prefix but no name",
                name
            )));
        }

        Ok(Self { name, kind })
    }

    /// Gets the full channel name including prefix
    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn channel_type(&self) -> ChannelType {
        self.kind
    }

    pub fn requires_auth(&self) -> bool {
        self.kind.requires_auth()
    }
}

impl AsRef<str> for Channel {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Channel {
    type Err = PusherError;

    fn from_str(s: &str) -> Result<Self> {
        Channel::new(s)
    }
}

fn validate_channel_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PusherError::validation("Channel name cannot be empty"));
    }

    if name.len() > MAX_CHANNEL_NAME_LEN {
        return Err(PusherError::validation(format!(
            "Channel name too long: '{}' (max {} characters)",
            name, MAX_CHANNEL_NAME_LEN
        )));
    }

    if !CHANNEL_NAME_PATTERN.is_match(name) {
        return Err(PusherError::validation(format!(
            "Invalid channel name: '{}'. Must match pattern: [A-Za-z0-9_\\-=@,.;]+",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_creation() {
        assert!(Channel::new("test-channel").is_ok());
        assert!(Channel::new("private-test").is_ok());
        assert!(Channel::new("presence-test").is_ok());
        assert!(Channel::new("private-encrypted-test").is_ok());
        assert!("presence-room".parse::<Channel>().is_ok());
    }

    #[test]
    fn test_channel_type_detection() {
        assert_eq!(ChannelType::detect("test"), ChannelType::Public);
        assert_eq!(ChannelType::detect("private-test"), ChannelType::Private);
        assert_eq!(ChannelType::detect("presence-test"), ChannelType::Presence);
        assert_eq!(ChannelType::detect("private-encrypted-test"), ChannelType::Encrypted);

        let channel = Channel::new("presence-room").unwrap();
        assert_eq!(channel.channel_type(), ChannelType::Presence);
        assert!(channel.requires_auth());
        assert!(!Channel::new("news").unwrap().requires_auth());
    }

    #[test]
    fn test_channel_name_validation() {
        assert!(Channel::new("").is_err());
        assert!(Channel::new("a".repeat(201)).is_err());
        assert!(Channel::new("a".repeat(200)).is_ok());
        assert!(Channel::new("test channel").is_err()); // space not allowed
        assert!(Channel::new("test/channel").is_err());
        assert!(Channel::new("private-").is_err());
        assert!(Channel::new("test-channel_123").is_ok());
    }

    #[test]
    fn test_display_keeps_full_name() {
        let channel = Channel::new("private-encrypted-vault").unwrap();
        assert_eq!(channel.to_string(), "private-encrypted-vault");
        assert_eq!(channel.channel_type().to_string(), "encrypted");
    }
}
