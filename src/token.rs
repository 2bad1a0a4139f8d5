use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// App key and secret pair used to sign API requests and channel auth strings
#[derive(Clone)]
pub struct Token {
    pub key: String,
    secret: SecretString,
}

/// Wrapper for secret that ensures it's zeroed on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct SecretString(String);

impl Token {
    /// Creates a new token with the given key and secret
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: SecretString(secret.into()),
        }
    }

    /// Signs the string using HMAC-SHA256, lowercase hex
    pub fn sign(&self, data: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.0.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(data.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};

    #[test]
    fn test_sign_known_vector() {
        let token = Token::new("key", "secret123");
        assert_eq!(
            token.sign("123.456:test-channel"),
            "730f107607010e9adaea2fc7316fdcb9802312c991b0031ae3d56057130ee9ea"
        );
    }

    #[test]
    fn test_sign_matches_reference_hmac() {
        let token = Token::new("key", "secret123");
        let data = "some data to sign";

        let mut reference = Hmac::<Sha256>::new_from_slice(b"secret123").unwrap();
        reference.update(data.as_bytes());
        let expected = hex::encode(reference.finalize().into_bytes());

        assert_eq!(token.sign(data), expected);
        assert_eq!(token.sign(data), token.sign(data), "HMAC should be deterministic");
    }

    #[test]
    fn test_debug_redaction() {
        let token = Token::new("public_key", "secret_key");
        let debug_str = format!("{:?}", token);

        assert!(debug_str.contains("public_key"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("secret_key"));
    }
}
