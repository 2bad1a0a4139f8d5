use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::LazyLock;
use regex::Regex;
use serde_json::Value;

static SOCKET_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+$").unwrap()
});

/// Longest event name the API accepts
pub const MAX_EVENT_NAME_LEN: usize = 200;

/// Converts a map to an ordered array of key=value pairs
///
/// Values are not percent-encoded; the signature covers them verbatim.
pub fn to_ordered_array(map: &BTreeMap<&str, String>) -> Vec<String> {
    map.iter()
        .map(|(key, value)| {
            let mut result = String::with_capacity(key.len() + value.len() + 1);
            let _ = write!(&mut result, "{}={}", key, value);
            result
        })
        .collect()
}

/// Calculates MD5 hash of the input
/// Note: MD5 is used here for compatibility with Pusher's protocol, not for security
pub fn get_md5(body: &str) -> String {
    let digest = md5::compute(body.as_bytes());
    hex::encode(digest.as_ref())
}

/// Validates a socket ID
pub fn validate_socket_id(socket_id: &str) -> crate::Result<()> {
    if !SOCKET_ID_PATTERN.is_match(socket_id) {
        return Err(crate::PusherError::validation(format!(
            "Invalid socket id: '{}'. Must be in format: \\d+.\\d+",
            socket_id
        )));
    }
    Ok(())
}

/// Validates an event name
///
/// The name goes into the signed query string verbatim, so characters that
/// would split or end the query are rejected.
pub fn validate_event_name(event: &str) -> crate::Result<()> {
    if event.is_empty() {
        return Err(crate::PusherError::validation("Event name cannot be empty"));
    }

    if event.len() > MAX_EVENT_NAME_LEN {
        return Err(crate::PusherError::validation(format!(
            "Event name too long: '{}' (max {} characters)",
            event, MAX_EVENT_NAME_LEN
        )));
    }

    if let Some(bad) = event.chars().find(|c| is_query_unsafe(*c)) {
        return Err(crate::PusherError::validation(format!(
            "Invalid character {:?} in event name: '{}'",
            bad, event
        )));
    }

    Ok(())
}

fn is_query_unsafe(c: char) -> bool {
    matches!(c, '&' | '=' | '#' | '?' | '%' | '+') || c.is_whitespace() || c.is_control()
}

/// Seconds since the unix epoch
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Loose truthiness of a JSON value: null, false, 0, "", [] and {} are falsy.
/// Unlike PHP's loose comparison, the string "0" counts as truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_socket_id() {
        assert!(validate_socket_id("123.456").is_ok());
        assert!(validate_socket_id("0.0").is_ok());
        assert!(validate_socket_id("123").is_err());
        assert!(validate_socket_id("123.456.789").is_err());
        assert!(validate_socket_id("abc.def").is_err());
        assert!(validate_socket_id("123.456:evil").is_err());
    }

    #[test]
    fn test_validate_event_name() {
        assert!(validate_event_name("my-event").is_ok());
        assert!(validate_event_name(&"e".repeat(200)).is_ok());
        assert!(validate_event_name("").is_err());
        assert!(validate_event_name(&"e".repeat(201)).is_err());
        assert!(validate_event_name("client-msg:v1.sent@room;x,y").is_ok());
    }

    #[test]
    fn test_validate_event_name_rejects_query_breakers() {
        for event in [
            "a#b",
            "x&socket_id=9.9",
            "a=b",
            "what?",
            "100%",
            "a+b",
            "two words",
            "tab\tname",
            "line\nbreak",
            "nul\0byte",
        ] {
            assert!(validate_event_name(event).is_err(), "accepted {:?}", event);
        }
    }

    #[test]
    fn test_to_ordered_array() {
        let mut map = BTreeMap::new();
        map.insert("name", "my-event".to_string());
        map.insert("auth_key", "key".to_string());
        map.insert("body_md5", "abc".to_string());

        let result = to_ordered_array(&map);
        assert_eq!(result, vec!["auth_key=key", "body_md5=abc", "name=my-event"]);
    }

    #[test]
    fn test_get_md5() {
        let hash = get_md5("hello");
        assert_eq!(hash, "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(7)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!({"name": "Ada"})));
    }

    #[test]
    fn test_current_timestamp() {
        // Sanity bound: after 2020-01-01
        assert!(current_timestamp() > 1_577_836_800);
    }
}
