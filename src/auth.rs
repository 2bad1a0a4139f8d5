use serde_json::{Map, Value};
use crate::{Token, util};

/// Authentication data for socket connections
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SocketAuth {
    pub auth: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub channel_data: Option<String>,
}

impl SocketAuth {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Signs `socket_id:channel`, or `socket_id:channel:custom_data` when custom
/// data is present. Empty custom data counts as absent.
pub fn socket_signature(
    token: &Token,
    channel: &str,
    socket_id: &str,
    custom_data: Option<&str>,
) -> SocketAuth {
    let custom_data = custom_data.filter(|data| !data.is_empty());

    let auth_string = match custom_data {
        Some(data) => format!("{}:{}:{}", socket_id, channel, data),
        None => format!("{}:{}", socket_id, channel),
    };
    let signature = token.sign(&auth_string);

    SocketAuth {
        auth: format!("{}:{}", token.key, signature),
        channel_data: custom_data.map(str::to_string),
    }
}

/// Serializes presence member data: `{"user_id": ...}` plus `user_info`
/// when it is truthy
pub fn presence_user_data(user_id: &str, user_info: Option<&Value>) -> crate::Result<String> {
    let mut user_data = Map::new();
    user_data.insert("user_id".to_string(), Value::String(user_id.to_string()));

    if let Some(info) = user_info.filter(|info| util::is_truthy(info)) {
        user_data.insert("user_info".to_string(), info.clone());
    }

    Ok(serde_json::to_string(&Value::Object(user_data))?)
}

/// Signs a presence subscription; the member data doubles as channel data
pub fn presence_signature(
    token: &Token,
    channel: &str,
    socket_id: &str,
    user_id: &str,
    user_info: Option<&Value>,
) -> crate::Result<SocketAuth> {
    let user_data = presence_user_data(user_id, user_info)?;
    Ok(socket_signature(token, channel, socket_id, Some(&user_data)))
}
