use serde_json::Value;

/// Shown when the request never produced an HTTP response.
pub const NETWORK_ERROR: &str = "Network or server error";

/// Keys whose value is the whole message, in priority order.
const MESSAGE_KEYS: [&str; 4] = ["detail", "message", "non_field_errors", "error"];

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized { body: Option<Value> },
    #[error("server responded with status {status}")]
    Server { status: u16, body: Option<Value> },
    #[error("Network or server error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Human readable text extracted from the error payload, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            ApiError::Unauthorized { body } | ApiError::Server { body, .. } => {
                body.as_ref().and_then(describe)
            }
            ApiError::Transport(_) => Some(NETWORK_ERROR.to_string()),
            ApiError::Decode(_) | ApiError::Url(_) => None,
        }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Flattens a DRF style error payload into one line.
pub fn describe(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.trim().to_string()).filter(|text| !text.is_empty()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(describe).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => {
            if let Some(message) = MESSAGE_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(describe))
            {
                return Some(message);
            }
            let parts: Vec<String> = map
                .iter()
                .filter_map(|(field, value)| describe(value).map(|text| format!("{field}: {text}")))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
    }
}
