use serde::Serialize;
use std::collections::BTreeMap;

/// Key under which every error detail is emitted
pub const MESSAGE_KEY: &str = "message";

const EMPTY_DIAGNOSTIC: &str = "unclassified failure";

/// Value of an error detail: a single text or one entry per offending item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    List(Vec<String>),
}

pub type ErrorMap = BTreeMap<String, ErrorDetail>;

/// `{"message": <message>}`
pub fn from_message(message: impl Into<String>) -> ErrorMap {
    single(ErrorDetail::Text(message.into()))
}

/// `{"message": [<entry>, ...]}`, entries kept as a list
pub fn from_messages(messages: Vec<String>) -> ErrorMap {
    single(ErrorDetail::List(messages))
}

/// Diagnostic map for an arbitrary error: the whole cause chain, never empty
pub fn from_error(error: &anyhow::Error) -> ErrorMap {
    let rendered = format!("{:#}", error);
    if rendered.trim().is_empty() {
        from_message(EMPTY_DIAGNOSTIC)
    } else {
        from_message(rendered)
    }
}

fn single(detail: ErrorDetail) -> ErrorMap {
    let mut map = ErrorMap::new();
    map.insert(MESSAGE_KEY.to_string(), detail);
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_map_shape() {
        let map = from_message("sku ABC123 not found");
        assert_eq!(serde_json::to_value(&map).unwrap(), json!({"message": "sku ABC123 not found"}));
    }

    #[test]
    fn test_list_is_not_joined() {
        let map = from_messages(vec!["price: must be greater than 0".into(), "quantity: must be greater than 0".into()]);
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"message": ["price: must be greater than 0", "quantity: must be greater than 0"]})
        );
    }

    #[test]
    fn test_error_map_includes_cause_chain() {
        let error = anyhow::anyhow!("connection refused").context("inventory lookup failed");

        let map = from_error(&error);
        assert_eq!(
            map.get(MESSAGE_KEY),
            Some(&ErrorDetail::Text("inventory lookup failed: connection refused".into()))
        );
    }

    #[test]
    fn test_empty_error_still_produces_diagnostic() {
        let map = from_error(&anyhow::anyhow!(""));
        assert_eq!(map.get(MESSAGE_KEY), Some(&ErrorDetail::Text(EMPTY_DIAGNOSTIC.into())));
    }
}
