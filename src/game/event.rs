use serde::Deserialize;
use serde::Serialize;

/// Discipline-authored annotation attached to a turn: a street dealt, a
/// showdown resolved, a seat eliminated. Free-form by design; the replay
/// verifier ignores these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl GameEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: None,
        }
    }
    pub fn with(kind: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = GameEvent::with("STREET", serde_json::json!({"street": "flop"}));
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"STREET","data":{"street":"flop"}}"#
        );
    }

    #[test]
    fn data_is_optional() {
        let event = GameEvent::new("FOLD");
        assert_eq!(serde_json::to_string(&event).unwrap(), r#"{"type":"FOLD"}"#);
    }
}
