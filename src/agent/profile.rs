use crate::hashing;
use serde::Deserialize;
use serde::Serialize;

/// Transport class of an agent. The core only ever sees `decide`; the
/// kind is carried so logs identify what sat behind the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Local,
    Llm,
    Webhook,
    Framework,
}

/// Identity of one agent variant.
///
/// The fingerprint hashes `(id, version, config)` so a reader of a match
/// log knows exactly which configuration played, not just its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub id: String,
    pub version: String,
    pub display_name: String,
    pub kind: AgentKind,
    #[serde(default)]
    pub config: serde_json::Value,
}

impl AgentProfile {
    pub fn local(id: &str) -> Self {
        Self {
            id: id.to_string(),
            version: "1".to_string(),
            display_name: id.to_string(),
            kind: AgentKind::Local,
            config: serde_json::Value::Null,
        }
    }

    pub fn fingerprint(&self) -> String {
        #[derive(Serialize)]
        struct Identity<'a> {
            id: &'a str,
            version: &'a str,
            config: &'a serde_json::Value,
        }
        hashing::canonical_hash(&Identity {
            id: &self.id,
            version: &self.version,
            config: &self.config,
        })
        .expect("identity is serializable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable() {
        let a = AgentProfile::local("caller");
        let b = AgentProfile::local("caller");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_tracks_identity_not_display() {
        let mut a = AgentProfile::local("caller");
        let mut b = AgentProfile::local("caller");
        b.display_name = "The Caller".to_string();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.version = "2".to_string();
        assert_ne!(a.fingerprint(), b.fingerprint());
        a.config = serde_json::json!({"aggression": 0.5});
        assert_ne!(a.fingerprint(), AgentProfile::local("caller").fingerprint());
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AgentKind::Webhook).unwrap(),
            r#""webhook""#
        );
    }
}
