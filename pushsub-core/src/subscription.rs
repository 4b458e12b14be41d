//! Wire types exchanged with the subscription endpoints.
//!
//! The subscription is owned by the browser's push service; these are only
//! snapshots of it, taken right before they are sent to the server.

use serde::{Deserialize, Serialize};

/// A push subscription in the shape of `PushSubscription.toJSON()`.
///
/// This is the body of `POST /save-subscription`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    /// Push service endpoint URL.
    pub endpoint: String,
    /// Expiry as milliseconds since the epoch, when the push service sets one.
    #[serde(default)]
    pub expiration_time: Option<u64>,
    /// Keys the server needs to encrypt payloads for this browser.
    #[serde(default)]
    pub keys: SubscriptionKeys,
}

/// Browser-side encryption material of a subscription.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// Browser's P-256 ECDH public key (base64url).
    #[serde(default)]
    pub p256dh: String,
    /// Shared auth secret (base64url).
    #[serde(default)]
    pub auth: String,
}

/// Body of `POST /delete-subscription`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub endpoint: String,
}

/// Acknowledgement returned by both endpoints, e.g. `{"status": "saved"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerAck {
    pub status: String,
}

impl ServerAck {
    /// Decode a response body, ignoring bodies that aren't an acknowledgement.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_matches_browser_json() {
        let value = json!({
            "endpoint": "https://push.example.com/abc",
            "expirationTime": null,
            "keys": { "p256dh": "BPk", "auth": "c2Vj" }
        });
        let record: SubscriptionRecord = serde_json::from_value(value.clone()).expect("deserialize");
        assert_eq!(record.endpoint, "https://push.example.com/abc");
        assert_eq!(record.expiration_time, None);
        assert_eq!(record.keys.auth, "c2Vj");

        assert_eq!(serde_json::to_value(&record).expect("serialize"), value);
    }

    #[test]
    fn test_record_requires_endpoint() {
        let value = json!({ "keys": { "p256dh": "BPk", "auth": "c2Vj" } });
        assert!(serde_json::from_value::<SubscriptionRecord>(value).is_err());
    }

    #[test]
    fn test_delete_request_body() {
        let body = DeleteRequest {
            endpoint: "https://push.example.com/abc".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).expect("serialize"),
            r#"{"endpoint":"https://push.example.com/abc"}"#
        );
    }

    #[test]
    fn test_server_ack() {
        assert_eq!(
            ServerAck::from_body(r#"{"status":"exists"}"#).map(|a| a.status),
            Some("exists".to_string())
        );
        assert_eq!(ServerAck::from_body("<html>"), None);
    }
}
