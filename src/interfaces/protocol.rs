//! Transport-neutral request/response types.
//!
//! The core operations are pure functions over explicit inputs; these
//! structs define the message boundary any transport (socket, RPC, file
//! drop) can carry them over. Timing and size fields are advisory
//! observability metadata, not part of the cryptographic contract.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::wfibe::scheme::unix_timestamp_millis;

/// Request for a user secret key, sent to the key-issuing authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyRequest {
    pub attributes: HashSet<String>,
    pub policy: HashMap<String, i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub timestamp: u64,
}

impl KeyRequest {
    #[must_use]
    pub fn new(attributes: HashSet<String>, policy: HashMap<String, i32>) -> Self {
        Self {
            attributes,
            policy,
            client_id: None,
            timestamp: unix_timestamp_millis(),
        }
    }

    #[must_use]
    pub fn with_client_id(
        attributes: HashSet<String>,
        policy: HashMap<String, i32>,
        client_id: &str,
    ) -> Self {
        Self {
            attributes,
            policy,
            client_id: Some(client_id.to_string()),
            timestamp: unix_timestamp_millis(),
        }
    }
}

/// Authority response: either the serialized 4-element secret key or a
/// failure reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyResponse {
    pub request_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub keygen_ms: u64,
    pub key_size: usize,
    pub timestamp: u64,
}

impl KeyResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.secret_key.is_some()
    }
}

/// Envelope for delivering one ciphertext over a point-to-point connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CiphertextEnvelope {
    pub sequence: u64,
    pub sender_id: String,
    pub timestamp: u64,
    /// serialized `Ciphertext`
    pub ciphertext: Vec<u8>,
}

impl CiphertextEnvelope {
    #[must_use]
    pub fn new(sequence: u64, sender_id: &str, ciphertext: Vec<u8>) -> Self {
        Self {
            sequence,
            sender_id: sender_id.to_string(),
            timestamp: unix_timestamp_millis(),
            ciphertext,
        }
    }
}

/// Receiver acknowledgement for one envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAck {
    pub sequence: u64,
    pub ok: bool,
}
