use std::{
    collections::{HashMap, HashSet},
    convert::TryFrom,
};

use tracing::trace;

use crate::{
    core::{
        bilinear_map::BilinearMap,
        encoding,
        wfibe::{Ciphertext, MasterSecret, PublicParameters, SecretKey, Wfibe},
    },
    error::WfibeErr,
};

/// The engine is the main entry point for the core WFIBE functionalities.
/// It supplies a simple API over named attribute sets and weighted policy
/// maps: one-time system setup, constant-size user key derivation and
/// hybrid encryption with a sender-chosen matching threshold.
///
/// Every operation is a pure function over explicit inputs, so any
/// transport can wrap them without change.
#[derive(Debug, Default, Clone)]
pub struct Engine<G: BilinearMap> {
    sch: Wfibe<G>,
}

impl<G: BilinearMap> Engine<G> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sch: Wfibe::default(),
        }
    }

    /// One-time system setup. Nothing is published on failure: no public
    /// parameters exist unless both dual bases were generated.
    pub fn setup(
        &self,
        n: usize,
        m: usize,
    ) -> Result<(MasterSecret<G>, PublicParameters<G>), WfibeErr> {
        self.sch.setup(n, m)
    }

    /// Derive the 4-element secret key for the identity described by an
    /// attribute set and a weighted policy map.
    pub fn generate_user_key(
        &self,
        msk: &MasterSecret<G>,
        params: &PublicParameters<G>,
        attributes: &HashSet<String>,
        policy: &HashMap<String, i32>,
    ) -> Result<SecretKey<G>, WfibeErr> {
        trace!(
            "user key request: {} attributes, {} policy entries",
            attributes.len(),
            policy.len()
        );
        let policy_vector = encoding::encode_policy(policy, params.vector_dim_n());
        let attribute_vector = encoding::encode_attributes(attributes, params.vector_dim_m());
        self.sch
            .key_generation(msk, params, &policy_vector, &attribute_vector)
    }

    /// Encrypt one payload under the sender's attribute set and policy map
    /// with the given matching threshold.
    pub fn encrypt(
        &self,
        params: &PublicParameters<G>,
        message: &[u8],
        sender_attributes: &HashSet<String>,
        sender_policy: &HashMap<String, i32>,
        threshold: u32,
    ) -> Result<Ciphertext<G>, WfibeErr> {
        let attribute_vector =
            encoding::encode_attributes(sender_attributes, params.vector_dim_n());
        let policy_vector = encoding::encode_policy(sender_policy, params.vector_dim_m());
        let attribute_count = u32::try_from(sender_attributes.len())?;
        self.sch.encrypt_with_vectors(
            params,
            message,
            &attribute_vector,
            &policy_vector,
            attribute_count,
            threshold,
        )
    }

    /// Batch encryption: the attribute and policy vectors are encoded once
    /// and reused across the batch; r1 and r2 are freshly sampled for every
    /// message.
    pub fn encrypt_batch(
        &self,
        params: &PublicParameters<G>,
        messages: &[Vec<u8>],
        sender_attributes: &HashSet<String>,
        sender_policy: &HashMap<String, i32>,
        threshold: u32,
    ) -> Result<Vec<Ciphertext<G>>, WfibeErr> {
        let attribute_vector =
            encoding::encode_attributes(sender_attributes, params.vector_dim_n());
        let policy_vector = encoding::encode_policy(sender_policy, params.vector_dim_m());
        let attribute_count = u32::try_from(sender_attributes.len())?;
        messages
            .iter()
            .map(|message| {
                self.sch.encrypt_with_vectors(
                    params,
                    message,
                    &attribute_vector,
                    &policy_vector,
                    attribute_count,
                    threshold,
                )
            })
            .collect()
    }
}
