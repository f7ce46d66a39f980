//! The key-issuing authority: owns the master secret after a one-time
//! setup and serves stateless key requests.
//!
//! Setup is the initialization barrier: if it fails, no `KeyAuthority`
//! value exists, so no request can ever be served against half-initialized
//! state. After setup the master secret and public parameters are
//! read-only, so `issue_key` takes `&self` and a bounded worker pool can
//! call it concurrently without locking.

use std::time::Instant;

use tracing::{debug, trace};

use crate::{
    core::{
        bilinear_map::BilinearMap,
        wfibe::{
            scheme::unix_timestamp_millis, AsBytes, MasterSecret, ParameterBundle,
            PublicParameters,
        },
        Engine,
    },
    error::WfibeErr,
    interfaces::protocol::{KeyRequest, KeyResponse},
};

pub struct KeyAuthority<G: BilinearMap> {
    engine: Engine<G>,
    msk: MasterSecret<G>,
    params: PublicParameters<G>,
}

impl<G: BilinearMap> KeyAuthority<G> {
    /// One-time setup: generate the dual bases and the public parameters.
    pub fn setup(n: usize, m: usize) -> Result<Self, WfibeErr> {
        let engine = Engine::new();
        let (msk, params) = engine.setup(n, m)?;
        debug!("authority ready (n: {}, m: {})", n, m);
        Ok(Self {
            engine,
            msk,
            params,
        })
    }

    pub fn public_parameters(&self) -> &PublicParameters<G> {
        &self.params
    }

    /// Export the public parameter bundle for distribution to encrypting
    /// parties.
    pub fn export_parameters(&self) -> Result<Vec<u8>, WfibeErr> {
        self.params.export()?.try_into_bytes()
    }

    /// Rebuild a parameter bundle from exported bytes (encrypting-party
    /// side helper).
    pub fn import_parameters(bytes: &[u8]) -> Result<ParameterBundle, WfibeErr> {
        ParameterBundle::try_from_bytes(bytes)
    }

    /// Serve one key request. Failures are reported in the response, never
    /// as a panic; the authority keeps serving.
    pub fn issue_key(&self, request: &KeyRequest) -> KeyResponse {
        let request_id = unix_timestamp_millis();
        let start = Instant::now();
        trace!(
            "[{}] key request: {} attributes, {} policy entries",
            request_id,
            request.attributes.len(),
            request.policy.len()
        );

        let outcome = self
            .engine
            .generate_user_key(&self.msk, &self.params, &request.attributes, &request.policy)
            .and_then(|key| key.try_into_bytes());

        let keygen_ms = start.elapsed().as_millis() as u64;
        match outcome {
            Ok(bytes) => {
                debug!(
                    "[{}] key generated in {} ms ({} bytes)",
                    request_id,
                    keygen_ms,
                    bytes.len()
                );
                KeyResponse {
                    request_id,
                    key_size: bytes.len(),
                    secret_key: Some(bytes),
                    error: None,
                    keygen_ms,
                    timestamp: unix_timestamp_millis(),
                }
            }
            Err(e) => {
                debug!("[{}] key generation failed: {}", request_id, e);
                KeyResponse {
                    request_id,
                    secret_key: None,
                    error: Some(e.to_string()),
                    keygen_ms,
                    key_size: 0,
                    timestamp: unix_timestamp_millis(),
                }
            }
        }
    }
}
