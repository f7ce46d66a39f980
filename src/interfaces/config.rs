//! Plain configuration surface for an authority deployment. None of this
//! is security-critical; unspecified fields take the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::WfibeErr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    pub vector_dim_n: usize,
    pub vector_dim_m: usize,
    pub listen_port: u16,
    pub connection_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub worker_pool_size: usize,
    pub public_params_path: String,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            vector_dim_n: 64,
            vector_dim_m: 64,
            listen_port: 8080,
            connection_timeout_ms: 5_000,
            read_timeout_ms: 30_000,
            worker_pool_size: 10,
            public_params_path: "public_params.dat".to_string(),
        }
    }
}

impl AuthorityConfig {
    pub fn from_json(json: &[u8]) -> Result<Self, WfibeErr> {
        Ok(serde_json::from_slice(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() -> Result<(), WfibeErr> {
        let config = AuthorityConfig::from_json(br#"{"vector_dim_n": 128}"#)?;
        assert_eq!(config.vector_dim_n, 128);
        assert_eq!(config.vector_dim_m, 64);
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.worker_pool_size, 10);
        Ok(())
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(AuthorityConfig::from_json(b"not json").is_err());
    }
}
