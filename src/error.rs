use std::{
    array::TryFromSliceError,
    convert::From,
    num::{ParseIntError, TryFromIntError},
};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WfibeErr {
    #[error("invalid vector dimension: {0}")]
    InvalidDimension(String),
    #[error("pairing parameters mismatch: expected {expected}, got {got}")]
    PairingMismatch { expected: String, got: String },
    #[error("invalid size")]
    InvalidSize(String),
    #[error("{0}")]
    Deserialization(String),
    #[error("{0}")]
    Serialization(String),
    #[error("key generation {0}")]
    KeyGeneration(String),
    #[error("encryption {0}")]
    Encryption(String),
    #[error("symmetric encryption {0}")]
    SymmetricEncryption(String),
    #[error("symmetric decryption {0}")]
    SymmetricDecryption(String),
    #[error("{0}")]
    InternalOperation(String),
    #[error("conversion failed")]
    ConversionFailed,
}

impl From<TryFromIntError> for WfibeErr {
    fn from(_e: TryFromIntError) -> Self {
        WfibeErr::ConversionFailed
    }
}

impl From<TryFromSliceError> for WfibeErr {
    fn from(_e: TryFromSliceError) -> Self {
        WfibeErr::ConversionFailed
    }
}

impl From<ParseIntError> for WfibeErr {
    fn from(_e: ParseIntError) -> Self {
        WfibeErr::ConversionFailed
    }
}

impl From<serde_json::Error> for WfibeErr {
    fn from(e: serde_json::Error) -> Self {
        WfibeErr::Deserialization(e.to_string())
    }
}
