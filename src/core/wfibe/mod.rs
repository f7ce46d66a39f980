pub(crate) mod basis;
pub(crate) mod params;
pub(crate) mod scheme;
pub mod symmetric;

use std::convert::{TryFrom, TryInto};

pub use params::ParameterBundle;
pub use scheme::{
    BasisImage, Ciphertext, DualBasis, MasterSecret, PublicParameters, SecretKey, Wfibe,
};

use crate::error::WfibeErr;

pub trait AsBytes: Sized {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr>;
    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr>;
    fn len_bytes(&self) -> usize;
}

impl AsBytes for u8 {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        Ok(vec![*self])
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        bytes.first().copied().ok_or_else(|| {
            WfibeErr::Deserialization(
                "cannot deserialize u8 element from an empty input".to_string(),
            )
        })
    }

    fn len_bytes(&self) -> usize {
        1
    }
}

impl AsBytes for u32 {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        Ok(self.to_be_bytes().to_vec())
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        if bytes.len() < 4 {
            return Err(WfibeErr::Deserialization(
                "cannot deserialize u32 element since input bytes size is less than 4 bytes"
                    .to_string(),
            ));
        }
        Ok(Self::from_be_bytes(bytes[0..4].try_into()?))
    }

    fn len_bytes(&self) -> usize {
        4
    }
}

impl AsBytes for u64 {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        Ok(self.to_be_bytes().to_vec())
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        if bytes.len() < 8 {
            return Err(WfibeErr::Deserialization(
                "cannot deserialize u64 element since input bytes size is less than 8 bytes"
                    .to_string(),
            ));
        }
        Ok(Self::from_be_bytes(bytes[0..8].try_into()?))
    }

    fn len_bytes(&self) -> usize {
        8
    }
}

impl AsBytes for String {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        let mut bytes = Vec::with_capacity(4 + self.len());
        bytes.extend_from_slice(&u32::try_from(self.len())?.to_be_bytes());
        bytes.extend_from_slice(self.as_bytes());
        Ok(bytes)
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        if bytes.len() < 4 {
            return Err(WfibeErr::Deserialization(
                "cannot deserialize string element since input bytes size is less than 4 bytes"
                    .to_string(),
            ));
        }
        let len = u32::from_be_bytes(bytes[0..4].try_into()?) as usize;
        if bytes.len() < 4 + len {
            return Err(WfibeErr::Deserialization(
                "deserializing string element failed. Data altered?".to_string(),
            ));
        }
        Self::from_utf8(bytes[4..4 + len].to_vec())
            .map_err(|e| WfibeErr::Deserialization(e.to_string()))
    }

    fn len_bytes(&self) -> usize {
        4 + self.len()
    }
}

impl<T: AsBytes> AsBytes for Vec<T> {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        // nb element in vector
        let mut bytes = Vec::new();
        let len = u32::try_from(self.len())?.to_be_bytes();
        bytes.extend_from_slice(&len);
        for val in self.iter() {
            bytes.append(&mut val.try_into_bytes()?)
        }
        Ok(bytes)
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        if bytes.len() < 4 {
            return Err(WfibeErr::Deserialization(
                "cannot deserialize vector element since input bytes size is less than 4 bytes"
                    .to_string(),
            ));
        }
        // retrieve len of vector
        let len: [u8; 4] = bytes[0..4].try_into()?;
        let len = u32::from_be_bytes(len) as usize;
        if len >= u32::MAX as usize {
            return Err(WfibeErr::Deserialization(
                "deserializing element failed. Data altered?".to_string(),
            ));
        }
        let mut res = Self::with_capacity(len);
        res.push(T::try_from_bytes(&bytes[4..])?);
        // deserialize
        for i in 1..len {
            let beg = i * res[0].len_bytes();
            res.push(T::try_from_bytes(&bytes[4 + beg..])?)
        }
        Ok(res)
    }

    fn len_bytes(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            4 + (self.len() * self[0].len_bytes())
        }
    }
}
