use std::convert::TryFrom;

use crate::{
    core::{
        bilinear_map::BilinearMap,
        wfibe::{
            scheme::{BasisImage, PublicParameters},
            AsBytes,
        },
    },
    error::WfibeErr,
};

/// Wire-format twin of `PublicParameters`: raw byte encodings plus plain
/// integers, safe to persist or ship to an encrypting party. Conversion to
/// and from the live, pairing-backed form is explicit and validating; the
/// two representations are never conflated.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBundle {
    pub n: u32,
    pub m: u32,
    pub g1: Vec<u8>,
    pub g2: Vec<u8>,
    pub z: Vec<u8>,
    pub mpk1_row1: Vec<Vec<u8>>,
    pub mpk1_row2: Vec<Vec<u8>>,
    pub mpk2_row1: Vec<Vec<u8>>,
    pub mpk2_row2: Vec<Vec<u8>>,
    pub descriptor: String,
}

impl AsBytes for ParameterBundle {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        let mut res = self.n.try_into_bytes()?;
        res.append(&mut self.m.try_into_bytes()?);
        res.append(&mut self.g1.try_into_bytes()?);
        res.append(&mut self.g2.try_into_bytes()?);
        res.append(&mut self.z.try_into_bytes()?);
        res.append(&mut self.mpk1_row1.try_into_bytes()?);
        res.append(&mut self.mpk1_row2.try_into_bytes()?);
        res.append(&mut self.mpk2_row1.try_into_bytes()?);
        res.append(&mut self.mpk2_row2.try_into_bytes()?);
        res.append(&mut self.descriptor.try_into_bytes()?);
        Ok(res)
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        let n = u32::try_from_bytes(bytes)?;
        let mut offset = n.len_bytes();
        let m = u32::try_from_bytes(&bytes[offset..])?;
        offset += m.len_bytes();
        let g1 = Vec::<u8>::try_from_bytes(&bytes[offset..])?;
        offset += g1.len_bytes();
        let g2 = Vec::<u8>::try_from_bytes(&bytes[offset..])?;
        offset += g2.len_bytes();
        let z = Vec::<u8>::try_from_bytes(&bytes[offset..])?;
        offset += z.len_bytes();
        let mpk1_row1 = Vec::<Vec<u8>>::try_from_bytes(&bytes[offset..])?;
        offset += mpk1_row1.len_bytes();
        let mpk1_row2 = Vec::<Vec<u8>>::try_from_bytes(&bytes[offset..])?;
        offset += mpk1_row2.len_bytes();
        let mpk2_row1 = Vec::<Vec<u8>>::try_from_bytes(&bytes[offset..])?;
        offset += mpk2_row1.len_bytes();
        let mpk2_row2 = Vec::<Vec<u8>>::try_from_bytes(&bytes[offset..])?;
        offset += mpk2_row2.len_bytes();
        let descriptor = String::try_from_bytes(&bytes[offset..])?;

        Ok(Self {
            n,
            m,
            g1,
            g2,
            z,
            mpk1_row1,
            mpk1_row2,
            mpk2_row1,
            mpk2_row2,
            descriptor,
        })
    }

    fn len_bytes(&self) -> usize {
        self.n.len_bytes()
            + self.m.len_bytes()
            + self.g1.len_bytes()
            + self.g2.len_bytes()
            + self.z.len_bytes()
            + self.mpk1_row1.len_bytes()
            + self.mpk1_row2.len_bytes()
            + self.mpk2_row1.len_bytes()
            + self.mpk2_row2.len_bytes()
            + self.descriptor.len_bytes()
    }
}

fn row_to_bytes<T: AsBytes>(row: &[T]) -> Result<Vec<Vec<u8>>, WfibeErr> {
    row.iter().map(AsBytes::try_into_bytes).collect()
}

fn row_from_bytes<T: AsBytes>(row: &[Vec<u8>], expected: usize) -> Result<Vec<T>, WfibeErr> {
    if row.len() != expected {
        return Err(WfibeErr::Deserialization(format!(
            "invalid basis image row: {} elements, expected {}",
            row.len(),
            expected
        )));
    }
    row.iter().map(|b| T::try_from_bytes(b)).collect()
}

impl<G: BilinearMap> PublicParameters<G> {
    /// Export to the wire form, byte-identical on round-trip.
    pub fn export(&self) -> Result<ParameterBundle, WfibeErr> {
        Ok(ParameterBundle {
            n: u32::try_from(self.n)?,
            m: u32::try_from(self.m)?,
            g1: self.g1.try_into_bytes()?,
            g2: self.g2.try_into_bytes()?,
            z: self.z.try_into_bytes()?,
            mpk1_row1: row_to_bytes(&self.mpk1.row1)?,
            mpk1_row2: row_to_bytes(&self.mpk1.row2)?,
            mpk2_row1: row_to_bytes(&self.mpk2.row1)?,
            mpk2_row2: row_to_bytes(&self.mpk2.row2)?,
            descriptor: self.descriptor.clone(),
        })
    }

    /// Rebuild the live form from a wire bundle. The pairing descriptor and
    /// the dimensions are validated before any group element is decoded.
    pub fn import(bundle: &ParameterBundle) -> Result<Self, WfibeErr> {
        if bundle.descriptor != G::description() {
            return Err(WfibeErr::PairingMismatch {
                expected: G::description(),
                got: bundle.descriptor.clone(),
            });
        }
        if bundle.n == 0 || bundle.m == 0 {
            return Err(WfibeErr::InvalidDimension(format!(
                "vector dimensions must be positive (n: {}, m: {})",
                bundle.n, bundle.m
            )));
        }
        let n = bundle.n as usize;
        let m = bundle.m as usize;

        Ok(Self {
            n,
            m,
            g1: G::G1::try_from_bytes(&bundle.g1)?,
            g2: G::G2::try_from_bytes(&bundle.g2)?,
            z: G::Scalar::try_from_bytes(&bundle.z)?,
            mpk1: BasisImage {
                row1: row_from_bytes(&bundle.mpk1_row1, n + 1)?,
                row2: row_from_bytes(&bundle.mpk1_row2, n + 1)?,
            },
            mpk2: BasisImage {
                row1: row_from_bytes(&bundle.mpk2_row1, m + 1)?,
                row2: row_from_bytes(&bundle.mpk2_row2, m + 1)?,
            },
            descriptor: bundle.descriptor.clone(),
        })
    }
}
