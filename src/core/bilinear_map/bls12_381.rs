use core::ops::{Add, Deref, DerefMut, Div, Mul, Neg, Sub};
use std::convert::TryInto;

use cosmian_bls12_381::{pairing, G1Affine, G1Projective, G2Affine, G2Projective, Gt};
use ff::Field;
use group::Group;
use rand::{CryptoRng, RngCore};

use super::BilinearMap;
use crate::{core::wfibe::AsBytes, error::WfibeErr};

#[derive(Default, Debug, PartialEq, Clone)]
pub struct Bls12_381;

#[derive(Clone, Debug)]
pub struct Scalar(cosmian_bls12_381::Scalar);

impl Deref for Scalar {
    type Target = cosmian_bls12_381::Scalar;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Scalar {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> Add<&'a Scalar> for Scalar {
    type Output = Self;

    fn add(self, rhs: &'a Scalar) -> Self {
        Scalar(self.0 + rhs.0)
    }
}

impl<'a> Sub<&'a Scalar> for Scalar {
    type Output = Self;

    fn sub(self, rhs: &'a Scalar) -> Self {
        Scalar(self.0 - rhs.0)
    }
}

impl<'a> Mul<&'a Scalar> for Scalar {
    type Output = Self;

    fn mul(self, rhs: &'a Scalar) -> Self {
        Scalar(self.0 * rhs.0)
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<'a> Div<&'a Scalar> for Scalar {
    type Output = Self;

    fn div(self, rhs: &'a Scalar) -> Self {
        let inv = rhs.invert().unwrap(); // Division by Zero;
        Scalar(self.0 * inv)
    }
}

impl Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        Scalar(-self.0)
    }
}

impl From<i64> for Scalar {
    fn from(int: i64) -> Self {
        let scalar = cosmian_bls12_381::Scalar::from(int.unsigned_abs());
        if int < 0 {
            Scalar(-scalar)
        } else {
            Scalar(scalar)
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl AsBytes for Scalar {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        Ok(self.to_bytes().to_vec())
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        if bytes.len() < 32 {
            return Err(WfibeErr::InvalidSize(format!(
                "Invalid scalar element (size {}, expected size at least: {} bytes long), unable \
                 to deserialize this scalar element.",
                bytes.len(),
                32
            )));
        }

        let inner = cosmian_bls12_381::Scalar::from_bytes(bytes[0..32].try_into()?);
        if inner.is_some().into() {
            Ok(Scalar(inner.unwrap()))
        } else {
            Err(WfibeErr::Deserialization(
                "Failed deserializing scalar".to_string(),
            ))
        }
    }

    fn len_bytes(&self) -> usize {
        32
    }
}

impl AsBytes for cosmian_bls12_381::G1Affine {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        Ok(self.to_compressed().to_vec())
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        if bytes.len() < 48 {
            return Err(WfibeErr::InvalidSize(format!(
                "Invalid G1 element (size {}, compressed expected size at least: {} bytes long), \
                 unable to deserialize this G1 element.",
                bytes.len(),
                48
            )));
        }
        let res = cosmian_bls12_381::G1Affine::from_compressed(&bytes[0..48].try_into()?);
        if res.is_none().into() {
            Err(WfibeErr::Deserialization(
                "Error deserializing G1Affine".to_string(),
            ))
        } else {
            Ok(res.unwrap())
        }
    }

    fn len_bytes(&self) -> usize {
        48
    }
}

impl AsBytes for cosmian_bls12_381::G2Affine {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        Ok(self.to_compressed().to_vec())
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        if bytes.len() < 96 {
            return Err(WfibeErr::InvalidSize(format!(
                "Invalid G2 element (size {}, compressed expected size at least: {} bytes long), \
                 unable to deserialize this G2 element.",
                bytes.len(),
                96
            )));
        }
        let res = cosmian_bls12_381::G2Affine::from_compressed(&bytes[0..96].try_into()?);
        if res.is_none().into() {
            Err(WfibeErr::Deserialization(
                "Error deserializing G2Affine".to_string(),
            ))
        } else {
            Ok(res.unwrap())
        }
    }

    fn len_bytes(&self) -> usize {
        96
    }
}

impl AsBytes for cosmian_bls12_381::Gt {
    // Gt-serialization comes from the `Implemented serialization of Fp2, Fp6,
    // Fp12 and Gt` addition to the BLS12-381 library; deserialization
    // includes the subgroup membership verifications.
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        Ok(self.to_compressed().to_vec())
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        if bytes.len() < 288 {
            return Err(WfibeErr::InvalidSize(format!(
                "Invalid Gt element (size {}, compressed expected size at least: {} bytes long), \
                 unable to deserialize this Gt element.",
                bytes.len(),
                288
            )));
        }
        let res = cosmian_bls12_381::Gt::from_compressed(&bytes[0..288].try_into()?);
        if res.is_none().into() {
            Err(WfibeErr::Deserialization(
                "Error deserializing Gt".to_string(),
            ))
        } else {
            Ok(res.unwrap())
        }
    }

    fn len_bytes(&self) -> usize {
        // A serialized element on Gt is 576 bytes long (because p has 381 bits, so an
        // element in Fp12 has 381*12 bits). The same compressed element is 288 bytes
        // long (288 = 381*12/8/2).
        288
    }
}

// bilinear map: G1 x G2 -> Gt
// The public basis images and ciphertext header live in G1 (48-byte
// compressed encodings keep the constant-size header small), the secret
// keys in G2, the derived payload-key material in Gt.
impl BilinearMap for Bls12_381 {
    type G1 = G1Affine;
    type G2 = G2Affine;
    type Gt = Gt;
    type Scalar = Scalar;

    const ONE: Scalar = Scalar(cosmian_bls12_381::Scalar::one());
    const ZERO: Scalar = Scalar(cosmian_bls12_381::Scalar::zero());

    fn description() -> String {
        "BLS12-381".to_string()
    }

    fn gen_rand_scalar_inner<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<Scalar, WfibeErr> {
        Ok(Scalar(<cosmian_bls12_381::Scalar as Field>::random(rng)))
    }

    fn gen_rand_g1_inner<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<G1Affine, WfibeErr> {
        Ok(G1Affine::from(<G1Projective as Group>::random(rng)))
    }

    fn gen_rand_g2_inner<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<G2Affine, WfibeErr> {
        Ok(G2Affine::from(<G2Projective as Group>::random(rng)))
    }

    fn g1_one(&self) -> G1Affine {
        G1Affine::identity()
    }

    // compute a^x where a \in G1
    fn g1_exp(&self, a: &G1Affine, x: &Scalar) -> G1Affine {
        G1Affine::from(a * x.0)
    }

    // compute a x b where a and b \in G1
    fn g1_mul(&self, a: &G1Affine, b: &G1Affine) -> G1Affine {
        G1Affine::from(G1Projective::from(a) + b)
    }

    // compute a^x where a \in G2
    fn g2_exp(&self, a: &G2Affine, x: &Scalar) -> G2Affine {
        G2Affine::from(a * x.0)
    }

    fn pair(&self, a: &G1Affine, b: &G2Affine) -> Gt {
        pairing(a, b)
    }

    // compute a^x where a \in Gt
    fn gt_exp(&self, a: &Gt, x: &Scalar) -> Gt {
        a * x.0
    }
}
