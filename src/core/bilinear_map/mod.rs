use core::ops::{Add, Div, Mul, Neg, Sub};

use rand::{CryptoRng, RngCore, SeedableRng};

use crate::{core::wfibe::AsBytes, error::WfibeErr};

pub mod bls12_381;

// bilinear map: G1 x G2 -> Gt
// G1, G2 and Gt are used with multiplicative notation
// G1 carries the public basis images and the ciphertext header
// G2 carries the generator the secret keys are derived from
// Gt carries the pairing values the payload key is derived from
pub trait BilinearMap: Default {
    // underlying prime field element
    type Scalar: From<i64>
        + for<'a> Add<&'a Self::Scalar, Output = Self::Scalar>
        + for<'a> Sub<&'a Self::Scalar, Output = Self::Scalar>
        + Neg<Output = Self::Scalar>
        + for<'a> Mul<&'a Self::Scalar, Output = Self::Scalar>
        + for<'a> Div<&'a Self::Scalar, Output = Self::Scalar>
        + Clone
        + PartialEq
        + std::fmt::Debug
        + AsBytes;

    // element of the group G1
    type G1: AsBytes + PartialEq + Clone + std::fmt::Debug;

    // element of the group G2
    type G2: AsBytes + PartialEq + Clone + std::fmt::Debug;

    // element of the group Gt
    type Gt: AsBytes + PartialEq + Clone + std::fmt::Debug;

    const ZERO: Self::Scalar;
    const ONE: Self::Scalar;

    fn description() -> String;

    //
    // Functions that must be implemented
    //
    // generate a random scalar on the primary field
    fn gen_rand_scalar_inner<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<Self::Scalar, WfibeErr>;

    fn gen_rand_g1_inner<R: CryptoRng + RngCore>(&self, rng: &mut R)
    -> Result<Self::G1, WfibeErr>;

    fn gen_rand_g2_inner<R: CryptoRng + RngCore>(&self, rng: &mut R)
    -> Result<Self::G2, WfibeErr>;

    // group identity of G1
    fn g1_one(&self) -> Self::G1;

    // compute a^x where a \in G1
    fn g1_exp(&self, a: &Self::G1, x: &Self::Scalar) -> Self::G1;

    // compute a x b where a and b \in G1
    fn g1_mul(&self, a: &Self::G1, b: &Self::G1) -> Self::G1;

    // compute a^x where a \in G2
    fn g2_exp(&self, a: &Self::G2, x: &Self::Scalar) -> Self::G2;

    // pairing evaluation e(a, b) where a \in G1, b \in G2
    fn pair(&self, a: &Self::G1, b: &Self::G2) -> Self::Gt;

    // compute a^x where a \in Gt
    fn gt_exp(&self, a: &Self::Gt, x: &Self::Scalar) -> Self::Gt;

    //
    // Derived functions
    //
    fn gen_random_scalar(&self) -> Result<Self::Scalar, WfibeErr> {
        let mut rng = rand_hc::Hc128Rng::from_entropy();
        self.gen_rand_scalar_inner(&mut rng)
    }

    fn gen_random_scalar_vector(&self, size: usize) -> Result<Vec<Self::Scalar>, WfibeErr> {
        let mut rng = rand_hc::Hc128Rng::from_entropy();
        std::iter::repeat_with(|| self.gen_rand_scalar_inner(&mut rng))
            .take(size)
            .collect()
    }

    fn gen_random_g1(&self) -> Result<Self::G1, WfibeErr> {
        let mut rng = rand_hc::Hc128Rng::from_entropy();
        self.gen_rand_g1_inner(&mut rng)
    }

    fn gen_random_g2(&self) -> Result<Self::G2, WfibeErr> {
        let mut rng = rand_hc::Hc128Rng::from_entropy();
        self.gen_rand_g2_inner(&mut rng)
    }

    // compute a^x_j component-wise for a fixed base a \in G1
    fn g1_exp_vector(&self, a: &Self::G1, vec_x: &[Self::Scalar]) -> Vec<Self::G1> {
        vec_x.iter().map(|x| self.g1_exp(a, x)).collect()
    }
}
