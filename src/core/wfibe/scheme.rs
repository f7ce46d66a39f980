use std::{
    fmt::Display,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use tracing::debug;

use crate::{
    core::{
        bilinear_map::BilinearMap,
        wfibe::{basis, symmetric, AsBytes},
    },
    error::WfibeErr,
};

// One side's secret dual basis: two rows of scalars with dot product 0 mod
// the group order.
#[derive(Debug, PartialEq, Clone)]
pub struct DualBasis<G: BilinearMap> {
    pub(crate) row1: Vec<G::Scalar>,
    pub(crate) row2: Vec<G::Scalar>,
}

// Public image of a secret basis: g1^{B[i][j]} component-wise.
#[derive(Debug, PartialEq, Clone)]
pub struct BasisImage<G: BilinearMap> {
    pub(crate) row1: Vec<G::G1>,
    pub(crate) row2: Vec<G::G1>,
}

// Master secret: the two secret dual bases. Kept by the key-issuing
// authority, read-only once generated; the public images published at setup
// stay consistent with these rows for the lifetime of the system.
#[derive(Debug, PartialEq)]
pub struct MasterSecret<G: BilinearMap> {
    pub(crate) b1: DualBasis<G>,
    pub(crate) b2: DualBasis<G>,
}

// Public Parameters
#[derive(Debug, PartialEq, Clone)]
pub struct PublicParameters<G: BilinearMap> {
    pub(crate) n: usize,
    pub(crate) m: usize,
    pub(crate) g1: G::G1,
    pub(crate) g2: G::G2,
    pub(crate) z: G::Scalar,
    pub(crate) mpk1: BasisImage<G>,
    pub(crate) mpk2: BasisImage<G>,
    pub(crate) descriptor: String,
}

impl<G: BilinearMap> PublicParameters<G> {
    pub fn vector_dim_n(&self) -> usize {
        self.n
    }

    pub fn vector_dim_m(&self) -> usize {
        self.m
    }

    pub fn g2(&self) -> &G::G2 {
        &self.g2
    }

    pub fn z(&self) -> &G::Scalar {
        &self.z
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

// Secret Key: exactly 4 group elements, independent of the identity's
// attribute and policy cardinality.
#[derive(Debug, PartialEq, Clone)]
pub struct SecretKey<G: BilinearMap> {
    pub(crate) sk_pa_1: G::G2,
    pub(crate) sk_pa_2: G::G2,
    pub(crate) sk_sb_1: G::G2,
    pub(crate) sk_sb_2: G::G2,
}

// Cipher text: 4-element constant-size header plus the sealed payload and
// advisory metadata.
#[derive(Debug, PartialEq, Clone)]
pub struct Ciphertext<G: BilinearMap> {
    pub(crate) c1_1: G::G1,
    pub(crate) c1_2: G::G1,
    pub(crate) c2_1: G::G1,
    pub(crate) c2_2: G::G1,
    pub(crate) payload: Vec<u8>,
    pub(crate) timestamp: u64,
    pub(crate) attribute_count: u32,
    pub(crate) threshold: u32,
}

impl<G: BilinearMap> Ciphertext<G> {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn attribute_count(&self) -> u32 {
        self.attribute_count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Serialized size of the 4-element header, whatever the attribute
    /// cardinality or payload length.
    pub fn header_len_bytes(&self) -> usize {
        self.c1_1.len_bytes()
            + self.c1_2.len_bytes()
            + self.c2_1.len_bytes()
            + self.c2_2.len_bytes()
    }
}

impl<G: BilinearMap> Display for SecretKey<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Ok(bytes) = self.try_into_bytes() {
            write!(f, "{}", hex::encode(bytes))
        } else {
            write!(f, "Invalid input")
        }
    }
}

impl<G: BilinearMap> Display for Ciphertext<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Ok(bytes) = self.try_into_bytes() {
            write!(f, "{}", hex::encode(bytes))
        } else {
            write!(f, "Invalid input")
        }
    }
}

impl<G: BilinearMap> AsBytes for SecretKey<G> {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        let mut res = self.sk_pa_1.try_into_bytes()?;
        res.append(&mut self.sk_pa_2.try_into_bytes()?);
        res.append(&mut self.sk_sb_1.try_into_bytes()?);
        res.append(&mut self.sk_sb_2.try_into_bytes()?);
        Ok(res)
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        let sk_pa_1 = G::G2::try_from_bytes(bytes)?;
        let mut offset = sk_pa_1.len_bytes();
        let sk_pa_2 = G::G2::try_from_bytes(&bytes[offset..])?;
        offset += sk_pa_2.len_bytes();
        let sk_sb_1 = G::G2::try_from_bytes(&bytes[offset..])?;
        offset += sk_sb_1.len_bytes();
        let sk_sb_2 = G::G2::try_from_bytes(&bytes[offset..])?;

        Ok(Self {
            sk_pa_1,
            sk_pa_2,
            sk_sb_1,
            sk_sb_2,
        })
    }

    fn len_bytes(&self) -> usize {
        self.sk_pa_1.len_bytes()
            + self.sk_pa_2.len_bytes()
            + self.sk_sb_1.len_bytes()
            + self.sk_sb_2.len_bytes()
    }
}

impl<G: BilinearMap> AsBytes for Ciphertext<G> {
    fn try_into_bytes(&self) -> Result<Vec<u8>, WfibeErr> {
        let mut res = self.c1_1.try_into_bytes()?;
        res.append(&mut self.c1_2.try_into_bytes()?);
        res.append(&mut self.c2_1.try_into_bytes()?);
        res.append(&mut self.c2_2.try_into_bytes()?);
        res.append(&mut self.payload.try_into_bytes()?);
        res.append(&mut self.timestamp.try_into_bytes()?);
        res.append(&mut self.attribute_count.try_into_bytes()?);
        res.append(&mut self.threshold.try_into_bytes()?);
        Ok(res)
    }

    fn try_from_bytes(bytes: &[u8]) -> Result<Self, WfibeErr> {
        let c1_1 = G::G1::try_from_bytes(bytes)?;
        let mut offset = c1_1.len_bytes();
        let c1_2 = G::G1::try_from_bytes(&bytes[offset..])?;
        offset += c1_2.len_bytes();
        let c2_1 = G::G1::try_from_bytes(&bytes[offset..])?;
        offset += c2_1.len_bytes();
        let c2_2 = G::G1::try_from_bytes(&bytes[offset..])?;
        offset += c2_2.len_bytes();
        let payload = Vec::<u8>::try_from_bytes(&bytes[offset..])?;
        offset += payload.len_bytes();
        let timestamp = u64::try_from_bytes(&bytes[offset..])?;
        offset += timestamp.len_bytes();
        let attribute_count = u32::try_from_bytes(&bytes[offset..])?;
        offset += attribute_count.len_bytes();
        let threshold = u32::try_from_bytes(&bytes[offset..])?;

        Ok(Self {
            c1_1,
            c1_2,
            c2_1,
            c2_2,
            payload,
            timestamp,
            attribute_count,
            threshold,
        })
    }

    fn len_bytes(&self) -> usize {
        self.header_len_bytes()
            + self.payload.len_bytes()
            + self.timestamp.len_bytes()
            + self.attribute_count.len_bytes()
            + self.threshold.len_bytes()
    }
}

pub(crate) fn unix_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Wfibe<G: BilinearMap> {
    pub(crate) group: G,
}

impl<G: BilinearMap> Wfibe<G> {
    pub fn description() -> String {
        format!("WFIBE with {}", G::description())
    }

    /// One-time system setup: sample the generators and the public
    /// threshold constant, generate both secret dual bases and publish
    /// their images.
    pub fn setup(
        &self,
        n: usize,
        m: usize,
    ) -> Result<(MasterSecret<G>, PublicParameters<G>), WfibeErr> {
        if n == 0 || m == 0 {
            return Err(WfibeErr::InvalidDimension(format!(
                "vector dimensions must be positive (n: {}, m: {})",
                n, m
            )));
        }

        let g1 = self.group.gen_random_g1()?;
        let g2 = self.group.gen_random_g2()?;
        let z = self.group.gen_random_scalar()?;

        // dominates setup latency: O((n+m)) field multiplications plus the
        // 2(n+m+2) exponentiations for the public images
        let start = Instant::now();
        let (b1_row1, b1_row2) = basis::orthogonal_pair(&self.group, n + 1)?;
        let (b2_row1, b2_row2) = basis::orthogonal_pair(&self.group, m + 1)?;
        debug!(
            "dual basis generation: {} ms (n: {}, m: {})",
            start.elapsed().as_millis(),
            n,
            m
        );

        let mpk1 = BasisImage {
            row1: self.group.g1_exp_vector(&g1, &b1_row1),
            row2: self.group.g1_exp_vector(&g1, &b1_row2),
        };
        let mpk2 = BasisImage {
            row1: self.group.g1_exp_vector(&g1, &b2_row1),
            row2: self.group.g1_exp_vector(&g1, &b2_row2),
        };

        let msk = MasterSecret {
            b1: DualBasis {
                row1: b1_row1,
                row2: b1_row2,
            },
            b2: DualBasis {
                row1: b2_row1,
                row2: b2_row2,
            },
        };
        let params = PublicParameters {
            n,
            m,
            g1,
            g2,
            z,
            mpk1,
            mpk2,
            descriptor: G::description(),
        };
        Ok((msk, params))
    }

    /// Derive a user secret key by projecting the identity's vectors
    /// through the secret bases: the policy vector (length n) against b1,
    /// the attribute vector (length m) against b2. All-or-nothing: no
    /// partially populated key is ever returned.
    pub fn key_generation(
        &self,
        msk: &MasterSecret<G>,
        params: &PublicParameters<G>,
        policy_vector: &[i32],
        attribute_vector: &[i32],
    ) -> Result<SecretKey<G>, WfibeErr> {
        if policy_vector.len() != params.n || attribute_vector.len() != params.m {
            return Err(WfibeErr::KeyGeneration(format!(
                "failed: vector length mismatch (policy: {}, expected: {}; attribute: {}, \
                 expected: {})",
                policy_vector.len(),
                params.n,
                attribute_vector.len(),
                params.m
            )));
        }

        let y_pa = Self::with_unit_tail(policy_vector);
        let k1_pa = basis::dot::<G>(&msk.b1.row1, &y_pa);
        let k2_pa = basis::dot::<G>(&msk.b1.row2, &y_pa);

        let y_sb = Self::with_unit_tail(attribute_vector);
        let k1_sb = basis::dot::<G>(&msk.b2.row1, &y_sb);
        let k2_sb = basis::dot::<G>(&msk.b2.row2, &y_sb);

        Ok(SecretKey {
            sk_pa_1: self.group.g2_exp(&params.g2, &k1_pa),
            sk_pa_2: self.group.g2_exp(&params.g2, &k2_pa),
            sk_sb_1: self.group.g2_exp(&params.g2, &k1_sb),
            sk_sb_2: self.group.g2_exp(&params.g2, &k2_sb),
        })
    }

    /// Encrypt a payload against pre-encoded attribute (length n) and
    /// policy (length m) vectors. The threshold is bound into the final
    /// coordinate of both encryption vectors as z - d, so a receiver's
    /// inner product cancels the exponent only when its weighted match
    /// reaches the sender's threshold.
    pub fn encrypt_with_vectors(
        &self,
        params: &PublicParameters<G>,
        message: &[u8],
        attribute_vector: &[i32],
        policy_vector: &[i32],
        attribute_count: u32,
        threshold: u32,
    ) -> Result<Ciphertext<G>, WfibeErr> {
        if attribute_vector.len() != params.n || policy_vector.len() != params.m {
            return Err(WfibeErr::Encryption(format!(
                "failed: vector length mismatch (attribute: {}, expected: {}; policy: {}, \
                 expected: {})",
                attribute_vector.len(),
                params.n,
                policy_vector.len(),
                params.m
            )));
        }

        let d = G::Scalar::from(i64::from(threshold));
        let x_sa = Self::with_threshold_tail(attribute_vector, &params.z, &d);
        let x_pb = Self::with_threshold_tail(policy_vector, &params.z, &d);

        // fresh randomness per message; reuse across messages breaks the
        // scheme
        let r1 = self.group.gen_random_scalar()?;
        let r2 = self.group.gen_random_scalar()?;

        let (c1_1, c1_2) = self.header_side(&params.mpk1, &x_sa, &r1);
        let (c2_1, c2_2) = self.header_side(&params.mpk2, &x_pb, &r2);

        let base = self.group.pair(&params.g1, &params.g2);
        let k1 = self.group.gt_exp(&base, &(r1.clone() * &params.z));
        let k2 = self.group.gt_exp(&base, &(r2.clone() * &params.z));
        let key = symmetric::derive_key(&k1.try_into_bytes()?, &k2.try_into_bytes()?);
        let payload = symmetric::seal(&key, message)?;

        Ok(Ciphertext {
            c1_1,
            c1_2,
            c2_1,
            c2_2,
            payload,
            timestamp: unix_timestamp_millis(),
            attribute_count,
            threshold,
        })
    }

    // c_i = Π_j mpk[i][j]^{r·x[j]} over one basis image
    fn header_side(
        &self,
        image: &BasisImage<G>,
        x: &[G::Scalar],
        r: &G::Scalar,
    ) -> (G::G1, G::G1) {
        let mut c1 = self.group.g1_one();
        let mut c2 = self.group.g1_one();
        for (j, xj) in x.iter().enumerate() {
            let exp = r.clone() * xj;
            c1 = self.group.g1_mul(&c1, &self.group.g1_exp(&image.row1[j], &exp));
            c2 = self.group.g1_mul(&c2, &self.group.g1_exp(&image.row2[j], &exp));
        }
        (c1, c2)
    }

    // the fixed final 1 pins the encoding's remaining degree of freedom
    fn with_unit_tail(vector: &[i32]) -> Vec<G::Scalar> {
        let mut out = vector
            .iter()
            .map(|v| G::Scalar::from(i64::from(*v)))
            .collect::<Vec<_>>();
        out.push(G::ONE);
        out
    }

    fn with_threshold_tail(vector: &[i32], z: &G::Scalar, d: &G::Scalar) -> Vec<G::Scalar> {
        let mut out = vector
            .iter()
            .map(|v| G::Scalar::from(i64::from(*v)))
            .collect::<Vec<_>>();
        out.push(z.clone() - d);
        out
    }
}
