//! Deterministic hash-based placement of named attributes into
//! fixed-dimension coordinate vectors.
//!
//! Two names hashing to the same coordinate overwrite each other
//! (last-write-wins). This is an accepted lossy-encoding trade-off, not an
//! error: callers pick a dimension large enough that the birthday-bound
//! collision rate stays acceptable for their attribute universe.

use std::collections::{HashMap, HashSet};

use sha3::{Digest, Sha3_256};

/// Coordinate index for an attribute name: leading 32 bits of the digest of
/// the lower-cased, trimmed name, reduced modulo the dimension.
pub(crate) fn coordinate(name: &str, dimension: usize) -> usize {
    let digest = Sha3_256::digest(name.trim().to_lowercase().as_bytes());
    let lead = i32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    lead.unsigned_abs() as usize % dimension
}

/// Encode a set of attribute names as a 0/1 presence vector.
pub fn encode_attributes(attributes: &HashSet<String>, dimension: usize) -> Vec<i32> {
    let mut vector = vec![0_i32; dimension];
    for attr in attributes {
        vector[coordinate(attr, dimension)] = 1;
    }
    vector
}

/// Encode a name -> weight policy map as a weight vector.
pub fn encode_policy(policy: &HashMap<String, i32>, dimension: usize) -> Vec<i32> {
    let mut vector = vec![0_i32; dimension];
    for (name, weight) in policy {
        vector[coordinate(name, dimension)] = *weight;
    }
    vector
}

/// Weighted match between an attribute vector and a policy vector.
pub fn weighted_match(attributes: &[i32], policy: &[i32]) -> i64 {
    attributes
        .iter()
        .zip(policy.iter())
        .map(|(a, p)| i64::from(*a) * i64::from(*p))
        .sum()
}
