use crate::{core::bilinear_map::BilinearMap, error::WfibeErr};

// dot product over the scalar field
pub(crate) fn dot<G: BilinearMap>(u: &[G::Scalar], v: &[G::Scalar]) -> G::Scalar {
    u.iter()
        .zip(v.iter())
        .fold(G::ZERO, |acc, (a, b)| acc + &(a.clone() * b))
}

/// Generate one side's secret dual basis: two rows of `cols` uniform
/// scalars whose dot product is 0 mod the group order.
///
/// Gram-Schmidt restricted to Zp: the second row is de-projected against
/// the first using the modular inverse of the first row's self dot-product
/// and left un-normalized (Zp has no square roots to normalize with).
/// A row whose self dot-product is 0 mod p cannot be used as a divisor and
/// is resampled; a second row that de-projects to the zero vector (it was a
/// multiple of the first) is resampled as well.
pub(crate) fn orthogonal_pair<G: BilinearMap>(
    group: &G,
    cols: usize,
) -> Result<(Vec<G::Scalar>, Vec<G::Scalar>), WfibeErr> {
    let (row1, norm) = loop {
        let candidate = group.gen_random_scalar_vector(cols)?;
        let norm = dot::<G>(&candidate, &candidate);
        if norm != G::ZERO {
            break (candidate, norm);
        }
    };

    let row2 = loop {
        let candidate = group.gen_random_scalar_vector(cols)?;
        let factor = dot::<G>(&candidate, &row1) / &norm;
        let reduced = candidate
            .iter()
            .zip(row1.iter())
            .map(|(c, b)| c.clone() - &(factor.clone() * b))
            .collect::<Vec<_>>();
        if reduced.iter().any(|s| *s != G::ZERO) {
            break reduced;
        }
    };

    Ok((row1, row2))
}
