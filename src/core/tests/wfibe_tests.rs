use crate::{
    core::{
        bilinear_map::{bls12_381::Bls12_381, BilinearMap},
        wfibe::{
            basis, AsBytes, Ciphertext, ParameterBundle, PublicParameters, SecretKey, Wfibe,
        },
    },
    error::WfibeErr,
};

const G1_LEN: usize = 48;
const G2_LEN: usize = 96;

#[test]
fn setup_rejects_zero_dimensions() {
    let scheme = Wfibe::<Bls12_381>::default();
    assert!(matches!(
        scheme.setup(0, 16),
        Err(WfibeErr::InvalidDimension(_))
    ));
    assert!(matches!(
        scheme.setup(16, 0),
        Err(WfibeErr::InvalidDimension(_))
    ));
    assert!(matches!(
        scheme.setup(0, 0),
        Err(WfibeErr::InvalidDimension(_))
    ));
}

#[test]
fn bases_are_orthogonal_and_images_consistent() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let grp = Bls12_381::default();
    let (msk, params) = scheme.setup(8, 5)?;

    assert_eq!(
        basis::dot::<Bls12_381>(&msk.b1.row1, &msk.b1.row2),
        Bls12_381::ZERO
    );
    assert_eq!(
        basis::dot::<Bls12_381>(&msk.b2.row1, &msk.b2.row2),
        Bls12_381::ZERO
    );

    assert_eq!(msk.b1.row1.len(), 9);
    assert_eq!(msk.b2.row1.len(), 6);

    // mpk[i][j] = g1^{B[i][j]} for every i, j
    for (image, secret) in &[(&params.mpk1, &msk.b1), (&params.mpk2, &msk.b2)] {
        for (h, b) in image.row1.iter().zip(secret.row1.iter()) {
            assert_eq!(*h, grp.g1_exp(&params.g1, b));
        }
        for (h, b) in image.row2.iter().zip(secret.row2.iter()) {
            assert_eq!(*h, grp.g1_exp(&params.g1, b));
        }
    }
    Ok(())
}

#[test]
fn secret_key_is_constant_size() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (msk, params) = scheme.setup(32, 32)?;

    let mut sparse_policy = vec![0_i32; 32];
    sparse_policy[3] = 40;
    let mut sparse_attrs = vec![0_i32; 32];
    sparse_attrs[7] = 1;
    let sparse = scheme.key_generation(&msk, &params, &sparse_policy, &sparse_attrs)?;

    let dense_policy = (0..32).map(|i| i * 3 + 1).collect::<Vec<_>>();
    let dense_attrs = vec![1_i32; 32];
    let dense = scheme.key_generation(&msk, &params, &dense_policy, &dense_attrs)?;

    let sparse_bytes = sparse.try_into_bytes()?;
    let dense_bytes = dense.try_into_bytes()?;
    assert_eq!(sparse_bytes.len(), 4 * G2_LEN);
    assert_eq!(dense_bytes.len(), sparse_bytes.len());
    Ok(())
}

#[test]
fn key_generation_rejects_mismatched_vectors() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (msk, params) = scheme.setup(8, 8)?;
    let short = vec![1_i32; 4];
    let full = vec![1_i32; 8];
    assert!(matches!(
        scheme.key_generation(&msk, &params, &short, &full),
        Err(WfibeErr::KeyGeneration(_))
    ));
    assert!(matches!(
        scheme.key_generation(&msk, &params, &full, &short),
        Err(WfibeErr::KeyGeneration(_))
    ));
    Ok(())
}

#[test]
fn ciphertext_header_is_constant_size() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (_msk, params) = scheme.setup(32, 32)?;

    let mut few = vec![0_i32; 32];
    few[0] = 1;
    let mut light = vec![0_i32; 32];
    light[1] = 5;
    let small = scheme.encrypt_with_vectors(&params, b"tiny", &few, &light, 1, 5)?;

    let many = vec![1_i32; 32];
    let heavy = (0..32).map(|i| i + 1).collect::<Vec<_>>();
    let big_message = vec![0xAB_u8; 5000];
    let big = scheme.encrypt_with_vectors(&params, &big_message, &many, &heavy, 32, 500)?;

    assert_eq!(small.header_len_bytes(), 4 * G1_LEN);
    assert_eq!(big.header_len_bytes(), 4 * G1_LEN);

    // total = header + (nonce + message + tag) + metadata; only the payload
    // scales with the message
    assert_eq!(small.payload().len(), 12 + 4 + 16);
    assert_eq!(big.payload().len(), 12 + 5000 + 16);
    Ok(())
}

#[test]
fn encryption_randomness_is_fresh_per_call() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (_msk, params) = scheme.setup(16, 16)?;

    let mut attrs = vec![0_i32; 16];
    attrs[2] = 1;
    let mut policy = vec![0_i32; 16];
    policy[5] = 9;

    let one = scheme.encrypt_with_vectors(&params, b"same message", &attrs, &policy, 1, 9)?;
    let two = scheme.encrypt_with_vectors(&params, b"same message", &attrs, &policy, 1, 9)?;

    assert_ne!(one.c1_1, two.c1_1);
    assert_ne!(one.c2_1, two.c2_1);
    assert_ne!(one.payload(), two.payload());
    Ok(())
}

#[test]
fn secret_key_as_bytes() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (msk, params) = scheme.setup(8, 8)?;
    let policy = vec![7_i32; 8];
    let attrs = vec![1_i32; 8];
    let sk = scheme.key_generation(&msk, &params, &policy, &attrs)?;
    let sk_2 = SecretKey::<Bls12_381>::try_from_bytes(&sk.try_into_bytes()?)?;
    assert_eq!(sk, sk_2);
    Ok(())
}

#[test]
fn ciphertext_as_bytes() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (_msk, params) = scheme.setup(8, 8)?;
    let attrs = vec![1_i32; 8];
    let policy = vec![3_i32; 8];
    let enc = scheme.encrypt_with_vectors(&params, b"test", &attrs, &policy, 8, 24)?;
    let enc_2 = Ciphertext::<Bls12_381>::try_from_bytes(&enc.try_into_bytes()?)?;

    assert_eq!(enc.c1_1, enc_2.c1_1);
    assert_eq!(enc.c1_2, enc_2.c1_2);
    assert_eq!(enc.c2_1, enc_2.c2_1);
    assert_eq!(enc.c2_2, enc_2.c2_2);
    assert_eq!(enc.payload(), enc_2.payload());
    assert_eq!(enc.timestamp(), enc_2.timestamp());
    assert_eq!(enc.attribute_count(), enc_2.attribute_count());
    assert_eq!(enc.threshold(), enc_2.threshold());
    Ok(())
}

#[test]
fn parameter_bundle_round_trips_byte_identical() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (_msk, params) = scheme.setup(8, 5)?;

    let bundle = params.export()?;
    let bytes = bundle.try_into_bytes()?;
    let bundle_2 = ParameterBundle::try_from_bytes(&bytes)?;
    assert_eq!(bundle, bundle_2);
    assert_eq!(bytes, bundle_2.try_into_bytes()?);

    let params_2 = PublicParameters::<Bls12_381>::import(&bundle_2)?;
    assert_eq!(params, params_2);
    Ok(())
}

#[test]
fn import_rejects_foreign_descriptor() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (_msk, params) = scheme.setup(4, 4)?;
    let mut bundle = params.export()?;
    bundle.descriptor = "type a 160".to_string();
    assert!(matches!(
        PublicParameters::<Bls12_381>::import(&bundle),
        Err(WfibeErr::PairingMismatch { .. })
    ));
    Ok(())
}

#[test]
fn import_rejects_zero_dimensions() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (_msk, params) = scheme.setup(4, 4)?;
    let mut bundle = params.export()?;
    bundle.n = 0;
    assert!(matches!(
        PublicParameters::<Bls12_381>::import(&bundle),
        Err(WfibeErr::InvalidDimension(_))
    ));
    Ok(())
}

#[test]
fn truncated_ciphertext_bytes_rejected() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (_msk, params) = scheme.setup(8, 8)?;
    let attrs = vec![1_i32; 8];
    let policy = vec![3_i32; 8];
    let enc = scheme.encrypt_with_vectors(&params, b"test", &attrs, &policy, 8, 24)?;
    let bytes = enc.try_into_bytes()?;

    // cut inside the sealed payload: the trailing metadata can no longer
    // be decoded
    assert!(Ciphertext::<Bls12_381>::try_from_bytes(&bytes[..bytes.len() - 10]).is_err());
    // cut inside the header
    assert!(Ciphertext::<Bls12_381>::try_from_bytes(&bytes[..100]).is_err());
    Ok(())
}

#[test]
fn import_rejects_truncated_basis_image() -> Result<(), WfibeErr> {
    let scheme = Wfibe::<Bls12_381>::default();
    let (_msk, params) = scheme.setup(4, 4)?;
    let mut bundle = params.export()?;
    bundle.mpk1_row1.pop();
    assert!(matches!(
        PublicParameters::<Bls12_381>::import(&bundle),
        Err(WfibeErr::Deserialization(_))
    ));
    Ok(())
}
