mod common;
use common::Polynomial;
use num_bigint::BigInt;
use rand::seq::SliceRandom;
use shamir_reconstruction::reconstruction::{
    ReconstructionError, Share, lagrange::interpolate_at_zero, radix, reconstruct,
    reconstruct_verified,
};

#[test]
fn test_recovers_constant_term_of_random_polynomials() {
    for threshold in 1..=12 {
        let secret = BigInt::from(rand::random::<u128>()) * BigInt::from(rand::random::<u64>());
        let polynomial = Polynomial::random(secret.clone(), threshold - 1);
        let xs = (1..=threshold as i64 + 3).collect::<Vec<i64>>();
        let shares = polynomial.shares(&xs);

        assert_eq!(reconstruct(&shares, threshold).unwrap(), secret);
    }
}

#[test]
fn test_recovers_negative_secret_from_scattered_coordinates() {
    let secret = BigInt::from(-987_654_321_i64);
    let polynomial = Polynomial::random(secret.clone(), 4);
    let shares = polynomial.shares(&[-40, 3, 17, 1_000_003, 99]);

    assert_eq!(interpolate_at_zero(&shares).unwrap(), secret);
}

#[test]
fn test_interpolation_is_order_independent() {
    let polynomial = Polynomial::random(BigInt::from(424242), 6);
    let mut shares = polynomial.shares(&[1, 2, 3, 4, 5, 6, 7]);
    let expected = interpolate_at_zero(&shares).unwrap();

    let mut rng = rand::rng();
    for _ in 0..10 {
        shares.shuffle(&mut rng);
        assert_eq!(interpolate_at_zero(&shares).unwrap(), expected);
    }
    assert_eq!(&expected, polynomial.secret());
}

#[test]
fn test_single_share_threshold() {
    let shares = vec![Share::new(BigInt::from(5), BigInt::from(31337))];
    assert_eq!(reconstruct(&shares, 1).unwrap(), BigInt::from(31337));
}

#[test]
fn test_shares_decoded_from_mixed_bases() {
    // 3 + x^2
    let shares = vec![
        Share::decode(BigInt::from(1), 10, "4").unwrap(),
        Share::decode(BigInt::from(2), 2, "111").unwrap(),
        Share::decode(BigInt::from(3), 10, "12").unwrap(),
        Share::decode(BigInt::from(6), 4, "213").unwrap(),
    ];
    assert_eq!(reconstruct(&shares, 3).unwrap(), BigInt::from(3));
    assert_eq!(reconstruct_verified(&shares, 3).unwrap(), BigInt::from(3));
}

#[test]
fn test_decode_round_trips_through_every_base() {
    let value = BigInt::from(rand::random::<u128>()) << 64u32;
    for base in radix::MIN_RADIX..=radix::MAX_RADIX {
        let upper = value.to_str_radix(base).to_uppercase();
        assert_eq!(radix::decode(&upper, base).unwrap(), value);
        let padded = format!("000{}", value.to_str_radix(base));
        assert_eq!(radix::decode(&padded, base).unwrap(), value);
    }
}

#[test]
fn test_duplicate_coordinates_never_produce_a_value() {
    let polynomial = Polynomial::random(BigInt::from(7), 2);
    let mut shares = polynomial.shares(&[1, 2, 3]);
    shares[2] = shares[0].clone();

    assert!(matches!(
        reconstruct(&shares, 3),
        Err(ReconstructionError::DuplicateXCoordinate { .. })
    ));
}

#[test]
fn test_too_few_shares_are_not_truncated() {
    let polynomial = Polynomial::random(BigInt::from(7), 4);
    let shares = polynomial.shares(&[1, 2, 3, 4]);

    assert!(matches!(
        reconstruct(&shares, 5),
        Err(ReconstructionError::InsufficientShares {
            available: 4,
            required: 5
        })
    ));
}

#[test]
fn test_verified_reconstruction_detects_tampering() {
    let secret = BigInt::from(1_000_000_007);
    let polynomial = Polynomial::random(secret.clone(), 2);
    let mut shares = polynomial.shares(&[1, 2, 3, 4, 5]);
    assert_eq!(reconstruct_verified(&shares, 3).unwrap(), secret);

    // An offset divisible by every basis denominator keeps all subsets integral
    shares[4].y += BigInt::from(720);
    assert_eq!(reconstruct(&shares, 3).unwrap(), secret);
    assert!(matches!(
        reconstruct_verified(&shares, 3),
        Err(ReconstructionError::InconsistentShares { .. })
    ));
}
