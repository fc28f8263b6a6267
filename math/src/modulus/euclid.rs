use crate::{Error, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Bézout data: gcd == s * a + t * b.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EuclidData {
    pub gcd: BigInt,
    pub s: BigInt,
    pub t: BigInt,
}

/// Iterative extended Euclidean algorithm on non-negative inputs.
pub fn euclid_gcd(a: &BigInt, b: &BigInt) -> EuclidData {
    let (mut a, mut b): (BigInt, BigInt) = (a.clone(), b.clone());
    let (mut prev_s, mut s): (BigInt, BigInt) = (BigInt::one(), BigInt::zero());
    let (mut prev_t, mut t): (BigInt, BigInt) = (BigInt::zero(), BigInt::one());

    while b.is_positive() {
        let (q, r): (BigInt, BigInt) = a.div_rem(&b);
        a = std::mem::replace(&mut b, r);

        let next_s: BigInt = &prev_s - &q * &s;
        prev_s = std::mem::replace(&mut s, next_s);

        let next_t: BigInt = &prev_t - &q * &t;
        prev_t = std::mem::replace(&mut t, next_t);
    }

    EuclidData {
        gcd: a,
        s: prev_s,
        t: prev_t,
    }
}

/// Returns x^-1 mod modulus.
pub fn inverse(x: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    let x: BigInt = BigInt::from(x.clone());
    let modulus: BigInt = BigInt::from(modulus.clone());
    let data: EuclidData = euclid_gcd(&x, &modulus);
    if !data.gcd.is_one() {
        return Err(Error::NotInvertible { x, modulus });
    }
    data.s
        .mod_floor(&modulus)
        .to_biguint()
        .ok_or_else(|| Error::Inconsistent("negative residue after mod_floor".into()))
}
