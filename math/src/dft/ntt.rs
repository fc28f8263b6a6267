use crate::modulus::euclid::inverse;
use crate::modulus::prime::Prime;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::One;
use tracing::info;

/// Twiddle tables for a radix-2 NTT modulo q = 2^s * d + 1.
///
/// Every table is indexed by k = 0..=s:
/// - `root_of_unity[k]` is a primitive 2^k-th root of unity,
/// - `conj_of_unity[k]` is its inverse,
/// - `powers_of_half[k]` is 2^-k.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub generator: BigUint,
    pub omega: BigUint,
    pub omega_inv: BigUint,
    pub half: BigUint,
    pub root_of_unity: Vec<BigUint>,
    pub conj_of_unity: Vec<BigUint>,
    pub powers_of_half: Vec<BigUint>,
}

impl Table {
    pub fn new(prime: &Prime) -> Result<Table> {
        let generator: BigUint = prime.primitive_root()?;
        Self::with_generator(prime, generator)
    }

    /// Builds the tables from a caller-supplied generator of the units mod q.
    pub fn with_generator(prime: &Prime, generator: BigUint) -> Result<Table> {
        let q: &BigUint = prime.q();
        let log_nth_root: usize = prime.even_exp();

        // omega = g^d has order exactly 2^s.
        let omega: BigUint = prime.pow(&generator, prime.odd_part());
        let root_of_unity: Vec<BigUint> = dyadic_ladder(&omega, q, log_nth_root)?;

        // omega^(2^s - 1) = omega^-1 since omega^(2^s) = 1.
        let exponent: BigUint = (BigUint::one() << log_nth_root) - BigUint::one();
        let omega_inv: BigUint = prime.pow(&omega, &exponent);
        let conj_of_unity: Vec<BigUint> = dyadic_ladder(&omega_inv, q, log_nth_root)?;

        let half: BigUint = inverse(&BigUint::from(2u32), q)?;
        let powers_of_half: Vec<BigUint> = geometric(&half, q)
            .take(log_nth_root + 1)
            .collect();

        info!(generator = %generator, omega = %omega, "derived 2^{log_nth_root}-th root of unity");

        Ok(Self {
            generator,
            omega,
            omega_inv,
            half,
            root_of_unity,
            conj_of_unity,
            powers_of_half,
        })
    }

    /// log2 of the largest supported transform size.
    pub fn log_nth_root(&self) -> usize {
        self.root_of_unity.len() - 1
    }
}

/// Returns [1, x^(2^(k-1)), ..., x^2, x] where x has multiplicative order 2^k:
/// the squaring chain of x stored so that entry i has order 2^i.
///
/// Fails if the chain does not reach 1 after exactly k squarings.
pub fn dyadic_ladder(x: &BigUint, q: &BigUint, k: usize) -> Result<Vec<BigUint>> {
    let mut ladder: Vec<BigUint> = Vec::with_capacity(k + 1);
    let mut power: BigUint = x.clone();
    loop {
        let done: bool = power.is_one();
        ladder.push(power.clone());
        if done {
            break;
        }
        if ladder.len() > k {
            return Err(Error::Inconsistent(format!(
                "{x} has order larger than 2^{k} modulo {q}"
            )));
        }
        power = (&power * &power) % q;
    }

    if ladder.len() != k + 1 {
        return Err(Error::Inconsistent(format!(
            "{x} has order 2^{} instead of 2^{k} modulo {q}",
            ladder.len() - 1
        )));
    }

    ladder.reverse();
    Ok(ladder)
}

/// 1, x, x^2, ... mod q.
pub fn geometric<'a>(x: &'a BigUint, q: &'a BigUint) -> impl Iterator<Item = BigUint> + 'a {
    std::iter::successors(Some(BigUint::one()), move |acc| Some((acc * x) % q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulus::prime_generation::find_candidate;

    fn big(x: u64) -> BigUint {
        BigUint::from(x)
    }

    #[test]
    fn eight_bit_table() {
        let prime: Prime = find_candidate(8).unwrap();
        let table: Table = Table::new(&prime).unwrap();
        assert_eq!(table.generator, big(5));
        assert_eq!(table.omega, big(125));
        assert_eq!(table.half, big(97));
        assert_eq!(table.log_nth_root(), 6);
        assert_eq!(table.root_of_unity.len(), 7);
        assert_eq!(table.root_of_unity[0], big(1));
        assert_eq!(table.root_of_unity[1], big(192));
        assert_eq!(table.root_of_unity[6], big(125));
        assert_eq!(table.powers_of_half[0], big(1));
        assert_eq!(table.powers_of_half[1], big(97));
    }

    #[test]
    fn ladder_rejects_wrong_order() {
        let q: BigUint = big(193);
        // 125 has order 64 = 2^6.
        assert!(dyadic_ladder(&big(125), &q, 6).is_ok());
        assert!(matches!(dyadic_ladder(&big(125), &q, 5), Err(Error::Inconsistent(_))));
        assert!(matches!(dyadic_ladder(&big(125), &q, 7), Err(Error::Inconsistent(_))));
        // 5 generates the whole group of order 192, never a power of two.
        assert!(matches!(dyadic_ladder(&big(5), &q, 6), Err(Error::Inconsistent(_))));
    }

    #[test]
    fn wrong_generator_is_fatal() {
        let prime: Prime = find_candidate(8).unwrap();
        // 4 = 2^2 is a square, so 4^3 has order at most 2^5.
        assert!(Table::with_generator(&prime, big(4)).is_err());
    }
}
