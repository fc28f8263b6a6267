use num_bigint::{BigInt, BigUint};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("there are no primes with bit length at most {0}")]
    NoPrimeFound(usize),

    #[error("could not find a generator for the units modulo {0}")]
    NoGeneratorFound(BigUint),

    #[error("{x} has no inverse modulo {modulus}")]
    NotInvertible { x: BigInt, modulus: BigInt },

    /// A derived quantity broke an invariant that the previous stage guarantees.
    #[error("internal consistency check failed: {0}")]
    Inconsistent(String),

    #[error("a {prime_bits}-bit prime leaves no room for a radix")]
    PrimeTooNarrow { prime_bits: usize },

    #[error("radix width {radix_bit} is invalid for {digit_bit}-bit digits over a {prime_bits}-bit prime")]
    RadixTooWide {
        radix_bit: usize,
        digit_bit: usize,
        prime_bits: usize,
    },
}
