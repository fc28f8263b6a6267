use crate::modulus::WordOps;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::One;

/// Sub-digit split used by the butterflies: a digit holds
/// 2^expansion_exp radices of radix_bit bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadixConfig {
    pub radix_bit: usize,
    pub expansion_exp: usize,
    /// Advisory upper bound on the Fibonacci index the kernel handles.
    pub soft_max_fib_index: BigUint,
}

impl RadixConfig {
    /// Largest power-of-two radix leaving four bits of headroom below the
    /// prime's top bit for two radix products.
    pub fn default_radix_bit(q: &BigUint) -> Result<usize> {
        let improper_max: usize = q.bit_len().saturating_sub(1);
        let max_radix_bit: usize = improper_max.saturating_sub(4) / 2;
        if max_radix_bit == 0 {
            return Err(Error::PrimeTooNarrow {
                prime_bits: q.bit_len(),
            });
        }
        Ok(1 << max_radix_bit.log2_floor())
    }

    pub fn new(q: &BigUint, digit_bit: usize) -> Result<Self> {
        Self::with_radix_bit(q, digit_bit, Self::default_radix_bit(q)?)
    }

    pub fn with_radix_bit(q: &BigUint, digit_bit: usize, radix_bit: usize) -> Result<Self> {
        let improper_max: usize = q.bit_len().saturating_sub(1);
        let too_wide = || Error::RadixTooWide {
            radix_bit,
            digit_bit,
            prime_bits: q.bit_len(),
        };

        if radix_bit == 0 || radix_bit > digit_bit {
            return Err(too_wide());
        }

        let expansion_exp: usize = (digit_bit / radix_bit).log2_ceil();

        let soft_max_fib_size: usize = improper_max
            .checked_sub(3 + 2 * radix_bit)
            .ok_or_else(too_wide)?;
        let soft_max_fib_index: BigUint =
            ((BigUint::one() << soft_max_fib_size) * radix_bit + 1u32) * 4u32 / 3u32;

        Ok(Self {
            radix_bit,
            expansion_exp,
            soft_max_fib_index,
        })
    }
}
