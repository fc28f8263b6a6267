pub mod barrett;
pub mod euclid;
pub mod factorization;
pub mod prime;
pub mod prime_generation;

use num_bigint::BigUint;
use num_traits::{One, Zero};

pub trait WordOps {
    /// Number of significant bits, 0 for 0.
    fn bit_len(&self) -> usize;
    fn is_pow2(&self) -> bool;

    /// floor(log2(self)). Returns 0 for 0.
    #[inline(always)]
    fn log2_floor(&self) -> usize {
        self.bit_len().saturating_sub(1)
    }

    /// ceil(log2(self)). Returns 0 for 0 and 1.
    #[inline(always)]
    fn log2_ceil(&self) -> usize {
        self.bit_len().saturating_sub(self.is_pow2() as usize)
    }
}

impl WordOps for BigUint {
    #[inline(always)]
    fn bit_len(&self) -> usize {
        self.bits() as usize
    }

    #[inline(always)]
    fn is_pow2(&self) -> bool {
        self.is_zero() || (self & (self - BigUint::one())).is_zero()
    }
}

impl WordOps for usize {
    #[inline(always)]
    fn bit_len(&self) -> usize {
        (usize::BITS - self.leading_zeros()) as _
    }

    #[inline(always)]
    fn is_pow2(&self) -> bool {
        *self & self.wrapping_sub(1) == 0
    }
}

impl WordOps for u64 {
    #[inline(always)]
    fn bit_len(&self) -> usize {
        (u64::BITS - self.leading_zeros()) as _
    }

    #[inline(always)]
    fn is_pow2(&self) -> bool {
        *self & self.wrapping_sub(1) == 0
    }
}

/// Returns (1 << bits) - 1.
#[inline(always)]
pub fn mask(bits: usize) -> BigUint {
    (BigUint::one() << bits) - BigUint::one()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log2_helpers() {
        assert_eq!(193u64.bit_len(), 8);
        assert_eq!(193u64.log2_floor(), 7);
        assert_eq!(193u64.log2_ceil(), 8);
        assert_eq!(256usize.log2_ceil(), 8);
        assert_eq!(1usize.log2_ceil(), 0);
        assert_eq!(0usize.log2_ceil(), 0);
        assert_eq!(BigUint::from(8u32).log2_ceil(), 3);
        assert_eq!(BigUint::from(9u32).log2_ceil(), 4);
        assert_eq!(BigUint::zero().log2_floor(), 0);
        assert_eq!(mask(12), BigUint::from(0xfffu32));
    }
}
