use num_bigint::BigUint;
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

/// Seeded ChaCha8 stream; the same seed always yields the same samples.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.source.fill_bytes(&mut seed);
        seed
    }

    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }

    /// Uniform in [0, 2^bits).
    pub fn next_biguint(&mut self, bits: usize) -> BigUint {
        let mut bytes: Vec<u8> = vec![0u8; bits.div_ceil(8)];
        self.source.fill_bytes(&mut bytes);
        if bits % 8 != 0 {
            if let Some(top) = bytes.last_mut() {
                *top &= (1u8 << (bits % 8)) - 1;
            }
        }
        BigUint::from_bytes_le(&bytes)
    }

    /// Uniform in [0, max), by rejection on the bit length of max.
    pub fn next_biguint_below(&mut self, max: &BigUint) -> BigUint {
        debug_assert!(max.bits() > 0, "invalid argument max: must be positive");
        let bits: usize = max.bits() as usize;
        let mut x: BigUint = self.next_biguint(bits);
        while &x >= max {
            x = self.next_biguint(bits);
        }
        x
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_bit_width() {
        let mut source: Source = Source::new([7u8; 32]);
        for bits in [1usize, 7, 8, 9, 63, 64, 65, 130] {
            for _ in 0..64 {
                assert!(source.next_biguint(bits).bits() as usize <= bits);
            }
        }
    }

    #[test]
    fn below_bound() {
        let mut source: Source = Source::new([0u8; 32]);
        let max: BigUint = BigUint::from(193u32);
        for _ in 0..1000 {
            assert!(source.next_biguint_below(&max) < max);
        }
    }

    #[test]
    fn deterministic() {
        let mut a: Source = Source::new([3u8; 32]);
        let mut b: Source = Source::new([3u8; 32]);
        assert_eq!(a.next_biguint(200), b.next_biguint(200));
        assert_eq!(a.branch().next_u64(), b.branch().next_u64());
    }
}
