use crate::modulus::WordOps;
use crate::modulus::prime::{Decomposition, Prime};
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::One;
use tracing::debug;

/// Returns the first prime 2^s * d + 1 of at most bit_len bits, scanning s
/// downwards from bit_len - 1 and, for each s, odd d upwards from 1.
///
/// The first hit therefore maximises the power of two dividing p - 1, which
/// bounds the largest transform the prime supports.
pub fn find_candidate(bit_len: usize) -> Result<Prime> {
    for even_exp in (1..bit_len).rev() {
        let mut odd_part: BigUint = BigUint::one();
        while odd_part.bit_len() + even_exp <= bit_len {
            let candidate: Decomposition = Decomposition::new(even_exp, odd_part.clone());
            if candidate.is_prime() {
                debug!(even_exp, odd_part = %odd_part, "found NTT-friendly prime");
                return Ok(Prime::new_unchecked(candidate));
            }
            odd_part += 2u32;
        }
    }
    Err(Error::NoPrimeFound(bit_len))
}
