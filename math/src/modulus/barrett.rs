use crate::modulus::{WordOps, mask};
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::One;

/// Division-free reduction modulo q for inputs in [0, 2^dbdgt_bit).
///
/// The quotient floor(x / q) is computed as (x * mu) >> shift, with the product
/// held in qudgt_bit bits. When mu does not
/// fit in dbdgt_bit bits its top bit (always 2^dbdgt_bit) is folded back as an
/// addition of x, and the carry out of that addition is kept explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarrettPrecomp {
    pub q: BigUint,
    pub dbdgt_bit: usize,
    pub qudgt_bit: usize,
    /// ceil(2^shift / q) with trailing zeros removed.
    pub mu: BigUint,
    pub shift: usize,
    /// mu needs dbdgt_bit + 1 bits; the emitted constant drops the top bit.
    pub wide: bool,
}

impl BarrettPrecomp {
    pub fn new(q: &BigUint, dbdgt_bit: usize, qudgt_bit: usize) -> Result<Self> {
        if q.bit_len() < 2 || q.bit_len() > dbdgt_bit {
            return Err(Error::Inconsistent(format!(
                "cannot reduce {dbdgt_bit}-bit values modulo {q}"
            )));
        }
        if qudgt_bit < 2 * dbdgt_bit {
            return Err(Error::Inconsistent(format!(
                "{qudgt_bit}-bit products cannot hold two {dbdgt_bit}-bit factors"
            )));
        }

        let mut shift: usize = dbdgt_bit + q.log2_ceil();
        let mut mu: BigUint = ((BigUint::one() << shift) + q - BigUint::one()) / q;
        while !mu.bit(0) {
            mu >>= 1;
            shift -= 1;
        }

        let wide: bool = mu.bit_len() > dbdgt_bit;
        if wide {
            // mu >= 2^dbdgt_bit and q >= 3 force shift > dbdgt_bit.
            if mu.bit_len() != dbdgt_bit + 1 || shift <= dbdgt_bit || shift - dbdgt_bit > dbdgt_bit {
                return Err(Error::Inconsistent(format!(
                    "mu = {mu} with shift {shift} does not fit the four-step scheme for {dbdgt_bit} bits"
                )));
            }
        }

        Ok(Self {
            q: q.clone(),
            dbdgt_bit,
            qudgt_bit,
            mu,
            shift,
            wide,
        })
    }

    /// The constant written to the header: mu, truncated to dbdgt_bit bits.
    pub fn mu_emitted(&self) -> BigUint {
        if self.wide {
            &self.mu & mask(self.dbdgt_bit)
        } else {
            self.mu.clone()
        }
    }

    /// shift - dbdgt_bit, the second right shift of the four-step scheme.
    pub fn excess_shift(&self) -> usize {
        self.shift.saturating_sub(self.dbdgt_bit)
    }

    /// Quotient as computed by the emitted mod_prime, including the
    /// truncations of the fixed-width C types.
    pub fn quotient(&self, x: &BigUint) -> BigUint {
        let dbdgt_mask: BigUint = mask(self.dbdgt_bit);
        let x: BigUint = x & &dbdgt_mask;
        // (qudgt_t)x * prime_mu
        let product: BigUint = (&x * self.mu_emitted()) & mask(self.qudgt_bit);

        if !self.wide {
            // dbdgt_t quot = ((qudgt_t)x * prime_mu) >> prime_shift;
            return (product >> self.shift) & &dbdgt_mask;
        }

        // dbdgt_t prod = ((qudgt_t)x * prime_mu) >> DBDGT_BIT;
        let prod: BigUint = (product >> self.dbdgt_bit) & &dbdgt_mask;
        // __builtin_add_overflow(prod, x, &prod)
        let sum: BigUint = prod + &x;
        let overflow: BigUint = &sum >> self.dbdgt_bit;
        let prod: BigUint = sum & &dbdgt_mask;
        let excess: usize = self.excess_shift();
        let carry: BigUint = (overflow << (self.dbdgt_bit - excess)) & &dbdgt_mask;
        (prod >> excess) | carry
    }

    /// x - q * quotient(x), wrapped to dbdgt_bit bits then narrowed to the
    /// digit width, as the emitted mod_prime returns it.
    pub fn reduce(&self, x: &BigUint, digit_bit: usize) -> BigUint {
        let modulus: BigUint = BigUint::one() << self.dbdgt_bit;
        let x: BigUint = x % &modulus;
        let qq: BigUint = (&self.q * self.quotient(&x)) % &modulus;
        let r: BigUint = (x + &modulus - qq) % &modulus;
        r & mask(digit_bit)
    }
}
