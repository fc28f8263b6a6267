use crate::modulus::WordOps;
use crate::modulus::factorization::{PrimeFactor, factorize};
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

/// n = 2^even_exp * odd_part + 1.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decomposition {
    pub even_exp: usize,
    pub odd_part: BigUint,
}

impl Decomposition {
    pub fn new(even_exp: usize, odd_part: BigUint) -> Self {
        debug_assert!(
            odd_part.bit(0),
            "invalid argument odd_part: {} is even",
            odd_part
        );
        Self { even_exp, odd_part }
    }

    /// Splits n - 1 into 2^s * d with d odd.
    /// Returns None for n < 2.
    pub fn split(n: &BigUint) -> Option<Self> {
        if *n < BigUint::from(2u32) {
            return None;
        }
        let m: BigUint = n - BigUint::one();
        let even_exp: usize = m.trailing_zeros()? as usize;
        Some(Self {
            even_exp,
            odd_part: m >> even_exp,
        })
    }

    pub fn value(&self) -> BigUint {
        (&self.odd_part << self.even_exp) + BigUint::one()
    }

    /// Miller test with witnesses a = 2 ..= min(n - 2, 2 * s * bitlen(d)).
    pub fn is_prime(&self) -> bool {
        let n: BigUint = self.value();
        if n < BigUint::from(3u32) {
            return n == BigUint::from(2u32);
        }
        let n_minus_one: BigUint = &n - BigUint::one();
        let s: usize = self.even_exp;
        let d: &BigUint = &self.odd_part;

        let witnesses: u64 = (2 * s * d.bit_len()) as u64;
        let limit: u64 = match (&n - 2u32).to_u64() {
            Some(cap) => cap.min(witnesses),
            None => witnesses,
        };

        (2..=limit).all(|a| {
            let mut x: BigUint = BigUint::from(a).modpow(d, &n);
            for _ in 0..s {
                if x.is_one() || x == n_minus_one {
                    x = BigUint::one();
                    break;
                }
                x = (&x * &x) % &n;
                if x.is_one() {
                    return false;
                }
            }
            x.is_one()
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime {
    pub q: BigUint,
    pub decomposition: Decomposition,
    /// distinct factors of q-1 with multiplicities.
    pub factors: Vec<PrimeFactor>,
}

impl Prime {
    /// Returns a new instance of Prime.
    /// Fails if q is not accepted by Decomposition::is_prime.
    pub fn new(q: BigUint) -> Result<Self> {
        let decomposition: Decomposition = Decomposition::split(&q)
            .filter(|d| d.even_exp >= 1)
            .ok_or_else(|| Error::Inconsistent(format!("{q} is not of the form 2^s * d + 1")))?;
        if !decomposition.is_prime() {
            return Err(Error::Inconsistent(format!("{q} is not prime")));
        }
        Ok(Self::new_unchecked(decomposition))
    }

    /// Returns a new instance of Prime.
    /// Does not check that the decomposition is prime.
    pub fn new_unchecked(decomposition: Decomposition) -> Self {
        let q: BigUint = decomposition.value();
        let factors: Vec<PrimeFactor> = factorize(&(&q - BigUint::one()));
        Self {
            q,
            decomposition,
            factors,
        }
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn even_exp(&self) -> usize {
        self.decomposition.even_exp
    }

    pub fn odd_part(&self) -> &BigUint {
        &self.decomposition.odd_part
    }

    /// Returns x^exponent mod q.
    #[inline(always)]
    pub fn pow(&self, x: &BigUint, exponent: &BigUint) -> BigUint {
        x.modpow(exponent, &self.q)
    }

    /// Returns true if g^((q-1)/f) != 1 for every distinct factor f of q-1.
    pub fn is_generator(&self, g: &BigUint) -> bool {
        let phi: BigUint = &self.q - BigUint::one();
        self.factors
            .iter()
            .all(|pf| !self.pow(g, &(&phi / &pf.factor)).is_one())
    }

    /// Returns the smallest generator of the units modulo q.
    pub fn primitive_root(&self) -> Result<BigUint> {
        let mut candidate: BigUint = BigUint::one();
        while candidate < self.q {
            if self.is_generator(&candidate) {
                return Ok(candidate);
            }
            candidate += 1u32;
        }
        Err(Error::NoGeneratorFound(self.q.clone()))
    }
}

impl std::fmt::Display for Prime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "2^{} * {} + 1", self.even_exp(), self.odd_part())
    }
}
