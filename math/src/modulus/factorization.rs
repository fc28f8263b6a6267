use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeFactor {
    pub factor: BigUint,
    pub multiplicity: usize,
}

/// Factors n by trial division up to sqrt(n), plus the residual factor.
/// Returns an empty list for n <= 1.
pub fn factorize(n: &BigUint) -> Vec<PrimeFactor> {
    let mut n: BigUint = n.clone();
    let mut factors: Vec<PrimeFactor> = Vec::new();
    let mut fac: BigUint = BigUint::from(2u32);

    while &fac * &fac <= n {
        let mut multiplicity: usize = 0;
        loop {
            let (q, r): (BigUint, BigUint) = n.div_rem(&fac);
            if !r.is_zero() {
                break;
            }
            n = q;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            factors.push(PrimeFactor {
                factor: fac.clone(),
                multiplicity,
            });
        }
        fac += 1u32;
    }

    if n > BigUint::one() {
        factors.push(PrimeFactor {
            factor: n,
            multiplicity: 1,
        });
    }

    factors
}
