use ntt_math::modulus::WordOps;
use ntt_math::modulus::factorization::factorize;
use ntt_math::modulus::prime::{Decomposition, Prime};
use ntt_math::modulus::prime_generation::find_candidate;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use primality_test::is_prime;
use prime_factorization::Factorization;

#[test]
fn prime_search() {
    sub_test("test_miller_oracle_small_odd_values", test_miller_oracle_small_odd_values);
    sub_test("test_candidates_are_prime", test_candidates_are_prime);
    sub_test("test_candidates_maximise_even_exp", test_candidates_maximise_even_exp);
    sub_test("test_factorization_matches_reference", test_factorization_matches_reference);
    sub_test("test_generators", test_generators);
    sub_test("test_composites_are_rejected", test_composites_are_rejected);
}

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

fn test_miller_oracle_small_odd_values() {
    for n in (3u64..1 << 16).step_by(2) {
        let decomposition: Decomposition = Decomposition::split(&BigUint::from(n)).unwrap();
        assert_eq!(decomposition.value(), BigUint::from(n));
        assert_eq!(decomposition.is_prime(), is_prime(n), "n = {n}");
    }
}

fn test_candidates_are_prime() {
    for bit_len in 2..=64usize {
        let prime: Prime = find_candidate(bit_len).unwrap();
        let q: u64 = prime.q().to_u64().unwrap();
        assert!(prime.q().bit_len() <= bit_len, "bit_len = {bit_len}");
        assert!(prime.odd_part().bit(0));
        assert!(prime.even_exp() >= 1);
        assert!(is_prime(q), "q = {q}");
    }
}

fn test_candidates_maximise_even_exp() {
    // Any prime of the form 2^s' * d + 1 with s' > s would have been found first.
    for bit_len in 2..=16usize {
        let prime: Prime = find_candidate(bit_len).unwrap();
        for n in 3u64..(1 << bit_len) {
            if is_prime(n) {
                assert!(
                    (n - 1).trailing_zeros() as usize <= prime.even_exp(),
                    "bit_len = {bit_len}: {n} beats {}",
                    prime.q()
                );
            }
        }
    }
}

fn test_factorization_matches_reference() {
    for bit_len in 2..=64usize {
        let prime: Prime = find_candidate(bit_len).unwrap();
        let phi: u64 = prime.q().to_u64().unwrap() - 1;
        let ours: Vec<(u64, u32)> = factorize(&BigUint::from(phi))
            .iter()
            .map(|pf| (pf.factor.to_u64().unwrap(), pf.multiplicity as u32))
            .collect();
        let reference: Vec<(u64, u32)> = Factorization::run(phi).prime_factor_repr();
        assert_eq!(ours, reference, "phi = {phi}");
    }
}

fn test_generators() {
    for bit_len in 2..=64usize {
        let prime: Prime = find_candidate(bit_len).unwrap();
        let g: BigUint = prime.primitive_root().unwrap();
        let phi: BigUint = prime.q() - BigUint::one();
        assert!(g < *prime.q());
        for pf in prime.factors.iter() {
            assert!(!g.modpow(&(&phi / &pf.factor), prime.q()).is_one());
        }
        // smallest: every g' < g fails for some factor.
        let mut smaller: BigUint = BigUint::one();
        while smaller < g {
            assert!(!prime.is_generator(&smaller));
            smaller += 1u32;
        }
    }
}

fn test_composites_are_rejected() {
    for n in [9u32, 15, 21, 25, 561, 1105, 1729, 2047, 3277, 4033, 4681, 8321] {
        assert!(Prime::new(BigUint::from(n)).is_err(), "n = {n}");
    }
    assert!(Prime::new(BigUint::from(193u32)).is_ok());
}
