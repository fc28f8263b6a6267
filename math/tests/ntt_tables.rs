use itertools::izip;
use ntt_math::dft::ntt::Table;
use ntt_math::modulus::prime::Prime;
use ntt_math::modulus::prime_generation::find_candidate;
use num_bigint::BigUint;
use num_traits::One;

const WIDTHS: [usize; 9] = [4, 8, 12, 16, 24, 32, 48, 64, 128];

#[test]
fn ntt_tables() {
    for digit_bit in WIDTHS {
        let prime: Prime = find_candidate(digit_bit).unwrap();
        let table: Table = Table::new(&prime).unwrap();

        sub_test(&format!("test_ladder_lengths/digit_bit={digit_bit}"), || {
            test_ladder_lengths(&prime, &table)
        });
        sub_test(&format!("test_roots_are_primitive/digit_bit={digit_bit}"), || {
            test_roots_are_primitive(&prime, &table)
        });
        sub_test(&format!("test_conjugates_invert_roots/digit_bit={digit_bit}"), || {
            test_conjugates_invert_roots(&prime, &table)
        });
        sub_test(&format!("test_powers_of_half/digit_bit={digit_bit}"), || {
            test_powers_of_half(&prime, &table)
        });
    }
}

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

fn test_ladder_lengths(prime: &Prime, table: &Table) {
    let n: usize = prime.even_exp() + 1;
    assert_eq!(table.root_of_unity.len(), n);
    assert_eq!(table.conj_of_unity.len(), n);
    assert_eq!(table.powers_of_half.len(), n);
    assert!(table.root_of_unity[0].is_one());
    assert!(table.conj_of_unity[0].is_one());
    assert!(table.powers_of_half[0].is_one());
    assert_eq!(table.root_of_unity[prime.even_exp()], table.omega);
    assert_eq!(table.conj_of_unity[prime.even_exp()], table.omega_inv);
}

fn test_roots_are_primitive(prime: &Prime, table: &Table) {
    let q: &BigUint = prime.q();
    for (k, root) in table.root_of_unity.iter().enumerate() {
        assert!(root < q);
        assert!(root.modpow(&(BigUint::one() << k), q).is_one(), "k = {k}");
        if k > 0 {
            assert!(!root.modpow(&(BigUint::one() << (k - 1)), q).is_one(), "k = {k}");
        }
    }
    // each rung is the square of the next one.
    for (lo, hi) in izip!(table.root_of_unity.iter(), table.root_of_unity.iter().skip(1)) {
        assert_eq!(&((hi * hi) % q), lo);
    }
}

fn test_conjugates_invert_roots(prime: &Prime, table: &Table) {
    let q: &BigUint = prime.q();
    for (root, conj) in izip!(table.root_of_unity.iter(), table.conj_of_unity.iter()) {
        assert!(conj < q);
        assert!(((root * conj) % q).is_one());
    }
}

fn test_powers_of_half(prime: &Prime, table: &Table) {
    let q: &BigUint = prime.q();
    for (k, half) in table.powers_of_half.iter().enumerate() {
        assert!(half < q);
        assert!(((half << k) % q).is_one(), "k = {k}");
    }
}
