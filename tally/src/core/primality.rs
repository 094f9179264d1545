//! Deterministic primality test for 64-bit integers

/// Witnesses that make Miller-Rabin exact for every n < 2^64
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Whether `n` is prime. Negative numbers, 0 and 1 are not.
pub fn is_prime(n: i64) -> bool {
    match u64::try_from(n) {
        Ok(n) => is_prime_u64(n),
        Err(_) => false,
    }
}

fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    // n - 1 = d * 2^s with d odd
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    WITNESSES.iter().all(|&a| passes_round(n, a, d, s))
}

/// One Miller-Rabin round; `false` means `a` proves `n` composite
fn passes_round(n: u64, a: u64, d: u64, s: u32) -> bool {
    let mut x = mod_pow(a, d, n);
    if x == 1 || x == n - 1 {
        return true;
    }
    for _ in 1..s {
        x = mod_mul(x, x, n);
        if x == n - 1 {
            return true;
        }
    }
    false
}

fn mod_mul(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn mod_pow(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mod_mul(result, base, m);
        }
        base = mod_mul(base, base, m);
        exp >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        let cases = [
            (1, false),
            (2, true),
            (3, true),
            (4, false),
            (5, true),
            (6, false),
            (7, true),
            (8, false),
            (9, false),
            (10, false),
        ];

        for (n, expected) in cases {
            assert_eq!(is_prime(n), expected, "is_prime({n})");
        }
    }

    #[test]
    fn test_non_positive_are_not_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(-1));
        assert!(!is_prime(-2));
        assert!(!is_prime(-7));
        assert!(!is_prime(i64::MIN));
    }

    #[test]
    fn test_matches_trial_division_below_ten_thousand() {
        fn trial_division(n: i64) -> bool {
            n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
        }

        for n in 0..10_000 {
            assert_eq!(is_prime(n), trial_division(n), "is_prime({n})");
        }
    }

    #[test]
    fn test_strong_pseudoprimes() {
        // Fool single-base tests but not the full witness set
        assert!(!is_prime(2_047));
        assert!(!is_prime(1_373_653));
        assert!(!is_prime(3_215_031_751));
        assert!(!is_prime(3_825_123_056_546_413_051));
        // Carmichael numbers
        assert!(!is_prime(561));
        assert!(!is_prime(41_041));
    }

    #[test]
    fn test_large_values() {
        // Largest prime below 2^63
        assert!(is_prime(9_223_372_036_854_775_783));
        assert!(!is_prime(i64::MAX));
        // Mersenne prime 2^61 - 1
        assert!(is_prime(2_305_843_009_213_693_951));
        // Semiprime of two primes near 10^9
        assert!(!is_prime(1_000_000_007 * 998_244_353));
    }
}
