//! Number theory helpers behind prime sampling and prime rank queries.

const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Deterministic Miller-Rabin primality test, exact for every `i64`.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let n = n as u64;
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Smallest prime `>= n`, if one fits in `i64`.
pub fn next_prime(n: i64) -> Option<i64> {
    let mut candidate = n.max(2);
    loop {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate = candidate.checked_add(1)?;
    }
}

/// Largest prime `<= n`.
pub fn prev_prime(n: i64) -> Option<i64> {
    let mut candidate = n;
    while candidate >= 2 {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate -= 1;
    }
    None
}

/// All primes in `[lower, upper]` in ascending order.
///
/// Runs a segmented sieve over the range, so memory grows with
/// `upper - lower`. Fine for test-generation ranges, not for huge spans.
pub fn primes_in_range(lower: i64, upper: i64) -> Vec<i64> {
    let lower = lower.max(2);
    if upper < lower {
        return Vec::new();
    }

    let limit = isqrt(upper as u64);
    let mut base = vec![true; limit as usize + 1];
    let mut base_primes = Vec::new();
    for i in 2..=limit as usize {
        if base[i] {
            base_primes.push(i as u64);
            let mut j = i * i;
            while j <= limit as usize {
                base[j] = false;
                j += i;
            }
        }
    }

    let lo = lower as u64;
    let hi = upper as u64;
    let mut segment = vec![true; (hi - lo + 1) as usize];
    for &p in &base_primes {
        let first = (p * p).max(lo.div_ceil(p) * p);
        let mut multiple = first;
        while multiple <= hi {
            segment[(multiple - lo) as usize] = false;
            multiple += p;
        }
    }

    segment
        .iter()
        .enumerate()
        .filter(|(_, alive)| **alive)
        .map(|(offset, _)| lower + offset as i64)
        .collect()
}

fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}
