//! Closure search by trial division.

use num_integer::Integer;

use crate::isqrt;

/// Smallest odd divisor of `n` in `3..=limit_d`, if any.
///
/// Even divisors are never tried; callers check evenness first.
pub fn odd_closure_witness(n: u64, limit_d: u64) -> Option<u64> {
    (3..=limit_d).step_by(2).find(|&d| n % d == 0)
}

/// Smallest divisor of `n` that is >= 2 and <= floor(sqrt(n)).
///
/// `None` means no closure up to floor(sqrt(n)): `n` is prime (or below 4).
pub fn smallest_divisor(n: u64) -> Option<u64> {
    if n >= 4 && n.is_even() {
        return Some(2);
    }
    odd_closure_witness(n, isqrt(n))
}
