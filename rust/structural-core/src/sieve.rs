//! Smallest-prime-factor sieve.

use crate::isqrt;

/// Dense table of smallest prime factors over `0..=bound`.
///
/// `spf[i] == i` exactly when `i` is prime or `i < 2`. Built once per run
/// and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SpfTable {
    spf: Vec<u64>,
}

impl SpfTable {
    /// Sieve smallest prime factors up to and including `bound`.
    ///
    /// Only primes up to floor(sqrt(bound)) are crossed out, starting at
    /// i*i. A multiple already claimed by a smaller prime keeps that prime.
    pub fn new(bound: u64) -> Self {
        let mut spf: Vec<u64> = (0..=bound).collect();

        for i in 2..=isqrt(bound) {
            if spf[i as usize] != i {
                continue;
            }
            let mut j = i * i;
            while j <= bound {
                let slot = &mut spf[j as usize];
                if *slot == j {
                    *slot = i;
                }
                j += i;
            }
        }

        SpfTable { spf }
    }

    /// Largest index covered by the table.
    pub fn bound(&self) -> u64 {
        // The table always holds at least index 0.
        self.spf.len() as u64 - 1
    }

    /// Smallest prime factor of `n`, or `None` past the table bound.
    pub fn get(&self, n: u64) -> Option<u64> {
        usize::try_from(n).ok().and_then(|i| self.spf.get(i)).copied()
    }

    /// Primality from the table; `None` past the table bound.
    pub fn is_prime(&self, n: u64) -> Option<bool> {
        self.get(n).map(|p| n >= 2 && p == n)
    }

    /// Ascending primes in `2..=bound` (the table's fixed points).
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.spf
            .iter()
            .enumerate()
            .skip(2)
            .filter(|&(i, &p)| p == i as u64)
            .map(|(_, &p)| p)
    }

    /// Count (primes, composites) over `2..=upto`, clamped to the table bound.
    pub fn prime_composite_counts(&self, upto: u64) -> (u64, u64) {
        let upto = upto.min(self.bound());
        let mut primes = 0;
        let mut composites = 0;
        for n in 2..=upto {
            if self.spf[n as usize] == n {
                primes += 1;
            } else {
                composites += 1;
            }
        }
        (primes, composites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spf_small_table() {
        let table = SpfTable::new(30);
        let head: Vec<u64> = (2..=12).filter_map(|n| table.get(n)).collect();
        assert_eq!(head, vec![2, 3, 2, 5, 2, 7, 2, 3, 2, 11, 2]);
        assert_eq!(table.get(25), Some(5));
        assert_eq!(table.get(29), Some(29));
        assert_eq!(table.get(21), Some(3));
        assert_eq!(table.get(31), None);
        assert_eq!(table.bound(), 30);
    }

    #[test]
    fn test_spf_degenerate_bounds() {
        let zero = SpfTable::new(0);
        assert_eq!(zero.get(0), Some(0));
        assert_eq!(zero.get(1), None);
        assert_eq!(zero.primes().count(), 0);

        let one = SpfTable::new(1);
        assert_eq!(one.get(1), Some(1));
        assert_eq!(one.is_prime(1), Some(false));
        assert_eq!(one.is_prime(0), Some(false));
    }

    #[test]
    fn test_spf_is_smallest_factor() {
        let table = SpfTable::new(2000);
        for n in 2..=2000u64 {
            let expected = (2..=n).find(|d| n % d == 0).unwrap();
            assert_eq!(table.get(n), Some(expected), "spf({})", n);
        }
    }

    #[test]
    fn test_primes_iterator() {
        let table = SpfTable::new(30);
        let primes: Vec<u64> = table.primes().collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_prime_composite_counts() {
        let table = SpfTable::new(100);
        assert_eq!(table.prime_composite_counts(10), (4, 5));
        assert_eq!(table.prime_composite_counts(100), (25, 74));
        // Clamped to the bound
        assert_eq!(table.prime_composite_counts(500), (25, 74));
    }
}
