//! Bounded random source.
//!
//! [`Random`] is the single stream every descriptor draws from. It is an
//! explicit handle rather than ambient state: callers own it, seed it, and
//! pass it by `&mut` into every generation call, so the order in which
//! descriptors are evaluated fully determines the output.

use crate::{data::Seed, error::*, prime};
use log::warn;
use rand::{seq::SliceRandom, Rng, RngCore};

/// Number of extra draws used when weighting is enabled without a count.
pub const DEFAULT_WCNT: i64 = 5;

/// Seedable random stream with bound-checked sampling helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Random {
    state: Seed,
}

impl Random {
    /// Create a stream from a fixed seed.
    pub fn from_u64(value: u64) -> Self {
        Random {
            state: Seed::from_u64(value),
        }
    }

    /// Create a stream from an already split seed.
    pub fn from_seed(state: Seed) -> Self {
        Random { state }
    }

    /// Create a stream seeded from system entropy.
    pub fn from_entropy() -> Self {
        Random {
            state: Seed::random(),
        }
    }

    /// Reset the stream deterministically.
    pub fn seed(&mut self, value: u64) {
        self.state = Seed::from_u64(value);
    }

    /// Uniform integer in `[lower, upper]`, or `(lower, upper)` when not inclusive.
    pub fn rand_int(&mut self, lower: i64, upper: i64, inclusive: bool) -> Result<i64> {
        let (lo, hi) = effective_range(lower, upper, inclusive)?;
        warn_single(lo, hi, &lower, &upper);
        Ok(self.gen_range(lo..=hi))
    }

    /// Maximum (`wcnt > 0`) or minimum (`wcnt < 0`) of `1 + |wcnt|` uniform integers.
    pub fn weighted_rand_int(
        &mut self,
        lower: i64,
        upper: i64,
        wcnt: i64,
        inclusive: bool,
    ) -> Result<i64> {
        self.order_statistic(wcnt, |rng| rng.rand_int(lower, upper, inclusive))
    }

    /// Uniform float on the `10^-places` grid between the bounds.
    pub fn rand_float(&mut self, lower: f64, upper: f64, places: u32, inclusive: bool) -> Result<f64> {
        let (lo, hi) = scaled_range(lower, upper, places, inclusive)?;
        warn_single(lo, hi, &lower, &upper);
        Ok(self.gen_range(lo..=hi) as f64 / scale(places))
    }

    /// Order-statistic weighting over [`Random::rand_float`].
    pub fn weighted_rand_float(
        &mut self,
        lower: f64,
        upper: f64,
        places: u32,
        wcnt: i64,
        inclusive: bool,
    ) -> Result<f64> {
        self.order_statistic(wcnt, |rng| rng.rand_float(lower, upper, places, inclusive))
    }

    /// A random prime between the bounds.
    ///
    /// Draws a uniform point and walks up to the next prime, falling back
    /// to the nearest prime below the point when the walk leaves the range.
    pub fn rand_prime(&mut self, lower: i64, upper: i64, inclusive: bool) -> Result<i64> {
        let (lo, hi) = effective_range(lower, upper, inclusive)?;
        warn_single(lo, hi, &lower, &upper);

        let start = self.gen_range(lo..=hi);
        let found = match prime::next_prime(start) {
            Some(p) if p <= hi => Some(p),
            _ => prime::prev_prime(start).filter(|&p| p >= lo),
        };
        found.ok_or_else(|| {
            TcgenError::unsatisfiable(format!("no prime exists in [{lower}, {upper}]"))
        })
    }

    /// Order-statistic weighting over [`Random::rand_prime`].
    pub fn weighted_rand_prime(
        &mut self,
        lower: i64,
        upper: i64,
        wcnt: i64,
        inclusive: bool,
    ) -> Result<i64> {
        self.order_statistic(wcnt, |rng| rng.rand_prime(lower, upper, inclusive))
    }

    /// Uniform symbol from a non-empty alphabet.
    pub fn choice(&mut self, alphabet: &[char]) -> Result<char> {
        if alphabet.is_empty() {
            return Err(TcgenError::invalid_argument("cannot choose from an empty alphabet"));
        }
        let index = self.rand_int(1, alphabet.len() as i64, true)?;
        Ok(alphabet[index as usize - 1])
    }

    /// Rank-biased symbol choice.
    ///
    /// `priority[i]` is the preference rank of `alphabet[i]` (1 is the most
    /// preferred). With `wcnt > 0` low ranks win more often, with
    /// `wcnt < 0` high ranks do.
    pub fn weighted_choice(&mut self, alphabet: &[char], priority: &[usize], wcnt: i64) -> Result<char> {
        if alphabet.is_empty() {
            return Err(TcgenError::invalid_argument("cannot choose from an empty alphabet"));
        }
        if priority.len() != alphabet.len() {
            return Err(TcgenError::invalid_argument(format!(
                "priority has {} entries for an alphabet of {}",
                priority.len(),
                alphabet.len()
            )));
        }

        let n = alphabet.len() as i64;
        let rank = self.weighted_rand_int(1, n, wcnt, true)?;
        let position = (n - rank + 1) as usize;
        priority
            .iter()
            .position(|&p| p == position)
            .map(|index| alphabet[index])
            .ok_or_else(|| {
                TcgenError::invalid_argument(format!("priority must be a permutation of 1..={n}"))
            })
    }

    /// Add independent uniform jitter to every element of `data`.
    pub fn noise(&mut self, lower: i64, upper: i64, data: &[i64], inclusive: bool) -> Result<Vec<i64>> {
        data.iter()
            .map(|&value| {
                let jitter = self.rand_int(lower, upper, inclusive)?;
                value.checked_add(jitter).ok_or_else(|| {
                    TcgenError::invalid_argument(format!("{value} + {jitter} overflows"))
                })
            })
            .collect()
    }

    /// Shuffle in place and hand the slice back for chaining.
    pub fn shuffle<'a, T>(&mut self, items: &'a mut [T]) -> &'a mut [T] {
        items.shuffle(self);
        items
    }

    fn order_statistic<T, F>(&mut self, wcnt: i64, mut draw: F) -> Result<T>
    where
        T: PartialOrd,
        F: FnMut(&mut Self) -> Result<T>,
    {
        let mut best = draw(self)?;
        for _ in 0..wcnt.unsigned_abs() {
            let candidate = draw(self)?;
            if (wcnt > 0 && candidate > best) || (wcnt < 0 && candidate < best) {
                best = candidate;
            }
        }
        Ok(best)
    }
}

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let (value, next) = self.state.next_u64();
        self.state = next;
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Closed integer range left after applying inclusivity.
pub(crate) fn effective_range(lower: i64, upper: i64, inclusive: bool) -> Result<(i64, i64)> {
    let (lo, hi) = if inclusive {
        (lower as i128, upper as i128)
    } else {
        (lower as i128 + 1, upper as i128 - 1)
    };
    if lo > hi {
        return Err(TcgenError::invalid_range(lower, upper));
    }
    Ok((lo as i64, hi as i64))
}

/// Effective range of a float on the `10^-places` grid, as scaled integers.
///
/// Bounds must be finite and stay inside `i64` once scaled.
pub(crate) fn scaled_range(lower: f64, upper: f64, places: u32, inclusive: bool) -> Result<(i64, i64)> {
    let factor = scale(places);
    let lo = scaled_bound(lower, factor, places)?;
    let hi = scaled_bound(upper, factor, places)?;
    effective_range(lo, hi, inclusive).map_err(|_| TcgenError::invalid_range(lower, upper))
}

fn scaled_bound(bound: f64, factor: f64, places: u32) -> Result<i64> {
    let scaled = (bound * factor).round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
        return Err(TcgenError::invalid_argument(format!(
            "bound {bound} cannot be represented with {places} decimal places"
        )));
    }
    Ok(scaled as i64)
}

pub(crate) fn scale(places: u32) -> f64 {
    10f64.powi(places as i32)
}

fn warn_single<B: std::fmt::Display>(lo: i64, hi: i64, lower: &B, upper: &B) {
    if lo == hi {
        warn!("The bounds {lower} and {upper} allow only one value to be generated");
    }
}
