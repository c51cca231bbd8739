use super::*;
use crate::prime::primes_in_range;
use crate::random::effective_range;
use log::debug;
use std::{cell::OnceCell, ops};

/// Random prime recipe.
///
/// Rank queries enumerate every prime in the range once and keep the list,
/// which is affordable for test-generation ranges but not for huge spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Prime {
    lower: i64,
    upper: i64,
    inclusive: bool,
    weight: Option<i64>,
    primes: OnceCell<Vec<i64>>,
    cache: Lazy<i64>,
}

impl Default for Prime {
    fn default() -> Self {
        Prime {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            inclusive: true,
            weight: None,
            primes: OnceCell::new(),
            cache: Lazy::new(),
        }
    }
}

impl Prime {
    /// Prime in `[lower, upper]`.
    pub fn range(lower: impl Into<Number>, upper: impl Into<Number>) -> Result<Self> {
        Prime {
            lower: lower.into().as_i64(),
            upper: upper.into().as_i64(),
            ..Prime::default()
        }
        .validated()
    }

    /// Prime in `[1, upper]`.
    pub fn up_to(upper: impl Into<Number>) -> Result<Self> {
        Prime::range(DEFAULT_LOWER, upper)
    }

    /// Build from declarative parameters.
    pub fn from_params(params: &Params) -> Result<Self> {
        let (lower, upper) = params.bounds(DEFAULT_LOWER.into(), DEFAULT_UPPER.into())?;
        Prime {
            lower: lower.as_i64(),
            upper: upper.as_i64(),
            inclusive: params.inclusive.unwrap_or(true),
            weight: params.weight(),
            ..Prime::default()
        }
        .validated()
    }

    /// Include both bounds.
    pub fn inclusive(mut self) -> Self {
        self.inclusive = true;
        self.primes = OnceCell::new();
        self
    }

    /// Exclude both bounds.
    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self.primes = OnceCell::new();
        self
    }

    /// Weighted towards the upper bound with the default count.
    pub fn weighted(self) -> Self {
        self.with_wcnt(DEFAULT_WCNT)
    }

    /// Weighted by the max (`wcnt > 0`) or min (`wcnt < 0`) of several draws.
    pub fn with_wcnt(mut self, wcnt: i64) -> Self {
        self.weight = Some(wcnt);
        self
    }

    /// Lower bound as configured.
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Upper bound as configured.
    pub fn upper(&self) -> i64 {
        self.upper
    }

    fn validated(self) -> Result<Self> {
        effective_range(self.lower, self.upper, self.inclusive)?;
        Ok(self)
    }

    fn primes(&self) -> Result<&[i64]> {
        let (lo, hi) = effective_range(self.lower, self.upper, self.inclusive)?;
        Ok(self.primes.get_or_init(|| primes_in_range(lo, hi)))
    }
}

impl Primitive for Prime {
    type Value = i64;

    fn draw(&self, rng: &mut Random) -> Result<i64> {
        match self.weight {
            Some(wcnt) => {
                debug!("Generating weighted prime (wcnt={wcnt})");
                rng.weighted_rand_prime(self.lower, self.upper, wcnt, self.inclusive)
            }
            None => {
                debug!("Generating prime");
                rng.rand_prime(self.lower, self.upper, self.inclusive)
            }
        }
    }

    fn format(&self, value: &i64) -> String {
        value.to_string()
    }

    fn rebuild(&self, params: &Params) -> Result<Self> {
        Prime::from_params(params)
    }

    fn cache(&self) -> &Lazy<i64> {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut Lazy<i64> {
        &mut self.cache
    }
}

impl Ranked for Prime {
    fn total_values(&self) -> Result<u128> {
        Ok(self.primes()?.len() as u128)
    }

    fn kth_smallest(&self, k: u128) -> Result<i64> {
        let primes = self.primes()?;
        let total = primes.len() as u128;
        if k < 1 || k > total {
            return Err(TcgenError::RankOutOfRange { k, total });
        }
        Ok(primes[k as usize - 1])
    }
}

impl Arithmetic for Prime {
    fn shift_range(&mut self, op: Op, rhs: i64) -> Result<()> {
        let (lower, upper) = shift_int_bounds(self.lower, self.upper, op, rhs)?;
        self.lower = lower;
        self.upper = upper;
        self.primes = OnceCell::new();
        Ok(())
    }

    fn combine(lhs: &i64, op: Op, rhs: &i64) -> Result<i64> {
        combine_int(*lhs, op, *rhs)
    }

    fn unit() -> i64 {
        1
    }

    fn zero() -> i64 {
        0
    }
}

macro_rules! prime_operator {
    ($($trait:ident :: $method:ident => $op:expr),*) => {
        $(
            impl ops::$trait<i64> for Prime {
                type Output = Result<Derived<Prime>>;

                fn $method(self, rhs: i64) -> Self::Output {
                    self.apply($op, rhs)
                }
            }
        )*
    };
}

prime_operator!(Add::add => Op::Add, Sub::sub => Op::Sub, Mul::mul => Op::Mul, Div::div => Op::Div);
