use super::*;
use crate::random::effective_range;
use log::debug;
use std::ops;

/// Bounded integer recipe.
///
/// Booleans are integers pinned to `[0, 1]`; see [`Integer::bool`].
#[derive(Debug, Clone, PartialEq)]
pub struct Integer {
    lower: i64,
    upper: i64,
    inclusive: bool,
    weight: Option<i64>,
    boolean: bool,
    cache: Lazy<i64>,
}

impl Default for Integer {
    fn default() -> Self {
        Integer {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            inclusive: true,
            weight: None,
            boolean: false,
            cache: Lazy::new(),
        }
    }
}

impl Integer {
    /// Integer in `[lower, upper]`.
    pub fn range(lower: impl Into<Number>, upper: impl Into<Number>) -> Result<Self> {
        Integer {
            lower: lower.into().as_i64(),
            upper: upper.into().as_i64(),
            ..Integer::default()
        }
        .validated()
    }

    /// Integer in `[1, upper]`.
    pub fn up_to(upper: impl Into<Number>) -> Result<Self> {
        Integer::range(DEFAULT_LOWER, upper)
    }

    /// Build from declarative parameters.
    pub fn from_params(params: &Params) -> Result<Self> {
        let (lower, upper) = params.bounds(DEFAULT_LOWER.into(), DEFAULT_UPPER.into())?;
        Integer {
            lower: lower.as_i64(),
            upper: upper.as_i64(),
            inclusive: params.inclusive.unwrap_or(true),
            weight: params.weight(),
            boolean: false,
            cache: Lazy::new(),
        }
        .validated()
    }

    /// A `0`/`1` value.
    pub fn bool() -> Self {
        Integer {
            lower: 0,
            upper: 1,
            boolean: true,
            ..Integer::default()
        }
    }

    /// Include both bounds.
    pub fn inclusive(mut self) -> Self {
        self.inclusive = true;
        self
    }

    /// Exclude both bounds.
    pub fn exclusive(mut self) -> Self {
        self.inclusive = false;
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

    /// Whether the bounds themselves can be drawn.
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Weight count, if weighting is on.
    pub fn weight(&self) -> Option<i64> {
        self.weight
    }

    fn validated(self) -> Result<Self> {
        effective_range(self.lower, self.upper, self.inclusive)?;
        Ok(self)
    }
}

impl Primitive for Integer {
    type Value = i64;

    fn draw(&self, rng: &mut Random) -> Result<i64> {
        match self.weight {
            Some(wcnt) => {
                debug!("Generating weighted integer (wcnt={wcnt})");
                rng.weighted_rand_int(self.lower, self.upper, wcnt, self.inclusive)
            }
            None => {
                debug!("Generating integer");
                rng.rand_int(self.lower, self.upper, self.inclusive)
            }
        }
    }

    fn format(&self, value: &i64) -> String {
        value.to_string()
    }

    fn rebuild(&self, params: &Params) -> Result<Self> {
        if !self.boolean {
            return Integer::from_params(params);
        }
        if params.has_bounds() || params.inclusive.is_some() {
            return Err(TcgenError::invalid_argument("booleans have fixed bounds"));
        }
        Ok(Integer {
            weight: params.weight(),
            ..Integer::bool()
        })
    }

    fn cache(&self) -> &Lazy<i64> {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut Lazy<i64> {
        &mut self.cache
    }
}

impl Ranked for Integer {
    fn total_values(&self) -> Result<u128> {
        let (lo, hi) = effective_range(self.lower, self.upper, self.inclusive)?;
        Ok((hi as i128 - lo as i128 + 1) as u128)
    }

    fn kth_smallest(&self, k: u128) -> Result<i64> {
        let total = self.total_values()?;
        if k < 1 || k > total {
            return Err(TcgenError::RankOutOfRange { k, total });
        }
        let (lo, _) = effective_range(self.lower, self.upper, self.inclusive)?;
        Ok((lo as i128 + k as i128 - 1) as i64)
    }
}

impl Arithmetic for Integer {
    fn shift_range(&mut self, op: Op, rhs: i64) -> Result<()> {
        let (lower, upper) = shift_int_bounds(self.lower, self.upper, op, rhs)?;
        self.lower = lower;
        self.upper = upper;
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

macro_rules! integer_operator {
    ($($trait:ident :: $method:ident => $op:expr),*) => {
        $(
            impl ops::$trait<i64> for Integer {
                type Output = Result<Derived<Integer>>;

                fn $method(self, rhs: i64) -> Self::Output {
                    self.apply($op, rhs)
                }
            }
        )*
    };
}

integer_operator!(Add::add => Op::Add, Sub::sub => Op::Sub, Mul::mul => Op::Mul, Div::div => Op::Div);
