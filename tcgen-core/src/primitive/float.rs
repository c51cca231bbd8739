use super::*;
use crate::random::{scale, scaled_range};
use crate::render::fixed;
use log::debug;
use std::ops;

/// Fixed-precision float recipe.
///
/// Values live on the grid `10^-places`; both sampling and rank queries
/// work on the bounds scaled to integers.
#[derive(Debug, Clone, PartialEq)]
pub struct Float {
    lower: f64,
    upper: f64,
    places: u32,
    inclusive: bool,
    weight: Option<i64>,
    cache: Lazy<f64>,
}

impl Default for Float {
    fn default() -> Self {
        Float {
            lower: DEFAULT_LOWER as f64,
            upper: DEFAULT_UPPER as f64,
            places: DEFAULT_PLACES,
            inclusive: true,
            weight: None,
            cache: Lazy::new(),
        }
    }
}

impl Float {
    /// Float in `[lower, upper]` with the default precision.
    pub fn range(lower: impl Into<Number>, upper: impl Into<Number>) -> Result<Self> {
        Float {
            lower: lower.into().as_f64(),
            upper: upper.into().as_f64(),
            ..Float::default()
        }
        .validated()
    }

    /// Float in `[1, upper]`.
    pub fn up_to(upper: impl Into<Number>) -> Result<Self> {
        Float::range(DEFAULT_LOWER, upper)
    }

    /// Build from declarative parameters.
    pub fn from_params(params: &Params) -> Result<Self> {
        let (lower, upper) = params.bounds(DEFAULT_LOWER.into(), DEFAULT_UPPER.into())?;
        Float {
            lower: lower.as_f64(),
            upper: upper.as_f64(),
            places: params.places.unwrap_or(DEFAULT_PLACES),
            inclusive: params.inclusive.unwrap_or(true),
            weight: params.weight(),
            cache: Lazy::new(),
        }
        .validated()
    }

    /// Change the number of decimal places.
    ///
    /// Fails when a bound no longer fits in an `i64` once scaled by `10^places`.
    pub fn with_places(mut self, places: u32) -> Result<Self> {
        self.places = places;
        self.validated()
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
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound as configured.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Digits after the decimal point.
    pub fn places(&self) -> u32 {
        self.places
    }

    fn validated(self) -> Result<Self> {
        scaled_range(self.lower, self.upper, self.places, self.inclusive)?;
        Ok(self)
    }
}

impl Primitive for Float {
    type Value = f64;

    fn draw(&self, rng: &mut Random) -> Result<f64> {
        match self.weight {
            Some(wcnt) => {
                debug!("Generating weighted float (wcnt={wcnt})");
                rng.weighted_rand_float(self.lower, self.upper, self.places, wcnt, self.inclusive)
            }
            None => {
                debug!("Generating float");
                rng.rand_float(self.lower, self.upper, self.places, self.inclusive)
            }
        }
    }

    fn format(&self, value: &f64) -> String {
        fixed(*value, self.places)
    }

    fn rebuild(&self, params: &Params) -> Result<Self> {
        Float::from_params(params)
    }

    fn cache(&self) -> &Lazy<f64> {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut Lazy<f64> {
        &mut self.cache
    }
}

impl Ranked for Float {
    fn total_values(&self) -> Result<u128> {
        let (lo, hi) = scaled_range(self.lower, self.upper, self.places, self.inclusive)?;
        Ok((hi as i128 - lo as i128 + 1) as u128)
    }

    fn kth_smallest(&self, k: u128) -> Result<f64> {
        let total = self.total_values()?;
        if k < 1 || k > total {
            return Err(TcgenError::RankOutOfRange { k, total });
        }
        let (lo, _) = scaled_range(self.lower, self.upper, self.places, self.inclusive)?;
        Ok((lo as i128 + k as i128 - 1) as f64 / scale(self.places))
    }
}

impl Arithmetic for Float {
    fn shift_range(&mut self, op: Op, rhs: f64) -> Result<()> {
        let a = Self::combine(&self.lower, op, &rhs)?;
        let b = Self::combine(&self.upper, op, &rhs)?;
        scaled_range(a.min(b), a.max(b), self.places, self.inclusive)?;
        self.lower = a.min(b);
        self.upper = a.max(b);
        Ok(())
    }

    fn combine(lhs: &f64, op: Op, rhs: &f64) -> Result<f64> {
        Ok(match op {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div if *rhs == 0.0 => return Err(TcgenError::invalid_argument("division by zero")),
            Op::Div => lhs / rhs,
        })
    }

    fn unit() -> f64 {
        1.0
    }

    fn zero() -> f64 {
        0.0
    }
}

macro_rules! float_operator {
    ($($trait:ident :: $method:ident => $op:expr),*) => {
        $(
            impl ops::$trait<f64> for Float {
                type Output = Result<Derived<Float>>;

                fn $method(self, rhs: f64) -> Self::Output {
                    self.apply($op, rhs)
                }
            }
        )*
    };
}

float_operator!(Add::add => Op::Add, Sub::sub => Op::Sub, Mul::mul => Op::Mul, Div::div => Op::Div);
