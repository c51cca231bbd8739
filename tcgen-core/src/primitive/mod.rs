//! Primitive value descriptors: bounded scalars generated lazily.
//!
//! A primitive is a recipe (bounds, inclusivity, weighting) plus a cache.
//! [`Primitive::draw`] produces a fresh value from the recipe without
//! touching the cache, which is how composites reuse one recipe for many
//! independent elements. [`Primitive::val`] is the memoized accessor.

use crate::{error::*, lazy::Lazy, random::Random, random::DEFAULT_WCNT, render::Descriptor};
use std::fmt;

mod character;
mod float;
mod integer;
mod prime;

pub use character::Char;
pub use float::Float;
pub use integer::Integer;
pub use prime::Prime;

/// Default lower bound for numeric primitives.
pub const DEFAULT_LOWER: i64 = 1;
/// Default upper bound for numeric primitives.
pub const DEFAULT_UPPER: i64 = 100_000;
/// Default number of decimal places for floats.
pub const DEFAULT_PLACES: u32 = 2;

/// A scalar recipe that can be drawn from repeatedly.
pub trait Primitive: Clone + fmt::Debug {
    type Value: Clone + PartialOrd + fmt::Debug;

    /// Draw a fresh value from the recipe. The cache is left untouched.
    fn draw(&self, rng: &mut Random) -> Result<Self::Value>;

    /// Render a value produced by this recipe.
    fn format(&self, value: &Self::Value) -> String;

    /// Build a new recipe of the same kind from defaults and `params`.
    fn rebuild(&self, params: &Params) -> Result<Self>;

    fn cache(&self) -> &Lazy<Self::Value>;

    fn cache_mut(&mut self) -> &mut Lazy<Self::Value>;

    /// The memoized value, generated on first access.
    fn val(&mut self, rng: &mut Random) -> Result<Self::Value> {
        if let Some(value) = self.cache().get() {
            return Ok(value.clone());
        }
        let value = self.draw(rng)?;
        Ok(self.cache_mut().set(value).clone())
    }

    /// The cached value without generating.
    fn cached(&self) -> Option<&Self::Value> {
        self.cache().get()
    }
}

/// Primitives whose possible values can be counted and indexed in order.
pub trait Ranked: Primitive {
    /// Number of distinct values the recipe can produce.
    fn total_values(&self) -> Result<u128>;

    /// The `k`-th smallest producible value, 1-indexed.
    fn kth_smallest(&self, k: u128) -> Result<Self::Value>;
}

/// Arithmetic operators understood by [`Arithmetic::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

/// Result of applying arithmetic to a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Derived<P: Primitive> {
    /// The recipe was ungenerated, so its range was transformed instead.
    Recipe(P),
    /// The recipe was generated; this is the plain combined scalar.
    Value(P::Value),
}

/// Primitives that support `+ - * /` with a scalar.
pub trait Arithmetic: Primitive {
    /// Transform the bounds of an ungenerated recipe.
    fn shift_range(&mut self, op: Op, rhs: Self::Value) -> Result<()>;

    /// Combine two values of this primitive.
    fn combine(lhs: &Self::Value, op: Op, rhs: &Self::Value) -> Result<Self::Value>;

    /// Multiplicative identity, used as the weight of unweighted edges.
    fn unit() -> Self::Value;

    /// Additive identity.
    fn zero() -> Self::Value;

    /// Range arithmetic before generation, value arithmetic after.
    fn apply(mut self, op: Op, rhs: Self::Value) -> Result<Derived<Self>> {
        if let Some(value) = self.cached() {
            return Ok(Derived::Value(Self::combine(value, op, &rhs)?));
        }
        self.shift_range(op, rhs)?;
        Ok(Derived::Recipe(self))
    }
}

/// A bound as written by the caller: integral or floating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Truncating conversion to an integer bound.
    pub fn as_i64(self) -> i64 {
        match self {
            Number::Int(value) => value,
            Number::Float(value) => value as i64,
        }
    }

    /// Conversion to a floating bound.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Int(value as i64)
                }
            }
        )*
    };
}

number_from_int!(i32, i64, u32, usize);

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Declarative construction parameters for rebuilding a recipe.
///
/// Bounds come either positionally (`args`: `[U]` or `[L, U]`) or by name
/// (`lower`, `upper`), never both. Anything left unset falls back to the
/// primitive's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pub args: Vec<Number>,
    pub lower: Option<Number>,
    pub upper: Option<Number>,
    pub inclusive: Option<bool>,
    pub weighted: bool,
    pub wcnt: Option<i64>,
    pub places: Option<u32>,
    pub char_set: Option<String>,
    pub priority: Option<Vec<usize>>,
}

impl Params {
    /// Parameters with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional bound.
    pub fn arg(mut self, value: impl Into<Number>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Name the lower bound.
    pub fn lower(mut self, value: impl Into<Number>) -> Self {
        self.lower = Some(value.into());
        self
    }

    /// Name the upper bound.
    pub fn upper(mut self, value: impl Into<Number>) -> Self {
        self.upper = Some(value.into());
        self
    }

    /// Whether the bounds themselves can be drawn.
    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = Some(inclusive);
        self
    }

    /// Enable weighting with the default count.
    pub fn weighted(mut self) -> Self {
        self.weighted = true;
        self
    }

    /// Enable weighting with an explicit count.
    pub fn wcnt(mut self, wcnt: i64) -> Self {
        self.weighted = true;
        self.wcnt = Some(wcnt);
        self
    }

    /// Decimal places for floats.
    pub fn places(mut self, places: u32) -> Self {
        self.places = Some(places);
        self
    }

    /// Alphabet for characters.
    pub fn char_set(mut self, char_set: &str) -> Self {
        self.char_set = Some(char_set.to_string());
        self
    }

    /// Preference rank of each alphabet symbol.
    pub fn priority(mut self, priority: Vec<usize>) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether nothing at all was supplied.
    pub fn is_empty(&self) -> bool {
        *self == Params::default()
    }

    pub(crate) fn has_bounds(&self) -> bool {
        !self.args.is_empty() || self.lower.is_some() || self.upper.is_some()
    }

    /// Resolve `(lower, upper)` from positional or named bounds.
    pub(crate) fn bounds(&self, default_lower: Number, default_upper: Number) -> Result<(Number, Number)> {
        let named = self.lower.is_some() || self.upper.is_some();
        match self.args.as_slice() {
            [] => Ok((
                self.lower.unwrap_or(default_lower),
                self.upper.unwrap_or(default_upper),
            )),
            _ if named => Err(TcgenError::invalid_argument(
                "bounds must be given positionally or by name, not both",
            )),
            [upper] => Ok((default_lower, *upper)),
            [lower, upper] => Ok((*lower, *upper)),
            args => Err(TcgenError::invalid_argument(format!(
                "expected at most 2 positional bounds, got {}",
                args.len()
            ))),
        }
    }

    /// Weight count when weighting is enabled.
    pub(crate) fn weight(&self) -> Option<i64> {
        match (self.weighted, self.wcnt) {
            (_, Some(wcnt)) => Some(wcnt),
            (true, None) => Some(DEFAULT_WCNT),
            (false, None) => None,
        }
    }
}

macro_rules! primitive_descriptor {
    ($($ty:ty),*) => {
        $(
            impl Descriptor for $ty {
                fn render(&mut self, rng: &mut Random) -> Result<String> {
                    let value = self.val(rng)?;
                    Ok(self.format(&value))
                }

                fn is_generated(&self) -> bool {
                    self.cache().is_generated()
                }

                fn reset(&mut self) {
                    self.cache_mut().reset();
                }
            }
        )*
    };
}

primitive_descriptor!(Integer, Float, Prime, Char);

/// Checked integer arithmetic shared by the integral primitives.
pub(crate) fn combine_int(lhs: i64, op: Op, rhs: i64) -> Result<i64> {
    let result = match op {
        Op::Add => lhs.checked_add(rhs),
        Op::Sub => lhs.checked_sub(rhs),
        Op::Mul => lhs.checked_mul(rhs),
        Op::Div if rhs == 0 => return Err(TcgenError::invalid_argument("division by zero")),
        Op::Div => lhs.checked_div(rhs),
    };
    result.ok_or_else(|| TcgenError::invalid_argument(format!("{lhs} {op:?} {rhs} overflows")))
}

/// Apply `op` to both ends of a range, keeping `lower <= upper`.
pub(crate) fn shift_int_bounds(lower: i64, upper: i64, op: Op, rhs: i64) -> Result<(i64, i64)> {
    let a = combine_int(lower, op, rhs)?;
    let b = combine_int(upper, op, rhs)?;
    Ok((a.min(b), a.max(b)))
}
