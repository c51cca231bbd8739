//! Composite descriptors built from a primitive element recipe.
//!
//! A composite owns its recipe and calls [`Primitive::draw`] once per
//! element, so every element is an independent value even though the
//! recipe itself is shared.

use crate::{
    error::*,
    primitive::{Integer, Primitive},
    random::Random,
};
use log::debug;

mod array;
mod graph;
mod grid;
mod ordered;
mod text;

pub use array::{Addend, Array};
pub use graph::{Edge, Graph, GraphOptions, TreeShape};
pub use grid::Grid;
pub use ordered::{NonDecreasing, Permutation, StrictlyIncreasing};
pub use text::Text;

/// Number of elements in a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Count {
    Fixed(usize),
    /// Drawn from the recipe the first time the sequence is generated.
    Drawn(Integer),
}

impl Count {
    fn resolve(&mut self, rng: &mut Random) -> Result<usize> {
        match self {
            Count::Fixed(n) => Ok(*n),
            Count::Drawn(recipe) => {
                let n = recipe.val(rng)?;
                usize::try_from(n).map_err(|_| {
                    TcgenError::invalid_argument(format!("element count {n} is negative"))
                })
            }
        }
    }

    fn reset(&mut self) {
        if let Count::Drawn(recipe) = self {
            recipe.cache_mut().reset();
        }
    }
}

impl From<usize> for Count {
    fn from(n: usize) -> Self {
        Count::Fixed(n)
    }
}

impl From<Integer> for Count {
    fn from(recipe: Integer) -> Self {
        Count::Drawn(recipe)
    }
}

/// `n` independent draws of `recipe`.
fn fill<P: Primitive>(count: &mut Count, recipe: &P, rng: &mut Random) -> Result<Vec<P::Value>> {
    let n = count.resolve(rng)?;
    debug!("Generating {n} elements");
    (0..n).map(|_| recipe.draw(rng)).collect()
}
