use super::{fill, Count};
use crate::{
    error::*,
    lazy::Lazy,
    primitive::{Arithmetic, Integer, Op, Params, Primitive},
    random::Random,
    render::Descriptor,
};

/// Fixed or drawn-length sequence of independent draws from one recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Array<P: Primitive = Integer> {
    pub(super) count: Count,
    pub(super) recipe: P,
    pub(super) cache: Lazy<Vec<P::Value>>,
}

/// Right-hand side of [`Array::add`].
#[derive(Debug)]
pub enum Addend<'a, P: Primitive> {
    /// The same scalar for every element.
    Constant(P::Value),
    /// A fresh draw of the recipe per element.
    Recipe(&'a mut P),
}

impl Array<Integer> {
    /// `count` integers with the default bounds.
    pub fn new(count: impl Into<Count>) -> Self {
        Array::of(count, Integer::default())
    }
}

impl<P: Primitive> Array<P> {
    pub fn of(count: impl Into<Count>, recipe: P) -> Self {
        Array {
            count: count.into(),
            recipe,
            cache: Lazy::new(),
        }
    }

    /// Rebuild the element recipe from `params`; empty params keep it as is.
    pub fn with_params(mut self, params: &Params) -> Result<Self> {
        if !params.is_empty() {
            self.recipe = self.recipe.rebuild(params)?;
        }
        Ok(self)
    }

    /// Reconfigure the element recipe and drop the generated values.
    pub fn assign(&mut self, params: &Params) -> Result<&mut Self> {
        self.recipe = self.recipe.rebuild(params)?;
        self.cache.reset();
        Ok(self)
    }

    /// Element recipe.
    pub fn recipe(&self) -> &P {
        &self.recipe
    }

    /// Length, fixed or drawn.
    pub fn count(&self) -> &Count {
        &self.count
    }

    /// The generated elements.
    pub fn val(&mut self, rng: &mut Random) -> Result<&[P::Value]> {
        Ok(self.values(rng)?.as_slice())
    }

    /// Iterate the elements from the start, generating first if needed.
    pub fn iter(&mut self, rng: &mut Random) -> Result<std::slice::Iter<'_, P::Value>> {
        Ok(self.val(rng)?.iter())
    }

    /// Element at `index`, generating first if needed.
    pub fn get(&mut self, rng: &mut Random, index: usize) -> Result<Option<&P::Value>> {
        Ok(self.val(rng)?.get(index))
    }

    /// Generate if needed, then shuffle the elements in place.
    pub fn shuffle(&mut self, rng: &mut Random) -> Result<&mut Self> {
        let values = self.values(rng)?;
        rng.shuffle(values.as_mut_slice());
        Ok(self)
    }

    pub(super) fn values(&mut self, rng: &mut Random) -> Result<&mut Vec<P::Value>> {
        let Array {
            count,
            recipe,
            cache,
        } = self;
        cache.get_or_try_init(|| fill(count, recipe, rng))
    }
}

impl<P: Arithmetic> Array<P> {
    /// Elementwise addition.
    ///
    /// Generated arrays add the constant, or an independent draw of the
    /// recipe, to every element. Ungenerated arrays shift the element
    /// recipe's range by the constant or by the recipe's own value.
    pub fn add(&mut self, addend: Addend<'_, P>, rng: &mut Random) -> Result<&mut Self> {
        match (self.cache.get_mut(), addend) {
            (Some(values), Addend::Constant(rhs)) => {
                for value in values.iter_mut() {
                    *value = P::combine(value, Op::Add, &rhs)?;
                }
            }
            (Some(values), Addend::Recipe(recipe)) => {
                for value in values.iter_mut() {
                    let rhs = recipe.draw(rng)?;
                    *value = P::combine(value, Op::Add, &rhs)?;
                }
            }
            (None, Addend::Constant(rhs)) => self.recipe.shift_range(Op::Add, rhs)?,
            (None, Addend::Recipe(recipe)) => {
                let rhs = recipe.val(rng)?;
                self.recipe.shift_range(Op::Add, rhs)?;
            }
        }
        Ok(self)
    }
}

impl<P: Primitive> Descriptor for Array<P> {
    fn render(&mut self, rng: &mut Random) -> Result<String> {
        let Array {
            count,
            recipe,
            cache,
        } = self;
        let values = cache.get_or_try_init(|| fill(count, recipe, rng))?;
        let tokens: Vec<String> = values.iter().map(|value| recipe.format(value)).collect();
        Ok(tokens.join(" "))
    }

    fn is_generated(&self) -> bool {
        self.cache.is_generated()
    }

    fn reset(&mut self) {
        self.count.reset();
        self.cache.reset();
    }
}
