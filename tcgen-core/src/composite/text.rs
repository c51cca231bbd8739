use super::{Array, Count};
use crate::{
    charset,
    error::*,
    primitive::{Char, Params},
    random::Random,
    render::Descriptor,
};

/// A string: an [`Array`] of characters rendered without separators.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    chars: Array<Char>,
}

impl Text {
    /// `count` lowercase letters.
    pub fn new(count: impl Into<Count>) -> Result<Self> {
        Text::with_charset(count, charset::LOWERCASE)
    }

    /// String of `count` symbols drawn from `char_set`.
    pub fn with_charset(count: impl Into<Count>, char_set: &str) -> Result<Self> {
        Ok(Text::of(count, Char::new(char_set)?))
    }

    /// String built from an explicit character recipe.
    pub fn of(count: impl Into<Count>, recipe: Char) -> Self {
        Text {
            chars: Array::of(count, recipe),
        }
    }

    /// Reconfigure the character recipe and drop the generated string.
    pub fn assign(&mut self, params: &Params) -> Result<&mut Self> {
        self.chars.assign(params)?;
        Ok(self)
    }

    /// Character recipe.
    pub fn recipe(&self) -> &Char {
        self.chars.recipe()
    }

    /// The symbols, generating first if needed.
    pub fn chars(&mut self, rng: &mut Random) -> Result<&[char]> {
        self.chars.val(rng)
    }

    /// The string, generating first if needed.
    pub fn val(&mut self, rng: &mut Random) -> Result<String> {
        Ok(self.chars(rng)?.iter().collect())
    }

    /// Generate if needed, then shuffle the symbols in place.
    pub fn shuffle(&mut self, rng: &mut Random) -> Result<&mut Self> {
        self.chars.shuffle(rng)?;
        Ok(self)
    }
}

impl Descriptor for Text {
    fn render(&mut self, rng: &mut Random) -> Result<String> {
        self.val(rng)
    }

    fn is_generated(&self) -> bool {
        self.chars.is_generated()
    }

    fn reset(&mut self) {
        self.chars.reset();
    }
}
