use super::*;
use log::{debug, warn};

/// Random character recipe over a fixed alphabet.
///
/// `priority[i]` is the preference rank of the `i`-th symbol. It only
/// matters when weighted: a positive `wcnt` favours rank 1, a negative one
/// favours the last rank. Characters have no bounds, so they are neither
/// ranked nor arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct Char {
    alphabet: Vec<char>,
    priority: Vec<usize>,
    weight: Option<i64>,
    cache: Lazy<char>,
}

impl Char {
    /// Uniform character from `char_set`.
    pub fn new(char_set: &str) -> Result<Self> {
        let alphabet: Vec<char> = char_set.chars().collect();
        if alphabet.is_empty() {
            return Err(TcgenError::invalid_argument("character set must not be empty"));
        }
        if alphabet.len() == 1 {
            warn!("Character set {char_set:?} has a single symbol");
        }
        let priority = (1..=alphabet.len()).collect();
        Ok(Char {
            alphabet,
            priority,
            weight: None,
            cache: Lazy::new(),
        })
    }

    /// Build from declarative parameters; `char_set` is required.
    pub fn from_params(params: &Params) -> Result<Self> {
        let char_set = params
            .char_set
            .as_deref()
            .ok_or_else(|| TcgenError::invalid_argument("a character set is required"))?;
        Char::new(char_set)?.configured(params)
    }

    /// Set the preference order; must be a permutation of `1..=len`.
    pub fn with_priority(mut self, priority: Vec<usize>) -> Result<Self> {
        let mut sorted = priority.clone();
        sorted.sort_unstable();
        if !sorted.iter().copied().eq(1..=self.alphabet.len()) {
            return Err(TcgenError::invalid_argument(format!(
                "priority must be a permutation of 1..={}",
                self.alphabet.len()
            )));
        }
        self.priority = priority;
        Ok(self)
    }

    /// Favour low priority ranks with the default count.
    pub fn weighted(self) -> Self {
        self.with_wcnt(DEFAULT_WCNT)
    }

    /// Weighted choice with an explicit count.
    pub fn with_wcnt(mut self, wcnt: i64) -> Self {
        self.weight = Some(wcnt);
        self
    }

    /// Symbols in declaration order.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Preference rank of each symbol.
    pub fn priority(&self) -> &[usize] {
        &self.priority
    }

    fn configured(mut self, params: &Params) -> Result<Self> {
        if params.inclusive.is_some() {
            return Err(TcgenError::invalid_argument(
                "inclusive/exclusive bounds do not apply to characters",
            ));
        }
        if params.has_bounds() || params.places.is_some() {
            return Err(TcgenError::invalid_argument("characters take no numeric bounds"));
        }
        self.weight = params.weight();
        if let Some(priority) = &params.priority {
            if self.weight.is_none() {
                warn!("Priority given for an unweighted character, it has no effect");
            }
            self = self.with_priority(priority.clone())?;
        }
        Ok(self)
    }
}

impl Primitive for Char {
    type Value = char;

    fn draw(&self, rng: &mut Random) -> Result<char> {
        match self.weight {
            Some(wcnt) => {
                debug!("Generating weighted character (wcnt={wcnt})");
                rng.weighted_choice(&self.alphabet, &self.priority, wcnt)
            }
            None => {
                debug!("Generating character");
                rng.choice(&self.alphabet)
            }
        }
    }

    fn format(&self, value: &char) -> String {
        value.to_string()
    }

    /// Keeps the alphabet unless `params` names a new one.
    fn rebuild(&self, params: &Params) -> Result<Self> {
        let base = match &params.char_set {
            Some(char_set) => Char::new(char_set)?,
            None => Char {
                priority: (1..=self.alphabet.len()).collect(),
                weight: None,
                cache: Lazy::new(),
                alphabet: self.alphabet.clone(),
            },
        };
        base.configured(params)
    }

    fn cache(&self) -> &Lazy<char> {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut Lazy<char> {
        &mut self.cache
    }
}
