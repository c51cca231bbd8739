//! Drives a case generator across many test cases.
//!
//! Every case gets its own random stream split off the sequencer's base
//! seed, so a fixed [`Config::seed`] reproduces the whole run and cases do
//! not depend on each other's draws.

use crate::{
    data::{Config, Seed},
    error::Result,
    primitive::Primitive,
    random::Random,
    render::Descriptor,
};
use log::debug;

/// Something that writes one test case.
pub trait Case {
    fn generate(&mut self, case_num: usize, out: &mut Output<'_>) -> Result<()>;
}

impl<F> Case for F
where
    F: FnMut(usize, &mut Output<'_>) -> Result<()>,
{
    fn generate(&mut self, case_num: usize, out: &mut Output<'_>) -> Result<()> {
        self(case_num, out)
    }
}

/// Line buffer for one case, together with the case's random stream.
#[derive(Debug)]
pub struct Output<'a> {
    rng: &'a mut Random,
    buffer: String,
}

impl<'a> Output<'a> {
    pub fn new(rng: &'a mut Random) -> Self {
        Output {
            rng,
            buffer: String::new(),
        }
    }

    /// Write the items space-separated on one line.
    pub fn print<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let tokens: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
        self.line(tokens.join(" "));
    }

    /// Append one line of raw text.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.buffer.push_str(text.as_ref());
        self.buffer.push('\n');
    }

    /// Render a descriptor onto its own line, generating it if needed.
    pub fn emit<D: Descriptor + ?Sized>(&mut self, descriptor: &mut D) -> Result<()> {
        let rendered = descriptor.render(&mut *self.rng)?;
        self.line(rendered);
        Ok(())
    }

    /// The memoized value of a primitive.
    pub fn draw<P: Primitive>(&mut self, primitive: &mut P) -> Result<P::Value> {
        primitive.val(&mut *self.rng)
    }

    /// The random stream of the current case.
    pub fn rng(&mut self) -> &mut Random {
        &mut *self.rng
    }

    /// Everything written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Finish the case and take its text.
    pub fn into_string(self) -> String {
        self.buffer
    }
}

/// Runs a [`Case`] once per configured test case.
#[derive(Debug, Clone)]
pub struct Sequencer {
    config: Config,
    seed: Seed,
}

impl Sequencer {
    pub fn new(config: Config) -> Self {
        let seed = config.seed.map(Seed::from_u64).unwrap_or_else(Seed::random);
        Sequencer { config, seed }
    }

    /// Settings this sequencer runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One output per case, numbered `0..cases`.
    pub fn test_cases<C: Case + ?Sized>(&mut self, case: &mut C) -> Result<Vec<String>> {
        (0..self.config.cases)
            .map(|case_num| self.run(case, case_num))
            .collect()
    }

    /// A single case numbered 1.
    pub fn test_case<C: Case + ?Sized>(&mut self, case: &mut C) -> Result<String> {
        self.run(case, 1)
    }

    fn run<C: Case + ?Sized>(&mut self, case: &mut C, case_num: usize) -> Result<String> {
        let (case_seed, next) = self.seed.split();
        self.seed = next;
        debug!("Generating case {case_num} from {case_seed}");

        let mut rng = Random::from_seed(case_seed);
        let mut out = Output::new(&mut rng);
        case.generate(case_num, &mut out)?;
        Ok(out.into_string())
    }
}
