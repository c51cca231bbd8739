//! Canonical textual rendering of generated values.

use crate::{error::Result, random::Random};

/// Capability shared by every primitive and composite descriptor.
pub trait Descriptor {
    /// Render the value in its test-case form, generating it first if needed.
    fn render(&mut self, rng: &mut Random) -> Result<String>;

    /// Whether a value is currently cached.
    fn is_generated(&self) -> bool;

    /// Drop the cached value so the next access draws a fresh one.
    fn reset(&mut self);
}

/// Fixed-point rendering with exactly `places` digits after the point.
pub fn fixed(value: f64, places: u32) -> String {
    format!("{:.*}", places as usize, value)
}
