//! Deferred, memoized generation shared by every descriptor.

use crate::error::Result;

/// Generation state of a descriptor: either not generated yet, or holding
/// the generated value.
///
/// Every public accessor of a descriptor funnels through
/// [`Lazy::get_or_try_init`], so a value is produced at most once until
/// [`Lazy::reset`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Lazy<T> {
    value: Option<T>,
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Lazy::new()
    }
}

impl<T> Lazy<T> {
    /// A cell with nothing generated.
    pub const fn new() -> Self {
        Lazy { value: None }
    }

    /// The cached value, if any.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Mutable access to the cached value, if any.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Whether a value is cached.
    pub fn is_generated(&self) -> bool {
        self.value.is_some()
    }

    /// Store a value directly, bypassing generation.
    pub fn set(&mut self, value: T) -> &mut T {
        self.value.insert(value)
    }

    /// Forget the cached value so the next access generates again.
    pub fn reset(&mut self) {
        self.value = None;
    }

    /// Return the cached value, running `init` first if nothing is cached.
    ///
    /// A failing `init` leaves the cell ungenerated.
    pub fn get_or_try_init<F>(&mut self, init: F) -> Result<&mut T>
    where
        F: FnOnce() -> Result<T>,
    {
        match &mut self.value {
            Some(value) => Ok(value),
            slot => Ok(slot.insert(init()?)),
        }
    }
}
