//! tcgen: constrained random test-case generation.
//!
//! This is the main entry point for the tcgen library. Describe the shape
//! of a test input with lazily generated descriptors, then render them
//! case by case through a [`Sequencer`].
//!
//! ```
//! use tcgen::*;
//!
//! let mut rng = Random::from_u64(7);
//! let mut n = Integer::up_to(10)?;
//! let mut edges = Graph::tree(5)?.with_weight(Integer::up_to(100)?);
//!
//! assert!((1..=10).contains(&n.val(&mut rng)?));
//! assert_eq!(edges.render(&mut rng)?.lines().count(), 4);
//! # Ok::<(), TcgenError>(())
//! ```

pub use tcgen_core::*;

// Re-export derive macros when available
#[cfg(feature = "derive")]
pub use tcgen_derive::*;
