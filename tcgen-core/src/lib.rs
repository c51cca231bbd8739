//! Core engine for tcgen: constrained random test-case generation.
//!
//! This crate provides the random stream, the lazily generated value
//! descriptors (primitives, sequences, grids and graphs), their canonical
//! rendering, and the sequencer that turns a case generator into many
//! test cases.

pub mod case;
pub mod charset;
pub mod composite;
pub mod data;
pub mod error;
pub mod fenwick;
pub mod lazy;
pub mod prime;
pub mod primitive;
pub mod random;
pub mod render;

// Re-export the main types
pub use case::*;
pub use composite::*;
pub use data::*;
pub use error::*;
pub use lazy::*;
pub use primitive::*;
pub use random::*;
pub use render::*;
