//! Collection types used across Vulpes.
//!
//! - AHash-backed hash collections
//! - [`sparse_set::SparseSet`], the generational arena behind the control tree

pub mod sparse_set;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
