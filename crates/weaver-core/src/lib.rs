//! Core building blocks for weaver.
//!
//! Target-agnostic pieces shared by the compiler:
//! - `naming` - identifier decomposition and case conventions
//! - `worklist` - deduplicating FIFO used to drive fixpoint loops
//! - `path` - module path algebra (relative references between modules)

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod naming;
pub mod path;
pub mod worklist;

#[cfg(test)]
mod naming_tests;

pub use naming::{Case, Convention};
pub use path::{ItemPath, PathCursor, PathError};
pub use worklist::Worklist;
