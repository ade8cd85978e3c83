//! Rust emission.
//!
//! A [`Session`] walks the declaration graph starting from the service
//! namespace and renders each declaration into the module of its namespace.
//! Rendering is split by concern:
//! - `declaration` - the fixpoint driver
//! - `namespace` - namespace modules and traversal
//! - `reference` - type references and return type splitting
//! - `model`, `enumeration`, `union`, `interface`, `scalar` - declaration text

mod declaration;
mod documentation;
mod enumeration;
mod interface;
mod model;
mod namespace;
mod reference;
mod scalar;
mod session;
mod union;

#[cfg(test)]
mod interface_tests;

pub use reference::{ReturnSplit, SplitReturn};
pub use session::{DeclarationRef, Session, Synthetic};
