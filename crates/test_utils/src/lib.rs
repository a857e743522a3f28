//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims desk test suite.
//!
//! # Modules
//!
//! - `memory`: In-memory backend implementing every domain port
//! - `fixtures`: Pre-built catalog and account data
//! - `builders`: Builder patterns for policies, claims and accounts
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod memory;
pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use memory::*;
pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
