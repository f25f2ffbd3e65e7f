//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims adjudication test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built principals, evidence, and premium terms
//! - `builders`: A desk builder wired to an in-memory premium pool
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
