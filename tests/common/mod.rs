//! Shared test utilities for artinorm integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Pipelines built here use a fixed clock so syslog year
//! inference is deterministic.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
