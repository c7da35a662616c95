//! Cross-module tests for the match pipeline.
//!
//! - **Determinism tests**: the same seed and inputs replay identically,
//!   whichever way the match is paced
//! - **Integration tests**: whole matches through scripts, physics, hazards
//!   and commentary
//! - **Helper functions**: fighter, roster and arena builders shared by the
//!   unit tests of other modules
//!
//! # Test Structure
//!
//! - `determinism.rs`: replay and pacing equivalence
//! - `integration.rs`: end-to-end matches
//! - `helpers.rs`: test setup utilities and factory functions

pub(crate) mod helpers;
mod integration;

#[allow(unused_imports)]
pub use helpers::*;
