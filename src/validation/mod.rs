//! Field and predicate validators
//!
//! Validators compute the full list of unknown names before failing, so a
//! single call reports every problem in the rule definitions.

pub mod aggregate;
pub mod fields;
pub mod predicates;


pub use aggregate::*;
pub use fields::*;
pub use predicates::*;
