//! Validation for request inputs.
//!
//! This module provides the rules shared by the HTTP layer and the
//! typed identifiers.

pub mod rules;

pub use validator::Validate;
