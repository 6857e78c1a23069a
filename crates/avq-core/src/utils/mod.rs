//! Utility functions for the AVQ library
//!
//! G.192 soft-bit framing and input validation helpers.

pub mod g192;
pub mod validation;
