//! AVQ Test Modules
//!
//! This module organizes the test suite for the AVQ implementation.

pub mod utils;

mod decoder_tests;
mod frame_tests;
