//! Tracing setup for the image pipeline trigger.
//!
//! Production-like environments emit JSON lines on stdout, where the function runtime collects
//! them, while development environments get pretty console output.

mod tracing;

pub use crate::tracing::*;
