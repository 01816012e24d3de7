//! Configuration management for the image pipeline trigger.
//!
//! Provides environment detection, layered configuration loading from optional YAML files and
//! environment variables, secret handling, and the shared configuration types used by the trigger
//! binary.

mod environment;
mod load;
mod secret;
pub mod shared;

pub use environment::*;
pub use load::*;
pub use secret::*;
