//! Clients able to start image pipeline executions.
//!
//! Provides the [`ImagePipelineClient`] trait, the AWS EC2 Image Builder implementation and an
//! in-memory implementation used for dry runs and tests.

mod base;
pub mod imagebuilder;
pub mod memory;

pub use base::ImagePipelineClient;
