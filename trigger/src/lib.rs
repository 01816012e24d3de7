//! Starts executions of an image pipeline.
//!
//! The [`handler::PipelineTrigger`] resolves the configured pipeline, asks an
//! [`clients::ImagePipelineClient`] to start one execution and turns the outcome into a
//! [`response::HandlerResponse`].

pub mod clients;
pub mod error;
pub mod handler;
mod macros;
pub mod response;
pub mod types;
