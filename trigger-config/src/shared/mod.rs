mod base;
mod client;
mod pipeline;
mod sentry;
mod trigger;

pub use base::*;
pub use client::*;
pub use pipeline::*;
pub use sentry::*;
pub use trigger::*;
