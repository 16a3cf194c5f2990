//! Library side of the `happiscope` binary: configuration, logging and the pipeline stages.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
