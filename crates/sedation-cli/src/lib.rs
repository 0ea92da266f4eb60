//! Library side of the `sevo-dataset` binary.

pub mod logging;
pub mod pipeline;
