//! Library surface of the census CLI.
//!
//! The binary adds argument parsing and terminal summaries on top; the
//! pieces here are the ones integration tests drive directly.

pub mod export;
pub mod logging;
pub mod pipeline;
