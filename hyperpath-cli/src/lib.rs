//! Support library for the `hyperpath` binary.
//!
//! Exposes command execution, report rendering, and logging set-up so tests
//! can drive the pipeline without spawning a subprocess.

pub mod cli;
pub mod logging;
