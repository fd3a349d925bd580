//! Replicate the changes between two commits of one git working tree onto another.

pub mod config;
pub mod logging;
pub mod sync;
pub mod util;
