//! # caseflow
//!
//! Library half of the `caseflow` binary, exposed for integration tests.

pub mod cli;
pub mod config;
