//! Results pipeline for PLC secure-coding checks.
//!
//! An external rule engine evaluates PLC source against the Top 20 secure
//! coding practices and returns loosely shaped JSON. This crate normalizes
//! that output, removes duplicates, orders violations, and derives the
//! compliance summary and violation frequency table.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod exit;
pub mod logging;
pub mod pipeline;
pub mod reporting;
pub mod results;
pub mod source;
pub mod types;
