//! Edge case tests for sortcp
//!
//! This module contains tests for unusual names, symlinks, depth limits and
//! metadata preservation.

#[path = "../common/mod.rs"]
mod common;

#[path = "edge_cases/classification.rs"]
mod classification;
