//! Utility functions for the engine module.
//!
//! This module provides helpers that support the engine's diagnostics, such as
//! the index sampling used by the before/after comparison report.

pub(crate) mod sampling;
