//! Provides input/output functionality for treatment plan records.
//!
//! This module contains the DICOM RT Ion Plan reader/writer behind a small
//! trait-based interface, and the reader for per-energy-layer weight files.

pub mod dicom;
pub mod layer_weights;
pub mod traits;
