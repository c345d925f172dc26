//! # Core Module
//!
//! This module provides the data models and I/O that the rescaling engine is built on.
//!
//! ## Architecture
//!
//! - **Plan Representation** ([`models`]) - Plans, beams, control points and energy layers
//! - **File I/O** ([`io`]) - DICOM RT Ion Plan records and per-layer weight files
//! - **Utilities** ([`utils`]) - Value formatting shared by the writers
//!
//! The models carry only the attributes rescaling reads or writes; everything else in a
//! plan record is preserved by the I/O layer and written back untouched.

pub mod io;
pub mod models;
pub mod utils;
