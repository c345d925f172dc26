//! # Core Models Module
//!
//! Data structures describing the part of an ion treatment plan that spot-weight
//! rescaling operates on.
//!
//! ## Key Components
//!
//! - [`plan`] - The plan, its referenced beam, the ion beam and its control points
//!
//! Energy layers are not stored explicitly: control points `2k` and `2k + 1` form
//! layer `k` (see [`plan::layer_of`]).

pub mod plan;
