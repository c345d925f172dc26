//! # Engine Module
//!
//! This module implements the spot-weight rescaling engine: the pieces that turn a
//! parsed plan and a rescale request into a consistent, rescaled working copy.
//!
//! ## Overview
//!
//! Rescaling walks a beam's control points strictly in delivery order, because every
//! control point's cumulative meterset weight depends on all of the ones before it.
//! The engine therefore stays single-threaded and synchronous; the submodules split
//! the pass into small, separately testable steps.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - The rescale request: dose target, layer weights, label
//! - **Scale Factor** ([`scale`]) - Resolves an explicit factor or a dose target into one factor
//! - **Layer Weights** ([`layers`]) - Per-energy-layer multipliers and their validation
//! - **Rescaling** ([`rescaler`]) - The control point pass with sub-floor spot suppression
//! - **Summary** ([`summary`]) - Final cumulative weight, beam meterset and beam dose
//! - **Comparison** ([`comparison`]) - Sampled before/after tables for operator inspection
//! - **Progress Monitoring** ([`progress`]) - Caller-owned diagnostics sink
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod comparison;
pub mod config;
pub mod error;
pub mod layers;
pub mod progress;
pub mod rescaler;
pub mod scale;
pub mod summary;
pub(crate) mod utils;
