//! # Workflows Module
//!
//! High-level entry points that run a complete rescale of one plan.
//!
//! ## Overview
//!
//! A workflow validates the request against the original plan, clones it into a
//! working copy, runs the control point pass and recomputes the derived beam fields.
//! Nothing is modified until validation succeeds, and the original plan is never
//! modified at all, so callers can compare before and after and write the result
//! only once everything has succeeded.
//!
//! - **Rescale Workflow** ([`rescale`]) - Spot-weight rescaling of a single-beam plan

pub mod rescale;
