//! # PlanScale Core Library
//!
//! Spot-weight rescaling for pencil-beam scanning ion treatment plans. Given a plan,
//! the library rescales every scan spot's meterset weight to realize a new dose or
//! an explicit scale factor, optionally modulated per energy layer, suppresses spots
//! that would fall below the deliverable monitor-unit floor, and recomputes the
//! derived beam fields so the plan stays internally consistent.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep concerns separate.
//!
//! - **[`core`]: The Foundation.** Stateless plan models (`IonPlan`, `ControlPoint`)
//!   and I/O for DICOM RT Ion Plans and per-layer weight files.
//!
//! - **[`engine`]: The Logic Core.** Scale factor resolution, layer weight validation,
//!   the control point pass (`SpotRescaler`), summary recomputation and diagnostics.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into a single
//!   all-or-nothing rescale of one plan.

pub mod core;
pub mod engine;
pub mod workflows;
