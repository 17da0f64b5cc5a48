//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `quality` - Quality attributes, normalization and tree aggregation
//! - `analysis` - Requests, reports, preferences/constraints and ranking

pub mod analysis;
pub mod foundation;
pub mod quality;
