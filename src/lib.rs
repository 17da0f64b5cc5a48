//! Repo Quality - Concurrent repository ingestion and quality-based ranking
//!
//! This crate clones batches of repositories, measures them with an external
//! static-analysis tool, normalizes the measurements into a fixed quality
//! tree, and ranks the results against caller preferences and constraints.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
