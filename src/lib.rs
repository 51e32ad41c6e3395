//! Seganalyze - statistical comparison of micro-segmentation experiments
//!
//! This library aggregates repeated attack-simulation and network-performance
//! measurements per network configuration, and compares every configuration
//! against a baseline with confidence intervals, effect sizes, statistical
//! power and polarity-aware overhead.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod json_output;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod text_output;
