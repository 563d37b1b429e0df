//! Consolidated test utilities and helpers for the Enviromux exporter.
//!
//! This module provides a centralized location for all test utilities, mock implementations,
//! and test data builders used throughout the codebase.

#![cfg(test)]

pub mod builders;
pub mod config;
pub mod fixtures;
pub mod mocks;
