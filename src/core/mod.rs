//! Core functionality for the rating engine
//!
//! This module contains the core business logic and data structures.

pub mod rating; // Tiered pricing resolution and cost composition
pub mod usage; // Usage normalization across provider wire formats
