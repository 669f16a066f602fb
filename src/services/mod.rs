//! Services module
//!
//! This module contains business logic and service implementations

pub mod registry;

pub use registry::PricingRegistry;
