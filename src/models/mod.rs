//! Core data models for Hexlens

pub mod metrics;
pub mod repository;
pub mod results;

pub use metrics::*;
pub use repository::*;
pub use results::*;
