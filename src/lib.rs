//! ⬡ Hexlens - Hexagonal quality radar for multi-tool code quality results
//!
//! Hexlens reads the output of a quality-lens run and scores every package
//! on six metrics, ranks it into a quality tier and draws it as a hexagon.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod grouping;
pub mod input;
pub mod models;
pub mod output;
pub mod radar;
pub mod scoring;
