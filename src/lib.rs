//! Restaurant Menu CLI Library
//!
//! This module exposes the menu pipeline for use in the binary and in
//! integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod query;
pub mod render;
