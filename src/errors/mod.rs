//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and type checking
//! - The `Diagnostics` collector that gathers every error of a unit
//! - Helpful error messages and suggestions

pub mod errors;
