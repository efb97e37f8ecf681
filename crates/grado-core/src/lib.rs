//! # grado-core
//!
//! Foundational types for the grado geometric algebra engine.
//!
//! Provides:
//! - `GradoError` and the crate-wide `Result` alias
//! - Basis blade bitmap arithmetic (grade, reordering sign)
//! - `AlgebraConfig`: dimension, basis vector names, metric and basis ordering

pub mod blade;
pub mod config;
pub mod error;

pub use config::AlgebraConfig;
pub use error::{GradoError, ParseError, ParseErrorKind};

pub type Result<T> = std::result::Result<T, GradoError>;
