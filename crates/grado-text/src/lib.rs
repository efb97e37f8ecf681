//! # grado-text
//!
//! Text notation for sparse multivectors, e.g. `1.5 + 2*e1^e2 - e3`.
//!
//! - `lexer`: byte tokenizer with 1-based line/column positions
//! - `parser`: `parse` / `parse_named` into a `SparseMultivector`
//! - `printer`: `to_string_with` / `to_string` and a `Display` adapter
//! - `format`: `FormatConfig`, printf-style `NumberFormat`, process-wide default

pub mod format;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use format::{default_format, reset_default_format, set_default_format, FormatConfig, NumberFormat};
pub use parser::{parse, parse_named};
pub use printer::{display, to_string, to_string_with, MultivectorDisplay};
