//! Printer for the multivector text notation.
//!
//! Coordinates are written against canonically ordered basis blades
//! (`e1^e3`, never `e3^e1`), so stored orientation signs are folded into
//! the printed values. Terms whose formatted magnitude reads back as zero
//! are skipped.
//!
//! Non-finite coordinates print as `NaN` or `inf`; the parser does not
//! read them back. NaN takes the minus separator.

use std::fmt;

use grado_clifford::{Algebra, SparseMultivector};
use grado_core::blade;

use crate::format::{self, FormatConfig};

/// Print `mv` with an explicit format.
pub fn to_string_with(alg: &Algebra, mv: &SparseMultivector, config: &FormatConfig) -> String {
    let grades = alg.grades();
    let mut out = String::new();
    out.push_str(&config.start);

    let mut printed = 0;
    let mut offset = 0;
    for g in 0..grades.num_groups {
        if !mv.has_group(g) {
            continue;
        }
        let start = grades.dense_start(g);
        let size = grades.group_size(g);
        for (k, &c) in mv.coordinates()[offset..offset + size].iter().enumerate() {
            let idx = start + k;
            let value = grades.basis_sign(idx) * c;
            let magnitude = config.number.format(value.abs());
            if magnitude.parse::<f64>().map_or(false, |m| m == 0.0) {
                continue;
            }

            if value >= 0.0 {
                if printed > 0 {
                    out.push_str(&config.plus);
                }
            } else {
                out.push_str(&config.minus);
            }
            out.push_str(&magnitude);

            if g > 0 {
                out.push_str(&config.mul);
                let names: Vec<&str> = blade::vectors_of(grades.basis_blade(idx))
                    .into_iter()
                    .map(|v| alg.vector_name(v))
                    .collect();
                out.push_str(&names.join(config.wedge.as_str()));
            }
            printed += 1;
        }
        offset += size;
    }

    if printed == 0 {
        out.push('0');
    }
    out.push_str(&config.end);
    out
}

/// Print `mv` with the process-wide default format.
pub fn to_string(alg: &Algebra, mv: &SparseMultivector) -> String {
    to_string_with(alg, mv, &format::default_format())
}

/// `Display` adapter pairing a multivector with its algebra.
pub struct MultivectorDisplay<'a> {
    alg: &'a Algebra,
    mv: &'a SparseMultivector,
    format: Option<&'a FormatConfig>,
}

impl<'a> MultivectorDisplay<'a> {
    /// Use `format` instead of the process-wide default.
    pub fn with_format(mut self, format: &'a FormatConfig) -> Self {
        self.format = Some(format);
        self
    }
}

impl fmt::Display for MultivectorDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self.format {
            Some(config) => to_string_with(self.alg, self.mv, config),
            None => to_string(self.alg, self.mv),
        };
        f.write_str(&text)
    }
}

/// Wrap `mv` for use with `format!` and friends.
pub fn display<'a>(alg: &'a Algebra, mv: &'a SparseMultivector) -> MultivectorDisplay<'a> {
    MultivectorDisplay { alg, mv, format: None }
}
