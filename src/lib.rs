//! # grado
//!
//! Sparse graded multivectors for Clifford algebras of any dimension with
//! a diagonal metric.
//!
//! ```no_run
//! use grado::prelude::*;
//!
//! let alg = Algebra::new(AlgebraConfig::e3ga())?;
//! let a = parse(&alg, "1 + 2*e1^e2")?;
//! let b = parse(&alg, "e3")?;
//! println!("{}", display(&alg, &gp(&alg, &a, &b)));
//! # Ok::<(), grado::GradoError>(())
//! ```

pub use grado_clifford;
pub use grado_core;
pub use grado_text;

pub use grado_clifford::{Algebra, ProductKind, SparseMultivector};
pub use grado_core::{AlgebraConfig, GradoError, ParseError, Result};

/// The types and functions most programs need.
pub mod prelude {
    pub use grado_clifford::ops::{
        add, apply_unit_versor, apply_versor, apply_versor_wi, clifford_conjugate, decrement, dual, equals,
        extract_grade, grade_involution, hp, igp, ihp, increment, is_zero, negate, norm, norm2, reverse, sas,
        subtract, undual, unit, versor_inverse,
    };
    pub use grado_clifford::outermorphism::apply_om;
    pub use grado_clifford::products::{gp, gp_scalar, hip, lc, mhip, op, product, rc, sp};
    pub use grado_clifford::series::{cos, cosh, exp, log, sin, sinh};
    pub use grado_clifford::{Algebra, Outermorphism, ProductKind, SparseMultivector};
    pub use grado_core::{AlgebraConfig, GradoError};
    pub use grado_text::{display, parse, parse_named, to_string, to_string_with, FormatConfig, NumberFormat};
}
