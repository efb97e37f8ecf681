//! # grado-clifford
//!
//! Sparse graded multivectors for Clifford algebras of any dimension.
//!
//! Provides:
//! - `GradeTable`: group sizes, blade index/bitmap lookup, basis orientation
//! - `StructureConstants`: per-product, per-group-pair bilinear tables
//! - `SparseMultivector`: group usage bitmap plus compact coordinates
//! - The product engine (geometric, outer, scalar, contractions, inner products)
//! - Derived operations: dual, norm, versor inverse, versor application
//! - Series: exp, sinh, cosh, sin, cos, and log of Euclidean rotors
//! - Outermorphisms built from the images of the basis vectors
//! - Random blades and versors

pub mod algebra;
pub mod grade_table;
pub mod groups;
pub mod multivector;
pub mod ops;
pub mod outermorphism;
pub mod products;
pub mod random;
pub mod series;
pub mod structure;

pub use algebra::Algebra;
pub use grade_table::GradeTable;
pub use multivector::SparseMultivector;
pub use outermorphism::Outermorphism;
pub use structure::{PartialProduct, ProductKind, StructureConstants, Term};
