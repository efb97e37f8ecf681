//! A Clifford algebra with a diagonal metric.
//!
//! Owns the configuration, the grade table and the lazily built structure
//! constants. Everything here is immutable after construction, so one
//! `Algebra` can be shared between threads by reference.

use std::sync::OnceLock;

use tracing::debug;

use grado_core::blade;
use grado_core::{AlgebraConfig, GradoError, Result};

use crate::grade_table::GradeTable;
use crate::structure::{ProductKind, StructureConstants};

/// Dual and undual maps: for every dense blade index, the dense index of
/// its image and the coefficient.
#[derive(Debug, Clone)]
pub struct DualTable {
    pub dual: Vec<(usize, f64)>,
    pub undual: Vec<(usize, f64)>,
}

/// A Clifford algebra Cl(n) with diagonal metric and configurable basis.
#[derive(Debug)]
pub struct Algebra {
    config: AlgebraConfig,
    grades: GradeTable,
    metric: Vec<f64>,
    tables: [OnceLock<StructureConstants>; ProductKind::COUNT],
    duals: OnceLock<DualTable>,
}

impl Algebra {
    /// Validate `config` and build the grade table. Structure constants are
    /// built on first use.
    pub fn new(config: AlgebraConfig) -> Result<Self> {
        config.validate()?;
        let order = config.basis_order()?;
        let n = config.dimension();
        let grades = GradeTable::new(n, &order);
        let metric = config.metric_diagonal();

        debug!(name = %config.name, dimension = n, blades = grades.dense_size(), "algebra created");

        Ok(Self {
            config,
            grades,
            metric,
            tables: std::array::from_fn(|_| OnceLock::new()),
            duals: OnceLock::new(),
        })
    }

    /// Euclidean algebra with basis vectors `e1 .. en`.
    pub fn euclidean(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(GradoError::InvalidAlgebra(
                "dimension must be at least 1".into(),
            ));
        }
        let names: Vec<String> = (1..=n).map(|i| format!("e{i}")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        Self::new(AlgebraConfig::new(&format!("e{n}ga"), &refs))
    }

    pub fn config(&self) -> &AlgebraConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Number of basis vectors.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.grades.n
    }

    /// Number of grade groups (dimension + 1).
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.grades.num_groups
    }

    #[inline]
    pub fn grades(&self) -> &GradeTable {
        &self.grades
    }

    /// Metric diagonal, `metric()[i] = e_i . e_i`.
    pub fn metric(&self) -> &[f64] {
        &self.metric
    }

    /// Name of basis vector `i`.
    pub fn vector_name(&self, i: usize) -> &str {
        &self.config.basis_vectors[i]
    }

    pub fn vector_names(&self) -> &[String] {
        &self.config.basis_vectors
    }

    /// Index of the basis vector called `name`.
    pub fn vector_index(&self, name: &str) -> Option<usize> {
        self.config.vector_index(name)
    }

    /// Human readable name of the blade at dense index `index` ("1" for the scalar).
    pub fn blade_name(&self, index: usize) -> String {
        let vectors = self.grades.blade_vectors(index);
        if vectors.is_empty() {
            return "1".to_string();
        }
        vectors
            .iter()
            .map(|&v| self.vector_name(v))
            .collect::<Vec<_>>()
            .join("^")
    }

    /// Structure constants of `kind`, built on first request.
    pub fn structure(&self, kind: ProductKind) -> &StructureConstants {
        self.tables[kind.index()].get_or_init(|| {
            let sc = StructureConstants::build(&self.grades, &self.metric, kind);
            debug!(
                algebra = %self.config.name,
                product = kind.name(),
                partial_products = sc.num_partial_products(),
                terms = sc.num_terms(),
                "structure constants built"
            );
            sc
        })
    }

    /// Dual and undual tables, built on first request.
    ///
    /// `dual(A) = A ⌋ I⁻¹` and `undual(A) = A ⌋ I`. With a degenerate metric
    /// the pseudoscalar has no inverse and the dual coefficients are not finite.
    pub fn dual_table(&self) -> &DualTable {
        self.duals.get_or_init(|| {
            let full = (1u32 << self.dimension()) - 1;
            let n = self.dimension();
            // I⁻¹ = ~I / (I ~I) = reverse_sign(n) * I / prod(metric)
            let inverse_scale = blade::reverse_sign(n) / self.metric.iter().product::<f64>();

            let mut dual = Vec::with_capacity(self.grades.dense_size());
            let mut undual = Vec::with_capacity(self.grades.dense_size());
            for idx in 0..self.grades.dense_size() {
                let b = self.grades.basis_blade(idx);
                let (c, r) = blade::blade_product(b, full, &self.metric);
                let out = self.grades.blade_index(r);
                let orient = self.grades.basis_sign(idx) * self.grades.basis_sign(out);
                dual.push((out, c * inverse_scale * orient));
                undual.push((out, c * orient));
            }
            debug!(algebra = %self.config.name, "dual tables built");
            DualTable { dual, undual }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_e3ga() {
        let alg = Algebra::new(AlgebraConfig::e3ga()).unwrap();
        assert_eq!(alg.dimension(), 3);
        assert_eq!(alg.num_groups(), 4);
        assert_eq!(alg.grades().dense_size(), 8);
        assert_eq!(alg.name(), "e3ga");
    }

    #[test]
    fn test_euclidean_names() {
        let alg = Algebra::euclidean(4).unwrap();
        assert_eq!(alg.vector_name(0), "e1");
        assert_eq!(alg.vector_index("e4"), Some(3));
        assert!(Algebra::euclidean(0).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = AlgebraConfig::new("bad", &["e1", "e1"]);
        assert!(Algebra::new(cfg).is_err());
    }

    #[test]
    fn test_structure_is_cached() {
        let alg = Algebra::euclidean(3).unwrap();
        let a = alg.structure(ProductKind::Geometric) as *const _;
        let b = alg.structure(ProductKind::Geometric) as *const _;
        assert_eq!(a, b);
        assert_eq!(alg.structure(ProductKind::Outer).kind, ProductKind::Outer);
    }

    #[test]
    fn test_blade_name_uses_stored_order() {
        let alg = Algebra::new(AlgebraConfig::e3ga()).unwrap();
        let idx = alg.grades().blade_index(0b101);
        assert_eq!(alg.blade_name(idx), "e3^e1");
        assert_eq!(alg.blade_name(0), "1");
    }

    #[test]
    fn test_dual_e2ga() {
        // dual(1) = -e1^e2, dual(e1) = -e2, dual(e2) = e1
        let alg = Algebra::euclidean(2).unwrap();
        let t = alg.dual_table();
        assert_eq!(t.dual[0], (3, -1.0));
        assert_eq!(t.dual[1], (2, -1.0));
        assert_eq!(t.dual[2], (1, 1.0));
        assert_eq!(t.undual[0], (3, 1.0));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Algebra>();
    }
}
