//! Structure constants: the bilinear tables behind every product.
//!
//! For a product kind and an ordered pair of input groups `(i, j)` the
//! table holds one `PartialProduct` per output group. Each partial product
//! lists the non-zero terms `out[c] += coeff * a[ia] * b[ib]`, with all
//! indices local to their group.

use rayon::prelude::*;

use grado_core::blade;

use crate::grade_table::GradeTable;

/// Above this many blade pairs the table is built in parallel.
const PARALLEL_BUILD_THRESHOLD: usize = 1 << 12;

/// The bilinear products of the algebra.
///
/// All of them are grade-filtered projections of the geometric product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    /// Geometric product: all blade pairs.
    Geometric,
    /// Outer product: `grade(r) == ga + gb`.
    Outer,
    /// Scalar product: grade-0 part only.
    Scalar,
    /// Left contraction: `grade(r) == gb - ga`.
    LeftContraction,
    /// Right contraction: `grade(r) == ga - gb`.
    RightContraction,
    /// Hestenes inner product: `grade(r) == |ga - gb|`, zero for scalar operands.
    HestenesInner,
    /// Modified Hestenes inner product: `grade(r) == |ga - gb|`.
    ModifiedHestenesInner,
}

impl ProductKind {
    pub const COUNT: usize = 7;

    pub const ALL: [ProductKind; Self::COUNT] = [
        ProductKind::Geometric,
        ProductKind::Outer,
        ProductKind::Scalar,
        ProductKind::LeftContraction,
        ProductKind::RightContraction,
        ProductKind::HestenesInner,
        ProductKind::ModifiedHestenesInner,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        match self {
            ProductKind::Geometric => 0,
            ProductKind::Outer => 1,
            ProductKind::Scalar => 2,
            ProductKind::LeftContraction => 3,
            ProductKind::RightContraction => 4,
            ProductKind::HestenesInner => 5,
            ProductKind::ModifiedHestenesInner => 6,
        }
    }

    /// Short name, matching the usual function names (`gp`, `op`, ...).
    pub fn name(self) -> &'static str {
        match self {
            ProductKind::Geometric => "gp",
            ProductKind::Outer => "op",
            ProductKind::Scalar => "sp",
            ProductKind::LeftContraction => "lc",
            ProductKind::RightContraction => "rc",
            ProductKind::HestenesInner => "hip",
            ProductKind::ModifiedHestenesInner => "mhip",
        }
    }

    /// Whether a blade pair of grades `ga`, `gb` producing grade `gr` contributes.
    pub fn accepts(self, ga: usize, gb: usize, gr: usize) -> bool {
        match self {
            ProductKind::Geometric => true,
            ProductKind::Outer => gr == ga + gb,
            ProductKind::Scalar => gr == 0,
            ProductKind::LeftContraction => ga <= gb && gr == gb - ga,
            ProductKind::RightContraction => ga >= gb && gr == ga - gb,
            ProductKind::HestenesInner => ga != 0 && gb != 0 && gr == ga.abs_diff(gb),
            ProductKind::ModifiedHestenesInner => gr == ga.abs_diff(gb),
        }
    }
}

/// One term of a partial product: `out[out] += coeff * a[a] * b[b]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub a: u32,
    pub b: u32,
    pub out: u32,
    pub coeff: f64,
}

/// All terms of one (group A, group B) → output group contribution.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialProduct {
    pub group_a: usize,
    pub group_b: usize,
    pub group_out: usize,
    pub terms: Vec<Term>,
}

/// Structure constants of one product kind, indexed by input group pair.
#[derive(Debug, Clone)]
pub struct StructureConstants {
    pub kind: ProductKind,
    num_groups: usize,
    /// `pairs[i * num_groups + j]`, ordered by output group.
    pairs: Vec<Vec<PartialProduct>>,
}

impl StructureConstants {
    /// Enumerate every blade pair, compute product blade and coefficient,
    /// and keep the pairs accepted by `kind`.
    pub fn build(grades: &GradeTable, metric: &[f64], kind: ProductKind) -> Self {
        let num_groups = grades.num_groups;
        let pair_ids: Vec<(usize, usize)> = (0..num_groups)
            .flat_map(|i| (0..num_groups).map(move |j| (i, j)))
            .collect();

        let blade_pairs = grades.dense_size() * grades.dense_size();
        let pairs: Vec<Vec<PartialProduct>> = if blade_pairs >= PARALLEL_BUILD_THRESHOLD {
            pair_ids
                .par_iter()
                .map(|&(i, j)| build_pair(grades, metric, kind, i, j))
                .collect()
        } else {
            pair_ids
                .iter()
                .map(|&(i, j)| build_pair(grades, metric, kind, i, j))
                .collect()
        };

        Self { kind, num_groups, pairs }
    }

    /// Partial products for input groups `(i, j)`; empty when the pair never contributes.
    #[inline]
    pub fn entries(&self, i: usize, j: usize) -> &[PartialProduct] {
        &self.pairs[i * self.num_groups + j]
    }

    /// Number of non-empty partial products.
    pub fn num_partial_products(&self) -> usize {
        self.pairs.iter().map(|p| p.len()).sum()
    }

    /// Total number of terms over all partial products.
    pub fn num_terms(&self) -> usize {
        self.pairs
            .iter()
            .flat_map(|p| p.iter())
            .map(|pp| pp.terms.len())
            .sum()
    }
}

fn build_pair(
    grades: &GradeTable,
    metric: &[f64],
    kind: ProductKind,
    i: usize,
    j: usize,
) -> Vec<PartialProduct> {
    let mut by_output: Vec<Vec<Term>> = vec![Vec::new(); grades.num_groups];
    let start_a = grades.dense_start(i);
    let start_b = grades.dense_start(j);

    for a in 0..grades.group_size(i) {
        let idx_a = start_a + a;
        let bitmap_a = grades.basis_blade(idx_a);
        for b in 0..grades.group_size(j) {
            let idx_b = start_b + b;
            let bitmap_b = grades.basis_blade(idx_b);

            let (coeff, bitmap_r) = blade::blade_product(bitmap_a, bitmap_b, metric);
            if coeff == 0.0 {
                continue;
            }
            let gr = blade::grade(bitmap_r);
            if !kind.accepts(i, j, gr) {
                continue;
            }

            let idx_r = grades.blade_index(bitmap_r);
            // orientation signs are +-1, so multiplying also divides
            let coeff = coeff
                * grades.basis_sign(idx_a)
                * grades.basis_sign(idx_b)
                * grades.basis_sign(idx_r);
            by_output[gr].push(Term {
                a: a as u32,
                b: b as u32,
                out: (idx_r - grades.dense_start(gr)) as u32,
                coeff,
            });
        }
    }

    by_output
        .into_iter()
        .enumerate()
        .filter(|(_, terms)| !terms.is_empty())
        .map(|(k, terms)| PartialProduct {
            group_a: i,
            group_b: j,
            group_out: k,
            terms,
        })
        .collect()
}
