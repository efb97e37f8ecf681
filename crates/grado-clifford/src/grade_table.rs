//! Grade-group metadata for one algebra.
//!
//! Blades are stored grade by grade; group `g` holds the C(n, g) blades of
//! grade `g` in the algebra's basis order. A dense coordinate buffer has
//! all 2^n blades; a sparse buffer holds only the groups set in a group
//! usage bitmap (GU).

use grado_core::blade;

/// Lookup tables for group sizes, offsets and basis blades.
#[derive(Debug, Clone)]
pub struct GradeTable {
    /// Number of basis vectors.
    pub n: usize,
    /// Number of grade groups (n + 1).
    pub num_groups: usize,
    group_sizes: Vec<usize>,
    /// Start of each group in a dense buffer.
    dense_starts: Vec<usize>,
    /// Coordinate count for every group usage bitmap.
    mv_sizes: Vec<usize>,
    bitmap_by_index: Vec<u32>,
    index_by_bitmap: Vec<usize>,
    sign_by_index: Vec<f64>,
    /// Basis vectors of each stored blade, in stored order.
    vectors_by_index: Vec<Vec<usize>>,
}

impl GradeTable {
    /// Build the table from a basis order (ordered vector indices per blade,
    /// grouped by ascending grade, as produced by `AlgebraConfig::basis_order`).
    pub fn new(n: usize, basis_order: &[Vec<usize>]) -> Self {
        let num_groups = n + 1;
        let dim = 1usize << n;

        let group_sizes: Vec<usize> = (0..num_groups).map(|g| blade::binomial(n, g)).collect();
        let mut dense_starts = Vec::with_capacity(num_groups);
        let mut start = 0;
        for &size in &group_sizes {
            dense_starts.push(start);
            start += size;
        }

        let mv_sizes: Vec<usize> = (0..1usize << num_groups)
            .map(|gu| {
                (0..num_groups)
                    .filter(|&g| gu & (1 << g) != 0)
                    .map(|g| group_sizes[g])
                    .sum()
            })
            .collect();

        let mut bitmap_by_index = vec![0u32; dim];
        let mut index_by_bitmap = vec![0usize; dim];
        let mut sign_by_index = vec![1.0; dim];
        let mut vectors_by_index = vec![Vec::new(); dim];
        for (idx, vectors) in basis_order.iter().enumerate().take(dim) {
            // basis_order has been validated: no repeated vectors
            let (sign, bitmap) = blade::ordered_wedge(vectors).unwrap_or((1.0, 0));
            bitmap_by_index[idx] = bitmap;
            index_by_bitmap[bitmap as usize] = idx;
            sign_by_index[idx] = sign;
            vectors_by_index[idx] = vectors.clone();
        }

        Self {
            n,
            num_groups,
            group_sizes,
            dense_starts,
            mv_sizes,
            bitmap_by_index,
            index_by_bitmap,
            sign_by_index,
            vectors_by_index,
        }
    }

    /// Number of coordinates in group `g`.
    #[inline]
    pub fn group_size(&self, g: usize) -> usize {
        self.group_sizes[g]
    }

    /// Number of coordinates stored for group usage bitmap `gu`.
    #[inline]
    pub fn mv_size(&self, gu: u32) -> usize {
        self.mv_sizes[gu as usize]
    }

    /// Offset of group `g` inside a sparse buffer with usage `gu`.
    #[inline]
    pub fn group_offset(&self, gu: u32, g: usize) -> usize {
        self.mv_size(gu & ((1u32 << g) - 1))
    }

    /// Start of group `g` in a dense buffer.
    #[inline]
    pub fn dense_start(&self, g: usize) -> usize {
        self.dense_starts[g]
    }

    /// Length of a dense buffer (2^n).
    #[inline]
    pub fn dense_size(&self) -> usize {
        self.bitmap_by_index.len()
    }

    /// Group usage bitmap with every group set.
    #[inline]
    pub fn full_gu(&self) -> u32 {
        ((1u64 << self.num_groups) - 1) as u32
    }

    /// Canonical bitmap of the blade stored at dense index `index`.
    #[inline]
    pub fn basis_blade(&self, index: usize) -> u32 {
        self.bitmap_by_index[index]
    }

    /// Dense index of the blade with canonical bitmap `bitmap`.
    #[inline]
    pub fn blade_index(&self, bitmap: u32) -> usize {
        self.index_by_bitmap[bitmap as usize]
    }

    /// Orientation of the stored blade relative to canonical ascending order.
    #[inline]
    pub fn basis_sign(&self, index: usize) -> f64 {
        self.sign_by_index[index]
    }

    /// Orientation sign looked up by canonical bitmap.
    #[inline]
    pub fn sign_by_bitmap(&self, bitmap: u32) -> f64 {
        self.sign_by_index[self.blade_index(bitmap)]
    }

    /// Basis vectors of the stored blade, in stored order.
    pub fn blade_vectors(&self, index: usize) -> &[usize] {
        &self.vectors_by_index[index]
    }

    /// Grade of the blade at dense index `index`.
    #[inline]
    pub fn grade_of_index(&self, index: usize) -> usize {
        blade::grade(self.bitmap_by_index[index])
    }
}
