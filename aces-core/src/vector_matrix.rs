use std::sync::Arc;

use zeroize::Zeroize;

use crate::polynomial::Polynomial;
use crate::ring::RingContext;

/// A vector of polynomials over a shared ring context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyVector {
    entries: Vec<Polynomial>,
    ctx: Arc<RingContext>,
}

/// A matrix of polynomials in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyMatrix {
    rows: Vec<PolyVector>,
    n_rows: usize,
    n_cols: usize,
    ctx: Arc<RingContext>,
}

impl PolyVector {
    pub fn new(ctx: &Arc<RingContext>, entries: Vec<Polynomial>) -> Self {
        assert!(
            entries.iter().all(|p| p.ctx() == ctx),
            "mismatched ring contexts"
        );
        PolyVector {
            entries,
            ctx: Arc::clone(ctx),
        }
    }

    pub fn zero(ctx: &Arc<RingContext>, length: usize) -> Self {
        let entries = (0..length).map(|_| Polynomial::zero(ctx)).collect();
        PolyVector {
            entries,
            ctx: Arc::clone(ctx),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ctx(&self) -> &Arc<RingContext> {
        &self.ctx
    }

    pub fn entries(&self) -> &[Polynomial] {
        &self.entries
    }

    pub fn entry(&self, i: usize) -> &Polynomial {
        &self.entries[i]
    }

    /// Computes the inner product with another vector, reducing each
    /// schoolbook product modulo u.
    pub fn inner_product(&self, other: &Self) -> Polynomial {
        assert_eq!(self.len(), other.len(), "mismatched vector lengths");
        assert_eq!(self.ctx, other.ctx, "mismatched ring contexts");

        let mut result = Polynomial::zero(&self.ctx);
        for (a, b) in self.entries.iter().zip(other.entries.iter()) {
            result = result + a.clone() * b.clone();
        }
        result
    }

    /// Componentwise sum.
    pub fn add(&self, other: &Self) -> Self {
        assert_eq!(self.len(), other.len(), "mismatched vector lengths");
        let entries = self
            .entries
            .iter()
            .zip(other.entries.iter())
            .map(|(a, b)| a.clone() + b.clone())
            .collect();
        PolyVector {
            entries,
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl Zeroize for PolyVector {
    fn zeroize(&mut self) {
        for entry in &mut self.entries {
            entry.zeroize();
        }
    }
}

impl PolyMatrix {
    pub fn new(ctx: &Arc<RingContext>, rows: Vec<PolyVector>, n_rows: usize, n_cols: usize) -> Self {
        assert_eq!(rows.len(), n_rows, "number of rows must match");
        for row in &rows {
            assert_eq!(row.len(), n_cols, "all rows must have the same length");
            assert_eq!(row.ctx(), ctx, "mismatched ring contexts");
        }
        PolyMatrix {
            rows,
            n_rows,
            n_cols,
            ctx: Arc::clone(ctx),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn get(&self, row: usize, col: usize) -> &Polynomial {
        self.rows[row].entry(col)
    }

    /// Matrix-vector product A * v; `v` must have `n_cols` entries.
    pub fn mul_vec(&self, v: &PolyVector) -> PolyVector {
        assert_eq!(self.n_cols, v.len(), "matrix columns must match vector length");
        let entries = self.rows.iter().map(|row| row.inner_product(v)).collect();
        PolyVector::new(&self.ctx, entries)
    }

    /// Transposed product A^T * v; `v` must have `n_rows` entries.
    pub fn transpose_mul_vec(&self, v: &PolyVector) -> PolyVector {
        assert_eq!(self.n_rows, v.len(), "matrix rows must match vector length");
        let entries = (0..self.n_cols)
            .map(|col| {
                let mut acc = Polynomial::zero(&self.ctx);
                for (row, vi) in self.rows.iter().zip(v.entries()) {
                    acc = acc + row.entry(col).clone() * vi.clone();
                }
                acc
            })
            .collect();
        PolyVector::new(&self.ctx, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::seeded_rng;

    fn create_test_ctx() -> Arc<RingContext> {
        Arc::new(RingContext::new(13, vec![4, 3, 5, 1]))
    }

    fn poly(ctx: &Arc<RingContext>, values: &[u64]) -> Polynomial {
        Polynomial::from_values(ctx, values)
    }

    #[test]
    fn test_inner_product() {
        let ctx = create_test_ctx();
        let a = PolyVector::new(&ctx, vec![poly(&ctx, &[1]), poly(&ctx, &[0, 1])]);
        let b = PolyVector::new(&ctx, vec![poly(&ctx, &[2]), poly(&ctx, &[3])]);
        // 1*2 + X*3 = 2 + 3X
        assert_eq!(a.inner_product(&b), poly(&ctx, &[2, 3]));
    }

    #[test]
    fn test_mul_vec_matches_manual_sum() {
        let ctx = create_test_ctx();
        let mut rng = seeded_rng(21);
        let rows: Vec<PolyVector> = (0..3)
            .map(|_| {
                PolyVector::new(
                    &ctx,
                    (0..2)
                        .map(|_| crate::sampling::uniform_poly(&ctx, &mut rng))
                        .collect(),
                )
            })
            .collect();
        let m = PolyMatrix::new(&ctx, rows.clone(), 3, 2);
        let v = PolyVector::new(
            &ctx,
            (0..2)
                .map(|_| crate::sampling::uniform_poly(&ctx, &mut rng))
                .collect(),
        );

        let out = m.mul_vec(&v);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(*out.entry(i), row.inner_product(&v));
        }
    }

    #[test]
    fn test_transpose_mul_vec() {
        let ctx = create_test_ctx();
        // A = [[1, X], [2, 3]]; A^T * (1, 1) = (1 + 2, X + 3)
        let rows = vec![
            PolyVector::new(&ctx, vec![poly(&ctx, &[1]), poly(&ctx, &[0, 1])]),
            PolyVector::new(&ctx, vec![poly(&ctx, &[2]), poly(&ctx, &[3])]),
        ];
        let m = PolyMatrix::new(&ctx, rows, 2, 2);
        let ones = PolyVector::new(&ctx, vec![poly(&ctx, &[1]), poly(&ctx, &[1])]);
        let out = m.transpose_mul_vec(&ones);
        assert_eq!(*out.entry(0), poly(&ctx, &[3]));
        assert_eq!(*out.entry(1), poly(&ctx, &[3, 1]));
    }

    #[test]
    #[should_panic(expected = "matrix columns must match")]
    fn test_dimension_mismatch_panics() {
        let ctx = create_test_ctx();
        let m = PolyMatrix::new(&ctx, vec![PolyVector::zero(&ctx, 2)], 1, 2);
        m.mul_vec(&PolyVector::zero(&ctx, 3));
    }
}
