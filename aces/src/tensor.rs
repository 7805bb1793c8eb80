use aces_core::vector_matrix::PolyVector;
use aces_core::zq::ZqElement;

/// The linearization tensor of a secret key: integers lambda_{i,j}^k with
///
///   x_i * x_j = lambda_{i,j}^0 + sum_k lambda_{i,j}^k * x_k   in Z_q[X]/(u),
///
/// slot 0 holding the constant-term convention x_0 = 1. Only pairs with
/// i <= j are stored; access is symmetric. The tensor is public material:
/// it reveals relations between secret-key components but not the
/// components themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor {
    degree: usize,
    rows: Vec<Vec<u64>>,
}

impl Tensor {
    /// Solves for the tensor of `x` by Gaussian elimination over Z_q.
    ///
    /// The basis matrix has the constant polynomial and the coefficient
    /// vectors of the x_k as columns. Pivots must be invertible mod q;
    /// because q is composite a random basis can fail to yield a full set,
    /// in which case `None` asks the caller to redraw the secret key.
    pub fn solve(x: &PolyVector) -> Option<Tensor> {
        let ctx = x.ctx();
        let n = ctx.degree();
        assert_eq!(x.len(), n, "secret key must have one component per degree");
        let q = ctx.q();

        let n_pairs = n * (n + 1) / 2;
        let total_cols = n + 1 + n_pairs;

        // Augmented system [basis | all pair products], one column per pair.
        let mut a = vec![vec![ZqElement::zero(q); total_cols]; n];
        a[0][0] = ZqElement::one(q);
        for k in 0..n {
            for r in 0..n {
                a[r][k + 1] = x.entry(k).coeff(r);
            }
        }
        for (t, (i, j)) in pair_order(n).enumerate() {
            let product = x.entry(i).clone() * x.entry(j).clone();
            for r in 0..n {
                a[r][n + 1 + t] = product.coeff(r);
            }
        }

        // Reduced row echelon form, accepting only invertible pivots.
        let mut pivots: Vec<usize> = Vec::new();
        let mut row = 0;
        for col in 0..=n {
            if row == n {
                break;
            }
            let Some(r) = (row..n).find(|&r| a[r][col].inverse().is_some()) else {
                continue;
            };
            a.swap(row, r);

            let inv = a[row][col].inverse().expect("pivot chosen invertible");
            for c in col..total_cols {
                a[row][c] = a[row][c] * inv;
            }
            for rr in 0..n {
                if rr == row || a[rr][col].is_zero() {
                    continue;
                }
                let factor = a[rr][col];
                for c in col..total_cols {
                    a[rr][c] = a[rr][c] - factor * a[row][c];
                }
            }
            pivots.push(col);
            row += 1;
        }
        if row < n {
            return None;
        }

        // Free columns stay at zero; each pivot row names the unknown it
        // solved for.
        let rows = (0..n_pairs)
            .map(|t| {
                let mut lambda = vec![0u64; n + 1];
                for (r, &col) in pivots.iter().enumerate() {
                    lambda[col] = a[r][n + 1 + t].value();
                }
                lambda
            })
            .collect();

        Some(Tensor { degree: n, rows })
    }

    /// The coefficients lambda_{i,j}^0..lambda_{i,j}^n; symmetric in (i, j).
    pub fn lambda(&self, i: usize, j: usize) -> &[u64] {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        assert!(j < self.degree, "tensor index out of range");
        &self.rows[pair_index(self.degree, i, j)]
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

/// Row-major enumeration of pairs (i, j) with i <= j < n.
fn pair_order(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i..n).map(move |j| (i, j)))
}

fn pair_index(n: usize, i: usize, j: usize) -> usize {
    // Rows before block i: n + (n-1) + ... + (n-i+1) = i*n - i*(i-1)/2.
    i * n - i * (i - 1) / 2 + (j - i)
}
