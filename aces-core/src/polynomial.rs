use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use zeroize::Zeroize;

use crate::ring::RingContext;
use crate::zq::ZqElement;

/// A polynomial in R_q = Z_q[X]/(u), stored as exactly `degree` coefficients
/// with index i holding the X^i coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Polynomial {
    coeffs: Vec<ZqElement>,
    #[zeroize(skip)]
    ctx: Arc<RingContext>,
}

impl Polynomial {
    /// Creates a polynomial from at most `degree` coefficients, padding the
    /// high end with zeros.
    pub fn new(ctx: &Arc<RingContext>, coeffs: Vec<ZqElement>) -> Self {
        let n = ctx.degree();
        assert!(coeffs.len() <= n, "polynomial has too many coefficients");
        assert!(
            coeffs.iter().all(|c| c.q() == ctx.q()),
            "mismatched moduli"
        );

        let mut padded = coeffs;
        padded.resize(n, ZqElement::zero(ctx.q()));
        Polynomial {
            coeffs: padded,
            ctx: Arc::clone(ctx),
        }
    }

    /// Creates a polynomial directly from raw values in [0, q).
    pub fn from_values(ctx: &Arc<RingContext>, values: &[u64]) -> Self {
        let coeffs = values.iter().map(|&v| ctx.element(v)).collect();
        Polynomial::new(ctx, coeffs)
    }

    pub fn zero(ctx: &Arc<RingContext>) -> Self {
        Polynomial::new(ctx, Vec::new())
    }

    /// The constant polynomial `value`.
    pub fn constant(ctx: &Arc<RingContext>, value: u64) -> Self {
        Polynomial::new(ctx, vec![ctx.element(value)])
    }

    pub fn ctx(&self) -> &Arc<RingContext> {
        &self.ctx
    }

    pub fn coeffs(&self) -> &[ZqElement] {
        &self.coeffs
    }

    pub fn coeff(&self, i: usize) -> ZqElement {
        self.coeffs[i]
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// Evaluates the polynomial at the fixed point omega = 1, i.e. sums the
    /// coefficients mod q. This is a ring homomorphism R_q -> Z_q because
    /// u(1) = 0 (mod q) by construction.
    pub fn eval_at_omega(&self) -> u64 {
        let q = self.ctx.q() as u128;
        self.coeffs
            .iter()
            .fold(0u128, |acc, c| (acc + c.value() as u128) % q) as u64
    }

    /// Schoolbook product without reduction by u; the result has 2n - 1
    /// coefficients.
    pub fn mul_unreduced(&self, other: &Self) -> Vec<ZqElement> {
        assert_eq!(self.ctx, other.ctx, "mismatched ring contexts");

        let n = self.ctx.degree();
        let mut raw = vec![ZqElement::zero(self.ctx.q()); 2 * n - 1];
        for i in 0..n {
            if self.coeffs[i].is_zero() {
                continue;
            }
            for j in 0..n {
                raw[i + j] = raw[i + j] + self.coeffs[i] * other.coeffs[j];
            }
        }
        raw
    }

    /// Reduces a raw coefficient vector modulo u by long division. Since u
    /// is monic the division is exact and the result has degree < n.
    pub fn reduce(ctx: &Arc<RingContext>, raw: Vec<ZqElement>) -> Self {
        let n = ctx.degree();
        let q = ctx.q();
        assert!(
            raw.iter().all(|c| c.q() == q),
            "mismatched moduli"
        );

        let mut t = raw;
        if t.len() < n {
            t.resize(n, ZqElement::zero(q));
        }

        for d in (n..t.len()).rev() {
            let lead = t[d];
            if lead.is_zero() {
                continue;
            }
            // Subtract lead * u * X^(d - n); the monic top term clears t[d].
            for (k, &uc) in ctx.modulus().iter().enumerate() {
                t[d - n + k] = t[d - n + k] - lead * ZqElement::new(uc, q);
            }
            debug_assert!(t[d].is_zero());
        }
        t.truncate(n);

        Polynomial {
            coeffs: t,
            ctx: Arc::clone(ctx),
        }
    }

    /// Multiplies every coefficient by a scalar.
    pub fn scalar_mul(&self, scalar: ZqElement) -> Self {
        let coeffs = self.coeffs.iter().map(|&c| c * scalar).collect();
        Polynomial {
            coeffs,
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl Add for Polynomial {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        assert_eq!(self.ctx, other.ctx, "mismatched ring contexts");
        let coeffs = self
            .coeffs
            .iter()
            .zip(other.coeffs.iter())
            .map(|(&a, &b)| a + b)
            .collect();
        Polynomial {
            coeffs,
            ctx: self.ctx,
        }
    }
}

impl Sub for Polynomial {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        assert_eq!(self.ctx, other.ctx, "mismatched ring contexts");
        let coeffs = self
            .coeffs
            .iter()
            .zip(other.coeffs.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        Polynomial {
            coeffs,
            ctx: self.ctx,
        }
    }
}

impl Neg for Polynomial {
    type Output = Self;

    fn neg(self) -> Self {
        let coeffs = self.coeffs.iter().map(|&c| -c).collect();
        Polynomial {
            coeffs,
            ctx: self.ctx,
        }
    }
}

impl Mul for Polynomial {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let raw = self.mul_unreduced(&other);
        Polynomial::reduce(&self.ctx, raw)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, coeff) in self.coeffs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", coeff.value())?;
        }
        write!(f, "]")
    }
}
