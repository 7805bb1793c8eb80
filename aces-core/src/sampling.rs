use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::polynomial::Polynomial;
use crate::ring::RingContext;
use crate::vector_matrix::PolyVector;
use crate::zq::ZqElement;

/// Samples a polynomial with coefficients uniform in [0, q).
pub fn uniform_poly(ctx: &Arc<RingContext>, rng: &mut impl Rng) -> Polynomial {
    let q = ctx.q();
    let coeffs = (0..ctx.degree())
        .map(|_| ZqElement::new(rng.gen_range(0..q), q))
        .collect();
    Polynomial::new(ctx, coeffs)
}

/// Samples a polynomial whose evaluation at 1 is exactly `target` mod q.
///
/// All coefficients are drawn uniformly, then one uniformly chosen position
/// is adjusted so the coefficient sum lands on the target. This is the
/// primitive behind the message encoding r_m, the encryption randomness b,
/// the public matrix entries, and the noise vector e'.
pub fn pinned_poly(ctx: &Arc<RingContext>, target: u64, rng: &mut impl Rng) -> Polynomial {
    let q = ctx.q();
    let n = ctx.degree();
    let mut coeffs: Vec<ZqElement> = (0..n)
        .map(|_| ZqElement::new(rng.gen_range(0..q), q))
        .collect();

    let pin = rng.gen_range(0..n);
    let others = coeffs
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != pin)
        .fold(ZqElement::zero(q), |acc, (_, &c)| acc + c);
    coeffs[pin] = ZqElement::new(target, q) - others;

    let poly = Polynomial::new(ctx, coeffs);
    debug_assert_eq!(poly.eval_at_omega(), target % q);
    poly
}

/// Samples a vector of uniform polynomials.
pub fn uniform_poly_vector(
    ctx: &Arc<RingContext>,
    length: usize,
    rng: &mut impl Rng,
) -> PolyVector {
    let entries = (0..length).map(|_| uniform_poly(ctx, rng)).collect();
    PolyVector::new(ctx, entries)
}

/// Draws the noise indicator for one e' component: `false` (noiseless) with
/// probability `noiseless_share`, `true` otherwise.
pub fn noise_indicator(noiseless_share: f64, rng: &mut impl Rng) -> bool {
    !rng.gen_bool(noiseless_share)
}

/// A deterministic CSPRNG for tests and reproducible demos. Production
/// callers seed from `OsRng` instead.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}
