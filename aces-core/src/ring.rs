use std::fmt;

use rand::Rng;

use crate::zq::ZqElement;

/// The ring R_q = Z_q[X]/(u) for a runtime modulus q and a monic reduction
/// polynomial u of degree n.
///
/// Unlike power-of-two cyclotomic settings, u is channel data: it is sampled
/// at key generation subject to u(1) = 0 (mod q), so every polynomial keeps a
/// shared handle to the context instead of a copyable descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingContext {
    q: u64,
    degree: usize,
    /// Coefficients of u, constant term first; `modulus[degree] == 1`.
    modulus: Vec<u64>,
}

impl RingContext {
    /// Creates a context from the coefficients of u.
    ///
    /// Panics when u is not monic of the stated degree, when a coefficient
    /// is outside [0, q), or when u(1) != 0 (mod q). Channel construction
    /// only ever produces admissible u, so violations are programmer errors.
    pub fn new(q: u64, modulus: Vec<u64>) -> Self {
        assert!(q >= 2, "modulus must be at least 2");
        assert!(modulus.len() >= 2, "reduction polynomial must have positive degree");
        let degree = modulus.len() - 1;
        assert_eq!(modulus[degree], 1, "reduction polynomial must be monic");
        assert!(
            modulus.iter().all(|&c| c < q),
            "reduction coefficients must lie in [0, q)"
        );

        let at_one = modulus
            .iter()
            .fold(0u128, |acc, &c| (acc + c as u128) % q as u128);
        assert_eq!(at_one, 0, "reduction polynomial must vanish at 1 mod q");

        RingContext { q, degree, modulus }
    }

    /// Samples a monic degree-n polynomial with uniform coefficients in
    /// [0, q), then adjusts one uniformly chosen coefficient so that the
    /// whole polynomial evaluates to 0 at 1 mod q.
    pub fn random(q: u64, degree: usize, rng: &mut impl Rng) -> Self {
        assert!(degree >= 1, "reduction polynomial must have positive degree");
        let mut modulus: Vec<u64> = (0..degree).map(|_| rng.gen_range(0..q)).collect();
        modulus.push(1);

        let fix = rng.gen_range(0..degree);
        let others = modulus
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != fix)
            .fold(0u128, |acc, (_, &c)| (acc + c as u128) % q as u128);
        modulus[fix] = ((q as u128 - others) % q as u128) as u64;

        RingContext::new(q, modulus)
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Degree of u, i.e. the number of coefficients in a reduced polynomial.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Coefficients of u, constant term first.
    pub fn modulus(&self) -> &[u64] {
        &self.modulus
    }

    /// Lifts a raw value into Z_q under this context.
    pub fn element(&self, value: u64) -> ZqElement {
        ZqElement::new(value, self.q)
    }
}

impl fmt::Display for RingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z_{}[X] / (u), deg u = {}", self.q, self.degree)
    }
}
