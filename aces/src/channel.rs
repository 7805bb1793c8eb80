use std::fmt;
use std::sync::Arc;

use aces_core::ring::RingContext;
use aces_core::sampling;
use aces_core::vector_matrix::{PolyMatrix, PolyVector};
use rand::Rng;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{ChannelError, GenerationError};
use crate::params::{ChannelParams, MAX_KEYGEN_ATTEMPTS};
use crate::tensor::Tensor;

/// The secret key: one uniformly drawn ring element per dimension. The
/// coefficients are wiped when the key is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    x: PolyVector,
}

impl SecretKey {
    pub(crate) fn vector(&self) -> &PolyVector {
        &self.x
    }

    pub(crate) fn duplicate(&self) -> SecretKey {
        SecretKey { x: self.x.clone() }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        write!(f, "SecretKey({} components)", self.x.len())
    }
}

/// Everything a channel publishes: parameters, the reduction polynomial,
/// the public matrix f0, the vector f1 = f0^T x + e', the linearization
/// tensor, and the per-component noise indicators lvl_e.
#[derive(Debug)]
pub(crate) struct PublicMaterial {
    pub(crate) params: ChannelParams,
    pub(crate) ring: Arc<RingContext>,
    pub(crate) f0: PolyMatrix,
    pub(crate) f1: PolyVector,
    pub(crate) tensor: Tensor,
    pub(crate) lvl_e: Vec<u64>,
}

/// A shareable read-only handle to the public half of a channel.
#[derive(Debug, Clone)]
pub struct PublicView {
    material: Arc<PublicMaterial>,
}

impl PublicView {
    pub fn params(&self) -> &ChannelParams {
        &self.material.params
    }

    pub fn p(&self) -> u64 {
        self.material.params.p
    }

    pub fn q(&self) -> u64 {
        self.material.params.q
    }

    pub fn degree(&self) -> usize {
        self.material.params.n
    }

    pub fn width(&self) -> usize {
        self.material.params.width
    }

    pub fn ring(&self) -> &Arc<RingContext> {
        &self.material.ring
    }

    pub fn f0(&self) -> &PolyMatrix {
        &self.material.f0
    }

    pub fn f1(&self) -> &PolyVector {
        &self.material.f1
    }

    pub fn tensor(&self) -> &Tensor {
        &self.material.tensor
    }

    pub fn lvl_e(&self) -> &[u64] {
        &self.material.lvl_e
    }

    pub fn decrypt_threshold(&self) -> u64 {
        self.material.params.decrypt_threshold()
    }

    pub fn fresh_noise_bound(&self) -> u64 {
        self.material.params.fresh_noise_bound()
    }
}

/// An arithmetic channel: the published material plus the retained secret.
///
/// Construction runs the whole key-generation pipeline; afterwards the
/// public half is immutable and freely shareable through [`publish`].
///
/// [`publish`]: ArithChannel::publish
#[derive(Debug)]
pub struct ArithChannel {
    material: Arc<PublicMaterial>,
    secret: SecretKey,
}

impl ArithChannel {
    /// Generates a channel: validates the parameters, samples the reduction
    /// polynomial and the secret key, solves the linearization tensor
    /// (redrawing the key on a singular basis), and builds the public
    /// matrix, noise vector, and f1.
    pub fn generate(params: ChannelParams, rng: &mut impl Rng) -> Result<Self, ChannelError> {
        let params = params.validated()?;
        let ring = Arc::new(RingContext::random(params.q, params.n, rng));

        let mut solved = None;
        for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
            let mut x = sampling::uniform_poly_vector(&ring, params.n, rng);
            match Tensor::solve(&x) {
                Some(tensor) => {
                    solved = Some((x, tensor));
                    break;
                }
                None => {
                    x.zeroize();
                    log::debug!("secret-key basis singular on attempt {attempt}, redrawing");
                }
            }
        }
        let (x, tensor) =
            solved.ok_or(GenerationError::SingularBasis(MAX_KEYGEN_ATTEMPTS))?;

        let f0 = Self::sample_public_matrix(&params, &ring, rng);
        let (noise, lvl_e) = Self::sample_noise(&params, &ring, rng);
        let noise = Zeroizing::new(noise);
        let masked = Zeroizing::new(f0.transpose_mul_vec(&x));
        let f1 = masked.add(&noise);

        Ok(ArithChannel {
            material: Arc::new(PublicMaterial {
                params,
                ring,
                f0,
                f1,
                tensor,
                lvl_e,
            }),
            secret: SecretKey { x },
        })
    }

    /// Samples the n x N public matrix. Every entry evaluates at 1 to a
    /// multiple of p: the zero-divisor structure that makes the vector part
    /// of a ciphertext carry no message information at omega.
    fn sample_public_matrix(
        params: &ChannelParams,
        ring: &Arc<RingContext>,
        rng: &mut impl Rng,
    ) -> PolyMatrix {
        let multiplier_bound = params.q / params.p;
        let rows = (0..params.n)
            .map(|_| {
                let entries = (0..params.width)
                    .map(|_| {
                        let k = rng.gen_range(0..multiplier_bound);
                        sampling::pinned_poly(ring, params.p * k, rng)
                    })
                    .collect();
                PolyVector::new(ring, entries)
            })
            .collect();
        PolyMatrix::new(ring, rows, params.n, params.width)
    }

    /// Samples e': each component evaluates at 1 to p * delta_i, where
    /// delta_i is 0 with probability `noiseless_share`. The indicators are
    /// published as lvl_e.
    fn sample_noise(
        params: &ChannelParams,
        ring: &Arc<RingContext>,
        rng: &mut impl Rng,
    ) -> (PolyVector, Vec<u64>) {
        let mut lvl_e = Vec::with_capacity(params.width);
        let entries = (0..params.width)
            .map(|_| {
                let delta = sampling::noise_indicator(params.noiseless_share, rng) as u64;
                lvl_e.push(delta);
                sampling::pinned_poly(ring, params.p * delta, rng)
            })
            .collect();
        (PolyVector::new(ring, entries), lvl_e)
    }

    /// The shareable public view. No accessor on the view (or anywhere
    /// else) reveals the secret key.
    pub fn publish(&self) -> PublicView {
        PublicView {
            material: Arc::clone(&self.material),
        }
    }

    pub fn params(&self) -> &ChannelParams {
        &self.material.params
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.secret
    }
}
