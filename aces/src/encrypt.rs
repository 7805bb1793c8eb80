use aces_core::sampling;
use aces_core::vector_matrix::PolyVector;
use rand::Rng;
use zeroize::{Zeroize, Zeroizing};

use crate::channel::PublicView;
use crate::ciphertext::{Ciphertext, LevelTag};
use crate::error::ParameterError;

/// Encrypts messages in Z_p against the public half of a channel.
pub struct Encryptor {
    view: PublicView,
}

impl Encryptor {
    pub fn new(view: PublicView) -> Self {
        Encryptor { view }
    }

    /// Encrypts `message` and returns the ciphertext together with its
    /// level tag.
    ///
    /// The randomness vector b has components pinned to evaluations
    /// beta_i drawn uniformly from {0, ..., p}; those draws become the tag
    /// weights. The scalar part is r_m + b^T f1, which equals
    /// r_m + c^T x + b^T e' without the sender ever touching the secret.
    pub fn encrypt(
        &self,
        message: u64,
        rng: &mut impl Rng,
    ) -> Result<(Ciphertext, LevelTag), ParameterError> {
        let p = self.view.p();
        if message >= p {
            return Err(ParameterError::MessageRange { message, p });
        }

        let ring = self.view.ring();
        let width = self.view.width();

        let mut betas: Vec<u64> = Vec::with_capacity(width);
        let b = Zeroizing::new(PolyVector::new(
            ring,
            (0..width)
                .map(|_| {
                    let beta = rng.gen_range(0..=p);
                    betas.push(beta);
                    sampling::pinned_poly(ring, beta, rng)
                })
                .collect(),
        ));
        let r_m = Zeroizing::new(sampling::pinned_poly(ring, message, rng));

        let c = self.view.f0().mul_vec(&b);
        let cprime = (*r_m).clone() + b.inner_product(self.view.f1());

        let tag = LevelTag::new(
            message as u128,
            betas.iter().map(|&beta| beta as u128).collect(),
        );
        betas.zeroize();

        Ok((
            Ciphertext::new(c, cprime, self.view.fresh_noise_bound()),
            tag,
        ))
    }
}
