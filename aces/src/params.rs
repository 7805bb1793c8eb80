use aces_core::primes;

use crate::error::ParameterError;

/// Default number of key-generation attempts before a singular secret-key
/// basis is reported as a hard failure.
pub const MAX_KEYGEN_ATTEMPTS: usize = 8;

/// Scalar parameters of an arithmetic channel.
///
/// `p` is the message ("vanishing") modulus, `q` the cipher modulus, `n` the
/// degree of the reduction polynomial, and `width` the number of columns of
/// the public matrix (the length N of the per-ciphertext randomness vector).
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelParams {
    pub p: u64,
    pub q: u64,
    pub n: usize,
    pub width: usize,
    /// Probability that one noise component is noiseless (delta_i = 0).
    pub noiseless_share: f64,
    /// Whether a cipher modulus with bad factor structure may be replaced
    /// by a nearby admissible one instead of failing.
    pub adjust_modulus: bool,
}

impl ChannelParams {
    /// Parameters with the default noiseless share 1/(p+1) and modulus
    /// adjustment enabled.
    pub fn new(p: u64, q: u64, n: usize, width: usize) -> Self {
        ChannelParams {
            p,
            q,
            n,
            width,
            noiseless_share: 1.0 / (p as f64 + 1.0),
            adjust_modulus: true,
        }
    }

    pub fn with_noiseless_share(mut self, share: f64) -> Self {
        self.noiseless_share = share;
        self
    }

    pub fn with_fixed_modulus(mut self) -> Self {
        self.adjust_modulus = false;
        self
    }

    /// Enforces the channel invariants, possibly replacing the cipher
    /// modulus (logged) when it lacks two distinct prime factors.
    pub fn validated(mut self) -> Result<Self, ParameterError> {
        if self.p < 2 {
            return Err(ParameterError::VanishingModulusTooSmall(self.p));
        }
        if self.n <= 4 {
            return Err(ParameterError::DimensionTooSmall(self.n));
        }
        if self.width < 1 {
            return Err(ParameterError::WidthTooSmall);
        }
        if !(0.0..=1.0).contains(&self.noiseless_share) {
            return Err(ParameterError::NoiselessShareRange(self.noiseless_share));
        }
        if (self.p as u128) * (self.p as u128) >= self.q as u128 {
            return Err(ParameterError::ModulusGapTooSmall {
                p: self.p,
                q: self.q,
            });
        }
        let shared = primes::gcd(self.p, self.q);
        if shared != 1 {
            return Err(ParameterError::SharedFactor {
                p: self.p,
                q: self.q,
                gcd: shared,
            });
        }

        if !primes::has_two_distinct_prime_factors(self.q) {
            if !self.adjust_modulus {
                return Err(ParameterError::ModulusAdjustmentRefused(self.q));
            }
            let replacement = primes::nearby_admissible_composite(self.q, self.p)
                .ok_or(ParameterError::NoAdmissibleModulus(self.q))?;
            log::warn!(
                "cipher modulus {} lacks two distinct prime factors; using {} instead",
                self.q,
                replacement
            );
            self.q = replacement;
        }

        Ok(self)
    }

    /// The q/p threshold below which decryption is guaranteed exact.
    pub fn decrypt_threshold(&self) -> u64 {
        self.q / self.p
    }

    /// The conservative noise bound assigned to fresh encryptions.
    pub fn fresh_noise_bound(&self) -> u64 {
        self.width as u64 * self.p
    }
}
