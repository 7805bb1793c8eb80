use aces_core::polynomial::Polynomial;
use aces_core::vector_matrix::PolyVector;

use crate::channel::PublicView;
use crate::ciphertext::Ciphertext;
use crate::error::RefreshError;

/// The homomorphic algebra over ciphertexts of one channel. Holds only the
/// public view; every operation is a pure function of its operands.
pub struct Algebra {
    view: PublicView,
}

impl Algebra {
    pub fn new(view: PublicView) -> Self {
        Algebra { view }
    }

    pub fn view(&self) -> &PublicView {
        &self.view
    }

    /// Componentwise sum; noise bounds add.
    pub fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        let c = a.c().add(b.c());
        let cprime = a.cprime().clone() + b.cprime().clone();
        Ciphertext::new(c, cprime, a.uplvl().saturating_add(b.uplvl()))
    }

    /// Homomorphic product through the linearization tensor.
    ///
    /// Expanding (c1' - c1^T x)(c2' - c2^T x) with
    /// x_i x_j = lambda^0 + sum_k lambda^k x_k gives a ciphertext whose
    /// mask is again linear in x:
    ///
    ///   c3_k = c1_k c2' + c2_k c1' - t_k,   c3' = c1' c2' + t_0,
    ///
    /// where t_k contracts the tensor against all pair products. Pairs are
    /// folded symmetrically so the operation commutes exactly.
    pub fn mult(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        let ring = self.view.ring();
        let n = self.view.degree();
        let tensor = self.view.tensor();

        let mut t: Vec<Polynomial> = (0..=n).map(|_| Polynomial::zero(ring)).collect();
        for i in 0..n {
            for j in i..n {
                let mut pair = a.c().entry(i).clone() * b.c().entry(j).clone();
                if i != j {
                    pair = pair + a.c().entry(j).clone() * b.c().entry(i).clone();
                }
                let lambda = tensor.lambda(i, j);
                for (k, &coeff) in lambda.iter().enumerate() {
                    if coeff != 0 {
                        t[k] = t[k].clone() + pair.scalar_mul(ring.element(coeff));
                    }
                }
            }
        }

        let entries = (0..n)
            .map(|k| {
                a.c().entry(k).clone() * b.cprime().clone()
                    + b.c().entry(k).clone() * a.cprime().clone()
                    - t[k + 1].clone()
            })
            .collect();
        let c = PolyVector::new(ring, entries);
        let cprime = a.cprime().clone() * b.cprime().clone() + t[0].clone();

        // The residue of a product is bounded by p(u1+1) * p(u2+1), so the
        // published bound must be p(u1+1)(u2+1), not p*u1*u2: the exact
        // level p*l1*l2 + plain1*l2 + plain2*l1 carries plaintext
        // cross-terms that the bilinear term alone undercounts.
        let uplvl = self
            .view
            .p()
            .saturating_mul(a.uplvl().saturating_add(1))
            .saturating_mul(b.uplvl().saturating_add(1));
        Ciphertext::new(c, cprime, uplvl)
    }

    /// Strips a certified amount of noise from a ciphertext.
    ///
    /// `level` must be the scalar produced by the refresher from the
    /// ciphertext's true level tag. The operation subtracts the constant
    /// p * level from the scalar part, which cancels exactly that many
    /// noise increments and resets the public bound to the fresh value.
    /// Every case where the subtraction could instead change the message
    /// is rejected explicitly.
    pub fn refresh(&self, ct: &Ciphertext, level: u64) -> Result<Ciphertext, RefreshError> {
        let p = self.view.p();
        let fresh = self.view.fresh_noise_bound();
        let threshold = self.view.decrypt_threshold();

        if level == 0 {
            return Err(RefreshError::NothingToStrip);
        }
        if level > ct.uplvl() {
            return Err(RefreshError::LevelAboveBound {
                level,
                uplvl: ct.uplvl(),
            });
        }
        if ct.uplvl() >= threshold {
            return Err(RefreshError::TooNoisy {
                uplvl: ct.uplvl(),
                threshold,
            });
        }
        if ct.uplvl() <= fresh {
            return Err(RefreshError::AlreadyFresh {
                uplvl: ct.uplvl(),
                fresh,
            });
        }

        // level < threshold = q / p, so the correction stays below q.
        let correction = Polynomial::constant(self.view.ring(), p * level);
        let cprime = ct.cprime().clone() - correction;
        Ok(Ciphertext::new(ct.c().clone(), cprime, fresh))
    }
}

#[cfg(test)]
mod tests {
    use aces_core::sampling::seeded_rng;

    use super::*;
    use crate::channel::ArithChannel;
    use crate::decrypt::Decryptor;
    use crate::encrypt::Encryptor;
    use crate::params::ChannelParams;

    fn setup() -> (ArithChannel, Encryptor, Decryptor, Algebra) {
        let mut rng = seeded_rng(81);
        let channel =
            ArithChannel::generate(ChannelParams::new(4, 47_601_551, 5, 10), &mut rng).unwrap();
        let encryptor = Encryptor::new(channel.publish());
        let decryptor = Decryptor::new(&channel);
        let algebra = Algebra::new(channel.publish());
        (channel, encryptor, decryptor, algebra)
    }

    #[test]
    fn test_addition_is_homomorphic() {
        let (_channel, encryptor, decryptor, algebra) = setup();
        let mut rng = seeded_rng(82);
        for (m1, m2) in [(3u64, 2u64), (1, 1), (0, 3), (2, 2)] {
            let (c1, _) = encryptor.encrypt(m1, &mut rng).unwrap();
            let (c2, _) = encryptor.encrypt(m2, &mut rng).unwrap();
            let sum = algebra.add(&c1, &c2);
            assert_eq!(decryptor.decrypt(&sum).value, (m1 + m2) % 4);
            assert_eq!(sum.uplvl(), c1.uplvl() + c2.uplvl());
        }
    }

    #[test]
    fn test_multiplication_is_homomorphic() {
        let (_channel, encryptor, decryptor, algebra) = setup();
        let mut rng = seeded_rng(83);
        for (m1, m2) in [(3u64, 2u64), (2, 2), (0, 3), (3, 3)] {
            let (c1, _) = encryptor.encrypt(m1, &mut rng).unwrap();
            let (c2, _) = encryptor.encrypt(m2, &mut rng).unwrap();
            let product = algebra.mult(&c1, &c2);
            assert_eq!(decryptor.decrypt(&product).value, (m1 * m2) % 4);
            assert_eq!(
                product.uplvl(),
                4 * (c1.uplvl() + 1) * (c2.uplvl() + 1)
            );
        }
    }

    #[test]
    fn test_operations_commute() {
        let (_channel, encryptor, _decryptor, algebra) = setup();
        let mut rng = seeded_rng(84);
        let (c1, _) = encryptor.encrypt(3, &mut rng).unwrap();
        let (c2, _) = encryptor.encrypt(2, &mut rng).unwrap();
        assert_eq!(algebra.add(&c1, &c2), algebra.add(&c2, &c1));
        assert_eq!(algebra.mult(&c1, &c2), algebra.mult(&c2, &c1));
    }

    #[test]
    fn test_refresh_rejects_level_zero() {
        let (_channel, encryptor, _decryptor, algebra) = setup();
        let mut rng = seeded_rng(85);
        let (c1, _) = encryptor.encrypt(1, &mut rng).unwrap();
        let (c2, _) = encryptor.encrypt(1, &mut rng).unwrap();
        let sum = algebra.add(&c1, &c2);
        assert_eq!(algebra.refresh(&sum, 0), Err(RefreshError::NothingToStrip));
    }

    #[test]
    fn test_refresh_rejects_fresh_ciphertexts() {
        let (_channel, encryptor, _decryptor, algebra) = setup();
        let mut rng = seeded_rng(86);
        let (ct, _) = encryptor.encrypt(1, &mut rng).unwrap();
        assert!(matches!(
            algebra.refresh(&ct, 1),
            Err(RefreshError::AlreadyFresh { .. })
        ));
    }

    #[test]
    fn test_refresh_rejects_inconsistent_level() {
        let (_channel, encryptor, _decryptor, algebra) = setup();
        let mut rng = seeded_rng(87);
        let (c1, _) = encryptor.encrypt(1, &mut rng).unwrap();
        let (c2, _) = encryptor.encrypt(1, &mut rng).unwrap();
        let sum = algebra.add(&c1, &c2);
        assert!(matches!(
            algebra.refresh(&sum, sum.uplvl() + 1),
            Err(RefreshError::LevelAboveBound { .. })
        ));
    }
}
