//! ACES: a leveled fully homomorphic encryption scheme over a truncated
//! polynomial ring Z_q[X]/(u).
//!
//! A channel fixes a message modulus p, a composite cipher modulus q, a
//! monic reduction polynomial u with u(1) = 0 (mod q), a secret key x, and
//! public material (f0, f1, tensor, lvl_e). Ciphertexts support homomorphic
//! addition and multiplication; a non-bootstrapping refresh strips certified
//! noise so that circuits can run past the naive q/p budget.
//!
//! ```
//! use aces::{Algebra, ArithChannel, ChannelParams, Decryptor, Encryptor};
//! use aces_core::sampling::seeded_rng;
//!
//! let mut rng = seeded_rng(1);
//! let channel = ArithChannel::generate(ChannelParams::new(4, 47_601_551, 5, 10), &mut rng)?;
//! let encryptor = Encryptor::new(channel.publish());
//! let decryptor = Decryptor::new(&channel);
//! let algebra = Algebra::new(channel.publish());
//!
//! let (c1, _) = encryptor.encrypt(3, &mut rng)?;
//! let (c2, _) = encryptor.encrypt(2, &mut rng)?;
//! assert_eq!(decryptor.decrypt(&algebra.add(&c1, &c2)).value, 1);
//! assert_eq!(decryptor.decrypt(&algebra.mult(&c1, &c2)).value, 2);
//! # Ok::<(), aces::ChannelError>(())
//! ```

pub mod algebra;
pub mod channel;
pub mod ciphertext;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod expr;
pub mod level;
pub mod params;
pub mod tensor;

pub use algebra::Algebra;
pub use channel::{ArithChannel, PublicView};
pub use ciphertext::{Ciphertext, LevelTag};
pub use decrypt::{Decrypted, Decryptor};
pub use encrypt::Encryptor;
pub use error::{
    ChannelError, DecryptWarning, GenerationError, ParameterError, ParseError, RefreshError,
};
pub use expr::{compile, EvalDomain, Expression, PlaintextRing};
pub use level::Refresher;
pub use params::ChannelParams;
pub use tensor::Tensor;

#[cfg(test)]
mod tests {
    use aces_core::sampling::seeded_rng;
    use rand::Rng;

    use super::*;

    struct Party {
        channel: ArithChannel,
        encryptor: Encryptor,
        decryptor: Decryptor,
        algebra: Algebra,
        refresher: Refresher,
    }

    fn setup(params: ChannelParams, seed: u64) -> Party {
        let mut rng = seeded_rng(seed);
        let channel = ArithChannel::generate(params, &mut rng).unwrap();
        Party {
            encryptor: Encryptor::new(channel.publish()),
            decryptor: Decryptor::new(&channel),
            algebra: Algebra::new(channel.publish()),
            refresher: Refresher::new(&channel),
            channel,
        }
    }

    /// Encrypts until the tag carries at least one noise increment, the
    /// way a data owner preparing for a later refresh would.
    fn encrypt_leveled(
        party: &Party,
        message: u64,
        rng: &mut impl Rng,
    ) -> (Ciphertext, LevelTag) {
        loop {
            let (ct, tag) = party.encryptor.encrypt(message, rng).unwrap();
            if party.refresher.scalar_level(&tag) > 0 {
                return (ct, tag);
            }
        }
    }

    #[test]
    fn scenario_small_channel_add_and_mult() {
        // p = 4, q = 47601551, n = 5, N = 10.
        let party = setup(ChannelParams::new(4, 47_601_551, 5, 10), 101);
        let mut rng = seeded_rng(102);
        let (c1, _) = party.encryptor.encrypt(3, &mut rng).unwrap();
        let (c2, _) = party.encryptor.encrypt(2, &mut rng).unwrap();

        let sum = party.algebra.add(&c1, &c2);
        let product = party.algebra.mult(&c1, &c2);
        assert_eq!(party.decryptor.decrypt(&sum).value, 1);
        assert_eq!(party.decryptor.decrypt(&product).value, 2);
        assert!(sum.is_decryption_safe(party.channel.params().decrypt_threshold()));
        assert!(product.is_decryption_safe(party.channel.params().decrypt_threshold()));
    }

    #[test]
    fn scenario_power_of_two_message_modulus() {
        // p = 32, q = 32^5 + 1, n = 10, N = 2; q / p = 1048576.
        let party = setup(ChannelParams::new(32, 33_554_433, 10, 2), 103);
        assert_eq!(party.channel.params().decrypt_threshold(), 1_048_576);
        let mut rng = seeded_rng(104);
        let (ct, _) = party.encryptor.encrypt(3, &mut rng).unwrap();
        let out = party.decryptor.decrypt(&ct);
        assert_eq!(out.value, 3);
        assert_eq!(out.warning, None);
    }

    #[test]
    fn scenario_deep_circuit_needs_a_refresh() {
        // p = 32, q = 10 * 32^5 + 1, n = 10, N = 5.
        let party = setup(
            ChannelParams::new(32, 335_544_321, 10, 5).with_noiseless_share(0.0),
            105,
        );
        let threshold = party.channel.params().decrypt_threshold();
        let mut rng = seeded_rng(106);

        let inputs = [3u64, 5, 2, 7, 1, 4, 6, 9];
        let mut cts = Vec::new();
        let mut tags = Vec::new();
        for &m in &inputs {
            let (ct, tag) = encrypt_leveled(&party, m, &mut rng);
            cts.push(ct);
            tags.push(tag);
        }

        let full = compile("(0*1+2*3+4*5)*6+7").unwrap();
        let expected = full.eval(&PlaintextRing::new(32), &inputs).unwrap();

        // Evaluated in one go the bound blows through q/p and decryption
        // is no longer certified.
        let naive = full.eval(&party.algebra, &cts).unwrap();
        assert!(naive.uplvl() >= threshold);
        assert!(party.decryptor.decrypt(&naive).warning.is_some());

        // Split evaluation: the quadratic stage stays within budget...
        let stage_one = compile("0*1+2*3+4*5").unwrap();
        let partial = stage_one.eval(&party.algebra, &cts[..6]).unwrap();
        let partial_tag = stage_one.eval(&party.refresher, &tags[..6]).unwrap();
        // Three products at p * (N*p + 1)^2 = 829472 each.
        assert_eq!(partial.uplvl(), 2_488_416);
        assert!(partial.is_decryption_safe(threshold));

        // ...refresh strips the certified noise back to the fresh bound...
        let level = party.refresher.process(&[partial_tag])[0];
        let refreshed = party.algebra.refresh(&partial, level).unwrap();
        assert_eq!(refreshed.uplvl(), party.channel.params().fresh_noise_bound());
        assert!(refreshed.uplvl() < partial.uplvl());
        assert_eq!(
            party.decryptor.decrypt(&refreshed).value,
            party.decryptor.decrypt(&partial).value
        );

        // ...and the affine stage finishes within budget and agrees with
        // the plaintext evaluation.
        let stage_two = compile("0*1+2").unwrap();
        let finished = stage_two
            .eval(
                &party.algebra,
                &[refreshed, cts[6].clone(), cts[7].clone()],
            )
            .unwrap();
        assert!(finished.is_decryption_safe(threshold));
        let out = party.decryptor.decrypt(&finished);
        assert_eq!(out.value, expected);
        assert_eq!(out.warning, None);
    }

    #[test]
    fn scenario_width_one_channel() {
        // p = 27, n = 10, N = 1.
        let party = setup(ChannelParams::new(27, 34_000_000, 10, 1), 107);
        let mut rng = seeded_rng(108);
        let (c1, _) = party.encryptor.encrypt(3, &mut rng).unwrap();
        let (c2, _) = party.encryptor.encrypt(5, &mut rng).unwrap();
        assert_eq!(party.decryptor.decrypt(&party.algebra.add(&c1, &c2)).value, 8);
        assert_eq!(
            party.decryptor.decrypt(&party.algebra.mult(&c1, &c2)).value,
            15
        );
    }

    #[test]
    fn scenario_parameter_gate_fires_first() {
        // p = 10, q = 50: p^2 = 100 > 50.
        let mut rng = seeded_rng(109);
        let err = ArithChannel::generate(ChannelParams::new(10, 50, 5, 1), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            ChannelError::Parameter(ParameterError::ModulusGapTooSmall { p: 10, q: 50 })
        ));
    }

    #[test]
    fn property_three_domains_agree() {
        let party = setup(ChannelParams::new(32, 335_544_321, 10, 5), 110);
        let mut rng = seeded_rng(111);

        let inputs = [9u64, 4, 11, 2];
        let mut cts = Vec::new();
        let mut tags = Vec::new();
        for &m in &inputs {
            let (ct, tag) = party.encryptor.encrypt(m, &mut rng).unwrap();
            cts.push(ct);
            tags.push(tag);
        }

        let expr = compile("0*1+2*3").unwrap();
        let plain = expr.eval(&PlaintextRing::new(32), &inputs).unwrap();
        let cipher = expr.eval(&party.algebra, &cts).unwrap();
        let tag = expr.eval(&party.refresher, &tags).unwrap();

        assert_eq!(party.decryptor.decrypt(&cipher).value, plain);
        assert_eq!(tag.plain() as u64 % 32, plain);
        assert!(party.refresher.scalar_level(&tag) <= cipher.uplvl());
    }

    #[test]
    fn property_decryption_order_independent() {
        let party = setup(ChannelParams::new(4, 47_601_551, 5, 10), 112);
        let mut rng = seeded_rng(113);
        let (c1, _) = party.encryptor.encrypt(3, &mut rng).unwrap();
        let (c2, _) = party.encryptor.encrypt(1, &mut rng).unwrap();
        assert_eq!(
            party.decryptor.decrypt(&party.algebra.mult(&c1, &c2)).value,
            party.decryptor.decrypt(&party.algebra.mult(&c2, &c1)).value
        );
    }
}
