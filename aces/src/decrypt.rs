use zeroize::Zeroizing;

use crate::channel::{ArithChannel, PublicView, SecretKey};
use crate::ciphertext::Ciphertext;
use crate::error::DecryptWarning;

/// The outcome of a decryption: the recovered residue in Z_p, plus a
/// warning when the ciphertext's noise bound had already crossed q/p and
/// the value may therefore have wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decrypted {
    pub value: u64,
    pub warning: Option<DecryptWarning>,
}

/// Decrypts ciphertexts with a private copy of the channel secret.
pub struct Decryptor {
    secret: SecretKey,
    view: PublicView,
}

impl Decryptor {
    /// Only the holder of the channel can build a decryptor; the secret is
    /// duplicated into it and wiped when the decryptor is dropped.
    pub fn new(channel: &ArithChannel) -> Self {
        Decryptor {
            secret: channel.secret().duplicate(),
            view: channel.publish(),
        }
    }

    /// Computes c' - c^T x, evaluates at omega, and reduces mod p.
    pub fn decrypt(&self, ct: &Ciphertext) -> Decrypted {
        let mask = Zeroizing::new(ct.c().inner_product(self.secret.vector()));
        let noisy = Zeroizing::new(ct.cprime().clone() - (*mask).clone());
        let value = noisy.eval_at_omega() % self.view.p();

        let threshold = self.view.decrypt_threshold();
        let warning = (ct.uplvl() >= threshold).then_some(DecryptWarning {
            uplvl: ct.uplvl(),
            threshold,
        });

        Decrypted { value, warning }
    }
}
