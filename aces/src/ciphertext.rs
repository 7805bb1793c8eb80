use std::fmt;

use aces_core::polynomial::Polynomial;
use aces_core::vector_matrix::PolyVector;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An ACES ciphertext: the vector part `c`, the scalar part `c'`, and the
/// public upper bound `uplvl` on the accumulated noise level.
///
/// Decryption recovers the message exactly while `uplvl < q / p`; past that
/// threshold the decryptor still answers but attaches a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    c: PolyVector,
    cprime: Polynomial,
    uplvl: u64,
}

impl Ciphertext {
    pub(crate) fn new(c: PolyVector, cprime: Polynomial, uplvl: u64) -> Self {
        Ciphertext { c, cprime, uplvl }
    }

    pub fn c(&self) -> &PolyVector {
        &self.c
    }

    pub fn cprime(&self) -> &Polynomial {
        &self.cprime
    }

    /// The public noise-level bound.
    pub fn uplvl(&self) -> u64 {
        self.uplvl
    }

    /// Whether decryption is still guaranteed exact for the given q/p
    /// threshold.
    pub fn is_decryption_safe(&self, threshold: u64) -> bool {
        self.uplvl < threshold
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ciphertext(dim = {}, uplvl = {})",
            self.c.len(),
            self.uplvl
        )
    }
}

/// The secret level bookkeeping attached to a ciphertext by its producer.
///
/// `weights` records, per noise component e'_i, how many times that
/// component has accumulated; `plain` carries the running integer plaintext
/// evaluation that makes the multiplicative level update exact. Both are
/// known only to the data owner and are wiped on drop.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct LevelTag {
    plain: u128,
    weights: Vec<u128>,
}

impl LevelTag {
    pub(crate) fn new(plain: u128, weights: Vec<u128>) -> Self {
        LevelTag { plain, weights }
    }

    pub fn plain(&self) -> u128 {
        self.plain
    }

    pub fn weights(&self) -> &[u128] {
        &self.weights
    }
}
