use thiserror::Error;

/// Rejections raised while validating channel parameters or plaintexts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("message modulus must be at least 2, got {0}")]
    VanishingModulusTooSmall(u64),

    #[error("cipher modulus must satisfy p^2 < q (p = {p}, q = {q})")]
    ModulusGapTooSmall { p: u64, q: u64 },

    #[error("message and cipher moduli must be coprime (gcd({p}, {q}) = {gcd})")]
    SharedFactor { p: u64, q: u64, gcd: u64 },

    #[error("ring dimension must exceed 4, got {0}")]
    DimensionTooSmall(usize),

    #[error("ciphertext width must be at least 1")]
    WidthTooSmall,

    #[error("noiseless share must lie in [0, 1], got {0}")]
    NoiselessShareRange(f64),

    #[error("cipher modulus {0} lacks two distinct prime factors and adjustment is disabled")]
    ModulusAdjustmentRefused(u64),

    #[error("no admissible cipher modulus found near {0}")]
    NoAdmissibleModulus(u64),

    #[error("message {message} is outside the plaintext space Z_{p}")]
    MessageRange { message: u64, p: u64 },
}

/// Key generation failed in a way that fresh randomness did not repair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("secret-key basis stayed singular after {0} attempts")]
    SingularBasis(usize),
}

/// Anything that can go wrong while constructing an arithmetic channel.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChannelError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Explicit failures of the refresh operation. Each variant is a case where
/// proceeding could silently change the encrypted message, so the operation
/// rejects instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error("refresh at level 0 cannot reduce the noise bound")]
    NothingToStrip,

    #[error("claimed level {level} exceeds the public bound {uplvl}")]
    LevelAboveBound { level: u64, uplvl: u64 },

    #[error("noise bound {uplvl} is already at the fresh bound {fresh}")]
    AlreadyFresh { uplvl: u64, fresh: u64 },

    #[error("noise bound {uplvl} already exceeds the safety threshold {threshold}")]
    TooNoisy { uplvl: u64, threshold: u64 },
}

/// Failures while compiling or evaluating an arithmetic expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character {ch:?} at position {at}")]
    UnexpectedChar { ch: char, at: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expected {expected} at position {at}")]
    Expected { expected: &'static str, at: usize },

    #[error("leaf index {index} out of range for {len} arguments")]
    LeafOutOfRange { index: usize, len: usize },
}

/// Non-fatal notice that a ciphertext was decrypted past its safety bound;
/// the returned value may have wrapped modulo q.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecryptWarning {
    /// The ciphertext's public noise bound at decryption time.
    pub uplvl: u64,
    /// The q/p threshold the bound was measured against.
    pub threshold: u64,
}
