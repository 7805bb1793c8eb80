use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use zeroize::Zeroize;

/// An element of Z_q for a runtime modulus q.
///
/// The modulus travels with the value so that elements from different
/// channels can never be mixed silently. Products are computed through
/// `u128` so that no intermediate overflows for any 64-bit modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZqElement {
    value: u64,
    q: u64,
}

impl ZqElement {
    /// Creates a new element in Z_q, reducing the value into [0, q).
    pub fn new(value: u64, q: u64) -> Self {
        assert!(q >= 2, "modulus must be at least 2");
        ZqElement { value: value % q, q }
    }

    /// Builds an element from a signed value, normalized into [0, q).
    pub fn from_signed(value: i128, q: u64) -> Self {
        assert!(q >= 2, "modulus must be at least 2");
        ZqElement {
            value: value.rem_euclid(q as i128) as u64,
            q,
        }
    }

    /// The additive identity of Z_q.
    pub fn zero(q: u64) -> Self {
        ZqElement::new(0, q)
    }

    /// The multiplicative identity of Z_q.
    pub fn one(q: u64) -> Self {
        ZqElement::new(1, q)
    }

    /// Returns the canonical representative in [0, q).
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns the modulus q.
    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Computes the multiplicative inverse via the extended Euclidean
    /// algorithm. Returns `None` when gcd(value, q) != 1, which happens for
    /// a positive fraction of Z_q because q is composite.
    pub fn inverse(&self) -> Option<Self> {
        if self.value == 0 {
            return None;
        }

        let (mut old_r, mut r) = (self.value as i128, self.q as i128);
        let (mut old_s, mut s) = (1i128, 0i128);

        while r != 0 {
            let quotient = old_r / r;
            (old_r, r) = (r, old_r - quotient * r);
            (old_s, s) = (s, old_s - quotient * s);
        }

        if old_r != 1 {
            return None;
        }

        Some(ZqElement::from_signed(old_s, self.q))
    }
}

impl Add for ZqElement {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        assert_eq!(self.q, other.q, "mismatched moduli");
        let sum = (self.value as u128 + other.value as u128) % self.q as u128;
        ZqElement {
            value: sum as u64,
            q: self.q,
        }
    }
}

impl Sub for ZqElement {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        assert_eq!(self.q, other.q, "mismatched moduli");
        let value = if self.value >= other.value {
            self.value - other.value
        } else {
            self.q - (other.value - self.value)
        };
        ZqElement { value, q: self.q }
    }
}

impl Mul for ZqElement {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        assert_eq!(self.q, other.q, "mismatched moduli");
        let product = (self.value as u128 * other.value as u128) % self.q as u128;
        ZqElement {
            value: product as u64,
            q: self.q,
        }
    }
}

impl Neg for ZqElement {
    type Output = Self;

    fn neg(self) -> Self {
        let value = if self.value == 0 {
            0
        } else {
            self.q - self.value
        };
        ZqElement { value, q: self.q }
    }
}

impl Zeroize for ZqElement {
    fn zeroize(&mut self) {
        self.value.zeroize();
    }
}

impl fmt::Display for ZqElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.value, self.q)
    }
}
