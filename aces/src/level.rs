use crate::channel::{ArithChannel, PublicView};
use crate::ciphertext::LevelTag;

/// The level sub-algebra, run by the data owner in parallel with the
/// ciphertext algebra.
///
/// Writing the decryption residue as an integer, every ciphertext obeys
/// `eval(c' - c^T x) = plain + p * (k . lvl_e)` while all bounds stay below
/// q. The tag operations below push that identity through sums and
/// products unchanged, so the scalar level handed to `refresh` certifies
/// exactly how much noise a ciphertext carries.
pub struct Refresher {
    view: PublicView,
}

impl Refresher {
    pub fn new(channel: &ArithChannel) -> Self {
        Refresher {
            view: channel.publish(),
        }
    }

    /// The level algebra only reads public material, so evaluating parties
    /// can run it from the view alone.
    pub fn from_view(view: PublicView) -> Self {
        Refresher { view }
    }

    fn exact_level(&self, tag: &LevelTag) -> u128 {
        tag.weights()
            .iter()
            .zip(self.view.lvl_e())
            .fold(0u128, |acc, (&w, &delta)| {
                acc.saturating_add(w.saturating_mul(delta as u128))
            })
    }

    /// The scalar level l(k) = k . lvl_e of a tag.
    pub fn scalar_level(&self, tag: &LevelTag) -> u64 {
        self.exact_level(tag).min(u64::MAX as u128) as u64
    }

    /// Level counterpart of ciphertext addition: both the running plaintext
    /// and the weights add componentwise.
    pub fn addlvl(&self, a: &LevelTag, b: &LevelTag) -> LevelTag {
        assert_eq!(
            a.weights().len(),
            b.weights().len(),
            "mismatched tag widths"
        );
        let weights = a
            .weights()
            .iter()
            .zip(b.weights())
            .map(|(&x, &y)| x.saturating_add(y))
            .collect();
        LevelTag::new(a.plain().saturating_add(b.plain()), weights)
    }

    /// Level counterpart of ciphertext multiplication.
    ///
    /// Expanding (plain_a + p l_a)(plain_b + p l_b) and regrouping on the
    /// noise components gives
    ///
    ///   k_3 = plain_a * k_b + plain_b * k_a + p * l(k_a) * k_b,
    ///
    /// the tensor contraction of the two weight vectors through lvl_e.
    pub fn multlvl(&self, a: &LevelTag, b: &LevelTag) -> LevelTag {
        assert_eq!(
            a.weights().len(),
            b.weights().len(),
            "mismatched tag widths"
        );
        let p = self.view.p() as u128;
        let cross = p.saturating_mul(self.exact_level(a));
        let weights = a
            .weights()
            .iter()
            .zip(b.weights())
            .map(|(&wa, &wb)| {
                a.plain()
                    .saturating_mul(wb)
                    .saturating_add(b.plain().saturating_mul(wa))
                    .saturating_add(cross.saturating_mul(wb))
            })
            .collect();
        LevelTag::new(a.plain().saturating_mul(b.plain()), weights)
    }

    /// Converts per-ciphertext tags into the scalar inputs consumed by
    /// `Algebra::refresh`.
    pub fn process(&self, tags: &[LevelTag]) -> Vec<u64> {
        tags.iter().map(|tag| self.scalar_level(tag)).collect()
    }
}
