//! Deterministic byte stream derived from a seed via SHAKE-256, with typed
//! readers for bits, bounded integers, and permutations.
//!
//! Every helper owns its own [`XofStream`] instance; there is no shared or
//! global XOF state, so two branches derived from the same seed but with
//! different domain tags never interfere with each other.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

use crate::bitvec::Bitvec;
use crate::permutation::Permutation;

const LOG_TARGET: &str = "lsfs::xof";

/// A single-use, stateful SHAKE-256 sponge: absorb once, then squeeze an
/// unbounded sequence of output bytes.
pub struct XofStream {
    reader: Box<dyn XofReader>,
}

impl XofStream {
    /// Absorb `seed` (optionally followed by a domain-separation tag) and
    /// switch the sponge into squeeze mode.
    pub fn new(seed: &[u8]) -> Self {
        Self::with_domain(seed, &[])
    }

    /// Absorb `seed ‖ domain`; the tag keeps unrelated derivations from the
    /// same seed (e.g. the secret vector vs. the parity-check matrix) from
    /// ever sharing XOF output.
    pub fn with_domain(seed: &[u8], domain: &[u8]) -> Self {
        let mut hasher = Shake256::default();
        hasher.update(seed);
        hasher.update(domain);
        tracing::trace!(target: LOG_TARGET, "absorbed {} seed bytes, {} domain bytes", seed.len(), domain.len());
        XofStream {
            reader: Box::new(hasher.finalize_xof()),
        }
    }

    /// Squeeze exactly `n` bytes.
    pub fn squeeze(&mut self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        self.reader.read(&mut buf);
        buf
    }

    /// `read_bits(L)`: fill `ceil(L/8)` bytes and zero the last-byte tail.
    pub fn read_bits(&mut self, len: usize) -> Bitvec {
        let bytes = self.squeeze(crate::bitvec::bits_to_bytes(len));
        Bitvec::from_bytes(len, bytes).expect("freshly squeezed buffer matches declared length")
    }

    /// `read_uniform_below(n)`: rejection-sample an integer in `[0, n)`.
    ///
    /// Draws the smallest whole number of bytes covering `ceil(log2 n)` bits,
    /// masks to that many bits, and rejects (drawing again) on a value `>= n`.
    pub fn read_uniform_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "read_uniform_below requires a positive bound");
        if n == 1 {
            return 0;
        }
        let bits_needed = 64 - (n - 1).leading_zeros() as usize;
        let bytes_needed = (bits_needed + 7) / 8;
        let mask: u64 = if bits_needed == 64 {
            u64::MAX
        } else {
            (1u64 << bits_needed) - 1
        };
        loop {
            let raw = self.squeeze(bytes_needed);
            let mut value = 0u64;
            for (i, byte) in raw.iter().enumerate() {
                value |= (*byte as u64) << (8 * i);
            }
            value &= mask;
            if value < n {
                return value;
            }
        }
    }

    /// `read_permutation(n)`: a uniform random permutation of `{0, ..., n-1}`
    /// via Fisher-Yates, drawing from high index to low.
    pub fn read_permutation(&mut self, n: usize) -> Permutation {
        let mut indices: Vec<u32> = (0..n as u32).collect();
        for i in (1..n).rev() {
            let j = self.read_uniform_below((i + 1) as u64) as usize;
            indices.swap(i, j);
        }
        Permutation::from_image(indices)
    }

    /// `read_weight_w_vector(n, w)`: a length-`n` vector with exactly `w`
    /// bits set, chosen by reject-and-resample (not a counter loop, so the
    /// resulting distribution over weight-`w` vectors stays uniform).
    pub fn read_weight_w_vector(&mut self, n: usize, w: usize) -> Bitvec {
        assert!(w <= n, "weight must not exceed vector length");
        let mut v = Bitvec::zeros(n);
        let mut set = 0usize;
        while set < w {
            let pos = self.read_uniform_below(n as u64) as usize;
            if !v.get(pos) {
                v.set(pos, true);
                set += 1;
            }
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_domain_is_deterministic() {
        let mut a = XofStream::with_domain(b"seed", b"tag");
        let mut b = XofStream::with_domain(b"seed", b"tag");
        assert_eq!(a.squeeze(64), b.squeeze(64));
    }

    #[test]
    fn different_domain_diverges() {
        let mut a = XofStream::with_domain(b"seed", b"tag-a");
        let mut b = XofStream::with_domain(b"seed", b"tag-b");
        assert_ne!(a.squeeze(64), b.squeeze(64));
    }

    #[test]
    fn uniform_below_respects_bound() {
        let mut xof = XofStream::new(b"bound-test");
        for _ in 0..1000 {
            let v = xof.read_uniform_below(7);
            assert!(v < 7);
        }
    }

    #[test]
    fn permutation_is_a_bijection() {
        let mut xof = XofStream::new(b"perm-test");
        let perm = xof.read_permutation(200);
        let mut seen = vec![false; 200];
        for i in 0..200 {
            let img = perm.image(i);
            assert!(!seen[img], "permutation image collided at {img}");
            seen[img] = true;
        }
    }

    #[test]
    fn weight_w_vector_has_exact_weight() {
        let mut xof = XofStream::new(b"weight-test");
        let v = xof.read_weight_w_vector(300, 42);
        assert_eq!(v.weight(), 42);
    }
}
