//! The public parity-check matrix `H ∈ GF(2)^(r×n)`.
//!
//! `H` is never stored or transmitted directly: every party derives it
//! deterministically by squeezing `r * n_in_bytes` bytes from an XOF seeded
//! with the H-seed, and reading row `i` as a [`Bitvec`] of length `n`
//! (tail bits of the last byte of each row masked to zero).

use crate::bitvec::Bitvec;
use crate::xof::XofStream;

const LOG_TARGET: &str = "lsfs::matrix";
const DOMAIN_MATRIX: &[u8] = b"lsfs/matrix/v1";

pub struct Matrix {
    n: usize,
    rows: Vec<Bitvec>,
}

impl Matrix {
    /// Derive `H` from the H-seed: row `i` is `n_in_bytes` XOF output bytes
    /// read as a `Bitvec(n)`.
    pub fn from_seed(h_seed: &[u8], r: usize, n: usize) -> Self {
        let mut xof = XofStream::with_domain(h_seed, DOMAIN_MATRIX);
        let rows = (0..r).map(|_| xof.read_bits(n)).collect();
        tracing::debug!(target: LOG_TARGET, "derived {r}x{n} parity-check matrix from seed");
        Matrix { n, rows }
    }

    pub fn r(&self) -> usize {
        self.rows.len()
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn row(&self, i: usize) -> &Bitvec {
        &self.rows[i]
    }

    /// The syndrome `H · vᵀ`: `s[i] = parity(H[i] ∧ v)`.
    pub fn syndrome(&self, v: &Bitvec) -> Bitvec {
        assert_eq!(v.len(), self.n, "syndrome input length mismatch");
        let mut s = Bitvec::zeros(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let mut parity = 0u8;
            for (a, b) in row.as_bytes().iter().zip(v.as_bytes().iter()) {
                parity ^= (a & b).count_ones() as u8 & 1;
            }
            s.set(i, parity & 1 == 1);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let h1 = Matrix::from_seed(b"h-seed", 16, 64);
        let h2 = Matrix::from_seed(b"h-seed", 16, 64);
        for i in 0..16 {
            assert_eq!(h1.row(i).as_bytes(), h2.row(i).as_bytes());
        }
    }

    #[test]
    fn syndrome_of_zero_vector_is_zero() {
        let h = Matrix::from_seed(b"h-seed-2", 10, 40);
        let v = Bitvec::zeros(40);
        let s = h.syndrome(&v);
        assert_eq!(s.weight(), 0);
    }

    #[test]
    fn syndrome_is_linear() {
        let h = Matrix::from_seed(b"h-seed-3", 12, 50);
        let mut a = Bitvec::zeros(50);
        a.set(3, true);
        a.set(7, true);
        let mut b = Bitvec::zeros(50);
        b.set(7, true);
        b.set(21, true);

        let sa = h.syndrome(&a);
        let sb = h.syndrome(&b);
        let s_xor = h.syndrome(&a.xor(&b));
        assert_eq!(s_xor, sa.xor(&sb));
    }
}
