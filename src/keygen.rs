//! Key generation: sample a secret seed, derive the secret vector `e` and
//! the parity-check matrix `H` from it, and publish `(H, s = H·eᵀ)`.

use zeroize::Zeroize;

use crate::error::{LsfsError, LsfsResult};
use crate::matrix::Matrix;
use crate::params::Params;
use crate::xof::XofStream;

const LOG_TARGET: &str = "lsfs::keygen";

const DOMAIN_SECRET_VECTOR: &[u8] = b"lsfs/keygen/e/v1";

/// The secret key: a random seed. The H-seed and the secret vector `e` are
/// both re-derived from it on demand rather than stored separately.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey {
    seed: Vec<u8>,
}

impl SecretKey {
    pub fn seed_bytes(&self) -> &[u8] {
        &self.seed
    }

    pub fn from_seed_bytes(params: &Params, seed: Vec<u8>) -> LsfsResult<Self> {
        if seed.len() != params.seed_sk_byte_len {
            return Err(LsfsError::BufferTooSmall {
                expected: params.seed_sk_byte_len,
                actual: seed.len(),
            });
        }
        Ok(SecretKey { seed })
    }

    /// The leading `seedHByteLen` bytes of the secret seed, which also serve
    /// as the seed for deriving the public matrix `H`.
    fn h_seed(&self, params: &Params) -> &[u8] {
        &self.seed[..params.seed_h_byte_len]
    }

    /// Re-derive the weight-`w` secret vector `e` from the seed.
    pub fn secret_vector(&self, params: &Params) -> crate::bitvec::Bitvec {
        let mut xof = XofStream::with_domain(&self.seed, DOMAIN_SECRET_VECTOR);
        xof.read_weight_w_vector(params.n, params.w)
    }

    /// Re-derive the public parity-check matrix `H` from the seed.
    pub fn matrix(&self, params: &Params) -> Matrix {
        Matrix::from_seed(self.h_seed(params), params.r, params.n)
    }
}

/// The public key: the syndrome `s = H·eᵀ`, packed as `r_in_bytes` bytes.
/// The verifier never holds the secret key, so it cannot re-derive `H` from
/// it; callers obtain `H` from the same [`KeyPair`] this syndrome came from
/// and pass both to `verify`/`open` together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub syndrome: crate::bitvec::Bitvec,
}

impl PublicKey {
    pub fn syndrome_bytes(&self) -> &[u8] {
        self.syndrome.as_bytes()
    }
}

/// A generated keypair, bundling the public key together with the `H`
/// matrix the secret key deterministically derives (so callers never need
/// to re-derive it themselves to verify against this key).
pub struct KeyPair {
    pub sk: SecretKey,
    pub pk: PublicKey,
    pub h: Matrix,
}

/// Sample a fresh secret-key seed and derive the matching public key.
pub fn keypair<R: rand::RngCore + rand::CryptoRng>(
    params: &Params,
    rng: &mut R,
) -> LsfsResult<KeyPair> {
    let mut seed = vec![0u8; params.seed_sk_byte_len];
    rng.try_fill_bytes(&mut seed)
        .map_err(|_| LsfsError::EntropyFailure)?;

    let sk = SecretKey::from_seed_bytes(params, seed)?;
    let h = sk.matrix(params);
    let mut e = sk.secret_vector(params);
    let syndrome = h.syndrome(&e);
    e.as_bytes_mut().zeroize();

    tracing::debug!(target: LOG_TARGET, n = params.n, r = params.r, w = params.w, "generated keypair");

    Ok(KeyPair {
        sk,
        pk: PublicKey { syndrome },
        h,
    })
}
