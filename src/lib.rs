//! A post-quantum digital signature scheme built from Stern's zero-knowledge
//! identification protocol for syndrome decoding, compiled into a
//! non-interactive signature via Fiat-Shamir ("lossy Stern", `lsfs`).
//!
//! ```no_run
//! use lsfs::params::ParamSet;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let params = ParamSet::Lsfs128Pq.params();
//! let mut rng = StdRng::from_entropy();
//! let kp = lsfs::keypair(params, &mut rng).unwrap();
//! let signed = lsfs::sign(params, &kp, b"hello world").unwrap();
//! let opened = lsfs::open(params, &kp.h, &kp.pk, &signed).unwrap();
//! assert_eq!(opened, Some(b"hello world".to_vec()));
//! ```

pub mod bitvec;
pub mod error;
pub mod hex_codec;
pub mod keygen;
pub mod matrix;
pub mod params;
pub mod permutation;
pub mod round;
pub mod signer;
pub mod transcript;
pub mod verifier;
pub mod xof;

pub use error::{LsfsError, LsfsResult};
pub use keygen::{keypair, KeyPair, PublicKey, SecretKey};
pub use params::{ParamSet, Params};

const LOG_TARGET: &str = "lsfs";

/// Sign `message` under `kp.sk`, against `kp.h`.
///
/// Returns the NIST-style `signed_message = message ‖ signature` encoding
/// rather than a bare signature, matching [`open`]'s expected input.
pub fn sign(params: &Params, kp: &KeyPair, message: &[u8]) -> LsfsResult<Vec<u8>> {
    let sig = signer::sign(params, &kp.h, &kp.sk, message)?;
    let mut signed = Vec::with_capacity(message.len() + sig.len());
    signed.extend_from_slice(message);
    signed.extend_from_slice(&sig);
    Ok(signed)
}

/// Verify a `signed_message` produced by [`sign`] and, on success, return
/// the recovered message. Returns `Ok(None)` when the signature does not
/// verify; `Err` only for inputs too short to even contain a signature.
pub fn open(
    params: &Params,
    h: &matrix::Matrix,
    pk: &PublicKey,
    signed_message: &[u8],
) -> LsfsResult<Option<Vec<u8>>> {
    let sig_len = params.sig_byte_len();
    if signed_message.len() < sig_len {
        return Err(LsfsError::SignatureTooShort {
            expected: sig_len,
            actual: signed_message.len(),
        });
    }
    let split = signed_message.len() - sig_len;
    let (message, sig) = signed_message.split_at(split);

    let accept = verifier::verify(params, h, pk, message, sig)?;
    tracing::debug!(target: LOG_TARGET, accept, "opened signed message");
    if accept {
        Ok(Some(message.to_vec()))
    } else {
        Ok(None)
    }
}
