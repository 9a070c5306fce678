//! Verification: for each round, reconstruct two of the three commitments
//! from the disclosed payload (the third travels opaquely), rehash, and
//! compare against the claimed challenge digest in constant time.

use crate::bitvec::Bitvec;
use crate::error::{LsfsError, LsfsResult};
use crate::keygen::PublicKey;
use crate::matrix::Matrix;
use crate::params::Params;
use crate::round::shake_digest;
use crate::signer::expand_challenge;
use crate::transcript::ChallengeTranscript;
use crate::xof::XofStream;

const LOG_TARGET: &str = "lsfs::verifier";

/// Verify `sig` against `message` under `(h, pk)`.
///
/// Never returns `Err` for a malformed-but-well-sized signature; a
/// structurally invalid or simply forged signature is reported as
/// `Ok(false)`. `Err` is reserved for inputs shorter than the fixed
/// signature length, which cannot be parsed at all.
pub fn verify(
    params: &Params,
    h: &Matrix,
    pk: &PublicKey,
    message: &[u8],
    sig: &[u8],
) -> LsfsResult<bool> {
    if sig.len() != params.sig_byte_len() {
        return Err(LsfsError::SignatureTooShort {
            expected: params.sig_byte_len(),
            actual: sig.len(),
        });
    }

    let ch_hash = &sig[..params.ch_hash_byte_len];
    let challenge = expand_challenge(ch_hash, params.t);

    let mut cursor = params.ch_hash_byte_len;
    let mut transcript = ChallengeTranscript::new(message);
    let mut all_checks_passed = true;

    for b in challenge {
        let Some((c0, c1, c2, advanced)) =
            parse_and_reconstruct_round(params, h, pk, &sig[cursor..], b)
        else {
            tracing::debug!(target: LOG_TARGET, "round payload truncated or malformed");
            return Ok(false);
        };
        if c0.is_none() {
            all_checks_passed = false;
        }
        transcript.append_round(
            c0.as_deref().unwrap_or(&[]),
            c1.as_deref().unwrap_or(&[]),
            c2.as_deref().unwrap_or(&[]),
        );
        cursor += advanced;
    }

    if sig[cursor..].iter().any(|&b| b != 0) {
        tracing::debug!(target: LOG_TARGET, "non-zero trailing padding");
        return Ok(false);
    }

    let rehash = shake_digest(&[transcript.finish().as_slice()], params.ch_hash_byte_len);
    let digest_matches = ct_eq(&rehash, ch_hash);

    Ok(digest_matches && all_checks_passed)
}

/// Parse one round's payload (shape dictated by `b`) and reconstruct its
/// three commitments. Returns `None` on truncated input (a verification
/// failure the caller converts to `Ok(false)`), and returns `c0 = None`
/// (propagated as a failed per-round check, not a parse error) when the
/// in-band check for that mode (the weight of `ẽ_i` in mode 2) fails.
///
/// Returns `(c0, c1, c2, bytes_consumed)`; whichever commitment was not
/// recomputed is always `Some` (it travels opaquely in the payload), so
/// `None` only ever appears in the slot whose reconstruction failed a
/// check.
#[allow(clippy::type_complexity)]
fn parse_and_reconstruct_round(
    params: &Params,
    h: &Matrix,
    pk: &PublicKey,
    payload: &[u8],
    b: u8,
) -> Option<(Option<Vec<u8>>, Option<Vec<u8>>, Option<Vec<u8>>, usize)> {
    let n_bytes = params.n_in_bytes();
    match b {
        0 => {
            let needed = n_bytes + params.seed_perm_byte_len + 2 * params.coins_comm_byte_len
                + params.comm_byte_len;
            if payload.len() < needed {
                return None;
            }
            let mut cur = 0;
            let y_tilde = Bitvec::from_bytes(params.n, payload[cur..cur + n_bytes].to_vec())
                .ok()?;
            cur += n_bytes;
            let perm_seed = &payload[cur..cur + params.seed_perm_byte_len];
            cur += params.seed_perm_byte_len;
            let coins0 = &payload[cur..cur + params.coins_comm_byte_len];
            cur += params.coins_comm_byte_len;
            let coins1 = &payload[cur..cur + params.coins_comm_byte_len];
            cur += params.coins_comm_byte_len;
            let c2 = payload[cur..cur + params.comm_byte_len].to_vec();
            cur += params.comm_byte_len;

            let perm = XofStream::with_domain(perm_seed, crate::round::DOMAIN_PERM)
                .read_permutation(params.n);
            let y = y_tilde.apply_inverse_perm(&perm);
            let hy = h.syndrome(&y);
            let c0 = shake_digest(&[coins0, perm_seed, hy.as_bytes()], params.comm_byte_len);
            let c1 = shake_digest(&[coins1, y_tilde.as_bytes()], params.comm_byte_len);

            Some((Some(c0), Some(c1), Some(c2), cur))
        }
        1 => {
            let needed = n_bytes + params.seed_perm_byte_len + 2 * params.coins_comm_byte_len
                + params.comm_byte_len;
            if payload.len() < needed {
                return None;
            }
            let mut cur = 0;
            let v = Bitvec::from_bytes(params.n, payload[cur..cur + n_bytes].to_vec()).ok()?;
            cur += n_bytes;
            let perm_seed = &payload[cur..cur + params.seed_perm_byte_len];
            cur += params.seed_perm_byte_len;
            let coins0 = &payload[cur..cur + params.coins_comm_byte_len];
            cur += params.coins_comm_byte_len;
            let coins2 = &payload[cur..cur + params.coins_comm_byte_len];
            cur += params.coins_comm_byte_len;
            let c1 = payload[cur..cur + params.comm_byte_len].to_vec();
            cur += params.comm_byte_len;

            let perm = XofStream::with_domain(perm_seed, crate::round::DOMAIN_PERM)
                .read_permutation(params.n);
            let y_xor_e = v.apply_inverse_perm(&perm);
            let hy_xor_s = h.syndrome(&y_xor_e).xor(&pk.syndrome);
            let c0 = shake_digest(
                &[coins0, perm_seed, hy_xor_s.as_bytes()],
                params.comm_byte_len,
            );
            let c2 = shake_digest(&[coins2, v.as_bytes()], params.comm_byte_len);

            Some((Some(c0), Some(c1), Some(c2), cur))
        }
        2 => {
            let needed = 2 * n_bytes + 2 * params.coins_comm_byte_len + params.comm_byte_len;
            if payload.len() < needed {
                return None;
            }
            let mut cur = 0;
            let y_tilde = Bitvec::from_bytes(params.n, payload[cur..cur + n_bytes].to_vec())
                .ok()?;
            cur += n_bytes;
            let e_tilde = Bitvec::from_bytes(params.n, payload[cur..cur + n_bytes].to_vec())
                .ok()?;
            cur += n_bytes;
            let coins1 = &payload[cur..cur + params.coins_comm_byte_len];
            cur += params.coins_comm_byte_len;
            let coins2 = &payload[cur..cur + params.coins_comm_byte_len];
            cur += params.coins_comm_byte_len;
            let c0 = payload[cur..cur + params.comm_byte_len].to_vec();
            cur += params.comm_byte_len;

            let weight_ok = e_tilde.weight() as usize == params.w;
            let c1 = shake_digest(&[coins1, y_tilde.as_bytes()], params.comm_byte_len);
            let y_xor_e = y_tilde.xor(&e_tilde);
            let c2 = shake_digest(&[coins2, y_xor_e.as_bytes()], params.comm_byte_len);

            if weight_ok {
                Some((Some(c0), Some(c1), Some(c2), cur))
            } else {
                Some((None, Some(c1), Some(c2), cur))
            }
        }
        _ => None,
    }
}

/// Constant-time byte-wise equality: every byte is always compared, and the
/// result is folded through OR rather than short-circuited.
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::keypair;
    use crate::signer::sign;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_params() -> Params {
        Params::new(64, 24, 20, 16, 32, 16, 24, 24, 16, 16, 32)
    }

    #[test]
    fn honest_signature_verifies() {
        let params = small_params();
        let mut rng = StdRng::seed_from_u64(42);
        let kp = keypair(&params, &mut rng).unwrap();
        let sig = sign(&params, &kp.h, &kp.sk, b"hello world").unwrap();
        assert!(verify(&params, &kp.h, &kp.pk, b"hello world", &sig).unwrap());
    }

    #[test]
    fn wrong_message_rejects() {
        let params = small_params();
        let mut rng = StdRng::seed_from_u64(42);
        let kp = keypair(&params, &mut rng).unwrap();
        let sig = sign(&params, &kp.h, &kp.sk, b"hello world").unwrap();
        assert!(!verify(&params, &kp.h, &kp.pk, b"goodbye world", &sig).unwrap());
    }

    #[test]
    fn flipped_signature_byte_rejects() {
        let params = small_params();
        let mut rng = StdRng::seed_from_u64(42);
        let kp = keypair(&params, &mut rng).unwrap();
        let mut sig = sign(&params, &kp.h, &kp.sk, b"hello world").unwrap();
        sig[0] ^= 0x01;
        assert!(!verify(&params, &kp.h, &kp.pk, b"hello world", &sig).unwrap());
    }

    #[test]
    fn wrong_public_key_rejects() {
        let params = small_params();
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let kp_a = keypair(&params, &mut rng_a).unwrap();
        let kp_b = keypair(&params, &mut rng_b).unwrap();
        let sig = sign(&params, &kp_a.h, &kp_a.sk, b"hello world").unwrap();
        assert!(!verify(&params, &kp_a.h, &kp_b.pk, b"hello world", &sig).unwrap());
    }

    #[test]
    fn truncated_signature_is_an_error() {
        let params = small_params();
        let mut rng = StdRng::seed_from_u64(42);
        let kp = keypair(&params, &mut rng).unwrap();
        let sig = sign(&params, &kp.h, &kp.sk, b"hello world").unwrap();
        let err = verify(&params, &kp.h, &kp.pk, b"hello world", &sig[..sig.len() - 1])
            .unwrap_err();
        assert_eq!(
            err,
            LsfsError::SignatureTooShort {
                expected: params.sig_byte_len(),
                actual: sig.len() - 1
            }
        );
    }
}
