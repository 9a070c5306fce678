//! End-to-end signing: drive `t` rounds, bind them into a Fiat-Shamir
//! challenge, and serialize the per-round responses into a fixed-length
//! signature.

use crate::error::{LsfsError, LsfsResult};
use crate::keygen::SecretKey;
use crate::matrix::Matrix;
use crate::params::Params;
use crate::round::{run_round, RoundCommitments, RoundSecrets};
use crate::transcript::ChallengeTranscript;
use crate::xof::XofStream;

const LOG_TARGET: &str = "lsfs::signer";

const DOMAIN_CHALLENGE_EXPAND: &[u8] = b"lsfs/challenge-expand/v1";

/// Produce a signature over `message` under `sk`, against the parity-check
/// matrix `h` that `sk`'s keypair was generated with.
pub fn sign(params: &Params, h: &Matrix, sk: &SecretKey, message: &[u8]) -> LsfsResult<Vec<u8>> {
    let e = sk.secret_vector(params);

    let mut secrets: Vec<RoundSecrets> = Vec::with_capacity(params.t);
    let mut commitments: Vec<RoundCommitments> = Vec::with_capacity(params.t);
    for i in 0..params.t {
        let (s, c) = run_round(params, h, sk.seed_bytes(), &e, message, i as u32);
        secrets.push(s);
        commitments.push(c);
    }

    let mut transcript = ChallengeTranscript::new(message);
    for c in &commitments {
        transcript.append_round(&c.c0, &c.c1, &c.c2);
    }
    let transcript_bytes = transcript.finish();
    let ch_hash =
        crate::round::shake_digest(&[transcript_bytes.as_slice()], params.ch_hash_byte_len);

    let challenge = expand_challenge(&ch_hash, params.t);

    let mut sig = Vec::with_capacity(params.sig_byte_len());
    sig.extend_from_slice(&ch_hash);

    for i in 0..params.t {
        append_round_payload(&mut sig, &secrets[i], &commitments[i], challenge[i]);
    }

    if sig.len() > params.sig_byte_len() {
        return Err(LsfsError::SignatureOverflow {
            limit: params.sig_byte_len(),
            needed: sig.len(),
        });
    }
    sig.resize(params.sig_byte_len(), 0);

    tracing::debug!(target: LOG_TARGET, t = params.t, sig_len = sig.len(), "signed message");

    Ok(sig)
}

/// Expand the challenge digest into `t` symbols in `{0, 1, 2}`.
pub fn expand_challenge(ch_hash: &[u8], t: usize) -> Vec<u8> {
    let mut xof = XofStream::with_domain(ch_hash, DOMAIN_CHALLENGE_EXPAND);
    (0..t).map(|_| xof.read_uniform_below(3) as u8).collect()
}

fn append_round_payload(
    sig: &mut Vec<u8>,
    secrets: &RoundSecrets,
    commitments: &RoundCommitments,
    b: u8,
) {
    match b {
        0 => {
            sig.extend_from_slice(secrets.y_tilde.as_bytes());
            sig.extend_from_slice(&secrets.perm_seed);
            sig.extend_from_slice(&secrets.coins0);
            sig.extend_from_slice(&secrets.coins1);
            sig.extend_from_slice(&commitments.c2);
        }
        1 => {
            let v = secrets.y_tilde.xor(&secrets.e_tilde);
            sig.extend_from_slice(v.as_bytes());
            sig.extend_from_slice(&secrets.perm_seed);
            sig.extend_from_slice(&secrets.coins0);
            sig.extend_from_slice(&secrets.coins2);
            sig.extend_from_slice(&commitments.c1);
        }
        2 => {
            sig.extend_from_slice(secrets.y_tilde.as_bytes());
            sig.extend_from_slice(secrets.e_tilde.as_bytes());
            sig.extend_from_slice(&secrets.coins1);
            sig.extend_from_slice(&secrets.coins2);
            sig.extend_from_slice(&commitments.c0);
        }
        _ => unreachable!("read_uniform_below(3) never returns a value outside {{0,1,2}}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::keypair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_params() -> Params {
        Params::new(64, 24, 20, 8, 32, 16, 24, 24, 16, 16, 32)
    }

    #[test]
    fn signature_has_the_fixed_length() {
        let params = small_params();
        let mut rng = StdRng::seed_from_u64(9);
        let kp = keypair(&params, &mut rng).unwrap();
        let sig = sign(&params, &kp.h, &kp.sk, b"hello world").unwrap();
        assert_eq!(sig.len(), params.sig_byte_len());
    }

    #[test]
    fn signing_is_deterministic_per_message() {
        let params = small_params();
        let mut rng = StdRng::seed_from_u64(9);
        let kp = keypair(&params, &mut rng).unwrap();
        let sig_a = sign(&params, &kp.h, &kp.sk, b"hello world").unwrap();
        let sig_b = sign(&params, &kp.h, &kp.sk, b"hello world").unwrap();
        assert_eq!(sig_a, sig_b);
    }

    #[test]
    fn different_messages_give_different_signatures() {
        let params = small_params();
        let mut rng = StdRng::seed_from_u64(9);
        let kp = keypair(&params, &mut rng).unwrap();
        let sig_a = sign(&params, &kp.h, &kp.sk, b"hello world").unwrap();
        let sig_b = sign(&params, &kp.h, &kp.sk, b"goodbye world").unwrap();
        assert_ne!(sig_a, sig_b);
    }
}
