//! A single Stern repetition: derives the round's permutation and mask
//! vector from a round seed, computes the three hiding commitments, and
//! retains the secrets needed to later answer whichever challenge symbol
//! the verifier draws.

use crate::bitvec::Bitvec;
use crate::matrix::Matrix;
use crate::params::Params;
use crate::permutation::Permutation;
use crate::xof::XofStream;

const LOG_TARGET: &str = "lsfs::round";

const DOMAIN_ROUND_SEED: &[u8] = b"lsfs/round-seed/v1";
/// Domain tag for deriving a permutation from its seed. Shared with the
/// verifier, which re-derives the same permutation from the disclosed seed.
pub(crate) const DOMAIN_PERM: &[u8] = b"lsfs/round/perm/v1";
const DOMAIN_MASK: &[u8] = b"lsfs/round/mask/v1";
const DOMAIN_COINS0: &[u8] = b"lsfs/round/coins0/v1";
const DOMAIN_COINS1: &[u8] = b"lsfs/round/coins1/v1";
const DOMAIN_COINS2: &[u8] = b"lsfs/round/coins2/v1";

/// Bytes of per-round seed material squeezed before branching into the
/// permutation seed, mask seed, and three coins strings.
const ROUND_SEED_BYTE_LEN: usize = 32;

/// `SHAKE-256(sk ‖ message ‖ round_index)`, giving every round an
/// independent, deterministic source of randomness tied to both the signing
/// key and the message being signed.
fn derive_round_seed(sk: &[u8], message: &[u8], round_index: u32) -> Vec<u8> {
    let mut xof = XofStream::with_domain(
        &[sk, message, &round_index.to_le_bytes()].concat(),
        DOMAIN_ROUND_SEED,
    );
    xof.squeeze(ROUND_SEED_BYTE_LEN)
}

/// Digest a set of byte strings with SHAKE-256 to `out_len` bytes. Used both
/// for per-round commitments (coins bind the opening) and can be reused
/// anywhere a fixed-length hash of several fields is required.
pub fn shake_digest(parts: &[&[u8]], out_len: usize) -> Vec<u8> {
    let mut xof = XofStream::new(&parts.concat());
    xof.squeeze(out_len)
}

/// Everything a completed round needs in order to answer any of the three
/// challenge symbols once the verifier's draw is known.
pub struct RoundSecrets {
    pub perm: Permutation,
    pub perm_seed: Vec<u8>,
    pub y: Bitvec,
    pub e_tilde: Bitvec,
    pub y_tilde: Bitvec,
    pub coins0: Vec<u8>,
    pub coins1: Vec<u8>,
    pub coins2: Vec<u8>,
}

/// The three commitments published for a round, in order.
pub struct RoundCommitments {
    pub c0: Vec<u8>,
    pub c1: Vec<u8>,
    pub c2: Vec<u8>,
}

/// Run one Stern repetition: derive `(π_i, y_i)`, fold in the secret vector
/// `e` and the public syndrome image `H·yᵀ`, and commit to all three views.
pub fn run_round(
    params: &Params,
    h: &Matrix,
    sk: &[u8],
    e: &Bitvec,
    message: &[u8],
    round_index: u32,
) -> (RoundSecrets, RoundCommitments) {
    let round_seed = derive_round_seed(sk, message, round_index);

    let mut perm_xof = XofStream::with_domain(&round_seed, DOMAIN_PERM);
    let perm_seed = perm_xof.squeeze(params.seed_perm_byte_len);
    let perm = XofStream::with_domain(&perm_seed, DOMAIN_PERM).read_permutation(params.n);

    let mut mask_xof = XofStream::with_domain(&round_seed, DOMAIN_MASK);
    let y = mask_xof.read_bits(params.n);

    let mut coins0_xof = XofStream::with_domain(&round_seed, DOMAIN_COINS0);
    let coins0 = coins0_xof.squeeze(params.coins_comm_byte_len);
    let mut coins1_xof = XofStream::with_domain(&round_seed, DOMAIN_COINS1);
    let coins1 = coins1_xof.squeeze(params.coins_comm_byte_len);
    let mut coins2_xof = XofStream::with_domain(&round_seed, DOMAIN_COINS2);
    let coins2 = coins2_xof.squeeze(params.coins_comm_byte_len);

    let hy = h.syndrome(&y);
    let e_tilde = e.apply_perm(&perm);
    let y_tilde = y.apply_perm(&perm);

    let c0 = shake_digest(
        &[coins0.as_slice(), perm_seed.as_slice(), hy.as_bytes()],
        params.comm_byte_len,
    );
    let c1 = shake_digest(
        &[coins1.as_slice(), y_tilde.as_bytes()],
        params.comm_byte_len,
    );
    let y_xor_e = y_tilde.xor(&e_tilde);
    let c2 = shake_digest(
        &[coins2.as_slice(), y_xor_e.as_bytes()],
        params.comm_byte_len,
    );

    tracing::trace!(target: LOG_TARGET, round_index, "committed round");

    (
        RoundSecrets {
            perm,
            perm_seed,
            y,
            e_tilde,
            y_tilde,
            coins0,
            coins1,
            coins2,
        },
        RoundCommitments { c0, c1, c2 },
    )
}
