use thiserror::Error;

/// Errors surfaced by the lsfs signature core.
///
/// Verification failures are *not* represented here: per the scheme's error
/// handling policy, a well-formed signature that simply fails to verify is a
/// `Ok(false)` result, not an `Err`. Variants below are reserved for
/// precondition violations and resource failures that prevent an operation
/// from running at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LsfsError {
    #[error("entropy source unavailable")]
    EntropyFailure,

    #[error("buffer too small: expected at least {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("signed message shorter than signature length: expected at least {expected} bytes, got {actual}")]
    SignatureTooShort { expected: usize, actual: usize },

    #[error("signature payload overflowed the fixed signature length: limit {limit} bytes, needed {needed}")]
    SignatureOverflow { limit: usize, needed: usize },
}

pub type LsfsResult<T> = Result<T, LsfsError>;
