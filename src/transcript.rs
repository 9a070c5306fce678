//! Builds the exact byte string the Fiat-Shamir challenge hash is computed
//! over: `message ‖ c0_0 ‖ c1_0 ‖ c2_0 ‖ … ‖ c0_{t-1} ‖ c1_{t-1} ‖ c2_{t-1}`.
//!
//! Unlike a general-purpose transcript builder this performs no internal
//! length-prefixing: every field here is already a fixed, known-length
//! commitment digest, so plain concatenation is unambiguous and matches
//! the protocol definition exactly.

pub struct ChallengeTranscript {
    buffer: Vec<u8>,
}

impl ChallengeTranscript {
    pub fn new(message: &[u8]) -> Self {
        ChallengeTranscript {
            buffer: message.to_vec(),
        }
    }

    pub fn append_round(&mut self, c0: &[u8], c1: &[u8], c2: &[u8]) {
        self.buffer.extend_from_slice(c0);
        self.buffer.extend_from_slice(c1);
        self.buffer.extend_from_slice(c2);
    }

    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }
}
