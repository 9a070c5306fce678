//! Human-facing hex (de)serialization for public keys and signatures.
//!
//! These newtypes are a convenience layer for JSON-speaking callers (the
//! demo binary, tooling); they never change the wire format the
//! cryptographic core works with, which is always raw, fixed-length byte
//! arrays. Mirrors the `0x`-prefixed hex encoding the rest of the workspace
//! uses for opaque byte blobs (see `ledger::serialization::canonical_serialize_hex_prefixed`).

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

fn deserialize_hex<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    hex::decode(s.trim_start_matches("0x")).map_err(DeError::custom)
}

/// A public key (the syndrome `s = H·eᵀ`), encoded as a `0x`-prefixed hex
/// string for JSON output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicKeyHex(#[serde(serialize_with = "serialize_hex", deserialize_with = "deserialize_hex")] Vec<u8>);

impl PublicKeyHex {
    pub fn from_public_key(pk: &crate::keygen::PublicKey) -> Self {
        PublicKeyHex(pk.syndrome_bytes().to_vec())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// A fixed-length signature, encoded as a `0x`-prefixed hex string for JSON
/// output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignatureHex(#[serde(serialize_with = "serialize_hex", deserialize_with = "deserialize_hex")] Vec<u8>);

impl SignatureHex {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        SignatureHex(bytes)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_hex_roundtrips_through_json() {
        let pk = crate::keygen::PublicKey {
            syndrome: crate::bitvec::Bitvec::zeros(16),
        };
        let wrapped = PublicKeyHex::from_public_key(&pk);
        let json = serde_json::to_string(&wrapped).unwrap();
        assert!(json.starts_with("\"0x"));
        let back: PublicKeyHex = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_bytes(), pk.syndrome_bytes());
    }

    #[test]
    fn signature_hex_roundtrips_through_json() {
        let sig = SignatureHex::from_bytes(vec![1, 2, 3, 4]);
        let json = serde_json::to_string(&sig).unwrap();
        let back: SignatureHex = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_bytes(), vec![1, 2, 3, 4]);
    }
}
