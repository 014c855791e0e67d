//! Hash codec.
//!
//! Manifests carry hashes as raw bytes; everything downstream keys on their
//! lowercase hex form.

use serde::{Deserialize, Serialize};

/// Encode a raw hash as lowercase hex, two digits per byte in array order.
///
/// Absent and zero-length input both map to the empty string.
///
/// # Example
///
/// ```
/// use cytrus_schema::encode_hash;
///
/// assert_eq!(encode_hash(Some(&[0x0a, 0xff])), "0aff");
/// assert_eq!(encode_hash(None), "");
/// ```
pub fn encode_hash(raw: Option<&[u8]>) -> String {
    raw.map(hex::encode).unwrap_or_default()
}

/// Newtype for a content hash in canonical lowercase hex form.
///
/// This is the key used for every hash-based lookup: chunk hashes in the
/// chunk index, bundle hashes in CDN paths, and file hashes when verifying
/// existing output. Two hashes are equal iff their hex forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Create a `ContentHash` from an already-encoded hex string.
    ///
    /// The input is lowercased so hashes taken from external sources compare
    /// equal to the ones produced by [`ContentHash::from_raw`].
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            Self(s.to_ascii_lowercase())
        } else {
            Self(s)
        }
    }

    /// Encode raw hash bytes.
    pub fn from_raw(raw: &[u8]) -> Self {
        Self(hex::encode(raw))
    }

    /// Decode back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the inner string is not valid hex.
    pub fn to_raw(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.0)
    }

    /// Return the inner hex string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the hash is empty (encoded from absent or zero-length input).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shard directory used by content-addressed CDN paths: the first two
    /// hex characters, or the whole hash if it is shorter than that.
    pub fn shard(&self) -> &str {
        self.0.get(..2).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ContentHash {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase_and_ordered() {
        assert_eq!(encode_hash(Some(&[0xde, 0xad, 0xbe, 0xef])), "deadbeef");
        assert_eq!(encode_hash(Some(&[0x00, 0x01, 0x10])), "000110");
    }

    #[test]
    fn encode_empty_and_absent() {
        assert_eq!(encode_hash(Some(&[])), "");
        assert_eq!(encode_hash(None), "");
        assert!(ContentHash::from_raw(&[]).is_empty());
    }

    #[test]
    fn encode_length_is_twice_input() {
        let raw: Vec<u8> = (0..=255).collect();
        let encoded = encode_hash(Some(&raw));
        assert_eq!(encoded.len(), raw.len() * 2);
        assert!(encoded.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn encode_deterministic() {
        let raw = [7u8; 20];
        assert_eq!(ContentHash::from_raw(&raw), ContentHash::from_raw(&raw));
        assert_eq!(ContentHash::from_raw(&raw).as_str(), encode_hash(Some(&raw)));
    }

    #[test]
    fn new_normalizes_case() {
        assert_eq!(ContentHash::new("ABcd"), ContentHash::from_raw(&[0xab, 0xcd]));
    }

    #[test]
    fn shard_is_first_two_chars() {
        assert_eq!(ContentHash::new("abcdef").shard(), "ab");
        assert_eq!(ContentHash::new("a").shard(), "a");
        assert_eq!(ContentHash::default().shard(), "");
    }

    #[test]
    fn raw_roundtrip() {
        let raw = [1u8, 2, 3, 250];
        assert_eq!(ContentHash::from_raw(&raw).to_raw().unwrap(), raw);
    }
}
