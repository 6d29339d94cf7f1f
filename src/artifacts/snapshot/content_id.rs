use sha1::{Digest, Sha1};
use std::fmt;

/// SHA-1 content fingerprint.
///
/// Used to prove two file versions equal without re-reading either. The
/// comparator only computes one when file metadata alone cannot settle the
/// question.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContentId([u8; 20]);

impl ContentId {
    /// Fingerprint of a byte buffer. For symlinks the buffer is the link
    /// target path, not the dereferenced content.
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_content_yields_equal_ids() {
        assert_eq!(
            ContentId::of_bytes(b"hello world"),
            ContentId::of_bytes(b"hello world")
        );
    }

    #[test]
    fn different_content_yields_different_ids() {
        assert_ne!(ContentId::of_bytes(b"one"), ContentId::of_bytes(b"two"));
    }

    #[test]
    fn hex_rendering_is_forty_chars() {
        let hex = ContentId::of_bytes(b"anything").to_hex();
        assert_eq!(hex.len(), 40);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
