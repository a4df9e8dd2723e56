//! Dataset fingerprinting.

use sha2::{Digest, Sha256};

/// SHA-256 over the source files' bytes, in load order.
///
/// Identifies which snapshot a process is serving; surfaced at startup and
/// by the health endpoint.
pub fn dataset_fingerprint<B: AsRef<[u8]>>(parts: &[B]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_ref());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_consistency() {
        let a = dataset_fingerprint(&[b"encounters".as_slice(), b"claims".as_slice()]);
        let b = dataset_fingerprint(&[b"encounters".as_slice(), b"claims".as_slice()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_is_order_sensitive() {
        let a = dataset_fingerprint(&[b"encounters".as_slice(), b"claims".as_slice()]);
        let b = dataset_fingerprint(&[b"claims".as_slice(), b"encounters".as_slice()]);
        assert_ne!(a, b);
    }
}
