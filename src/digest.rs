use std::collections::BTreeMap;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Digest algorithms understood by the manifest format. Variant order matches
/// the ascending lexicographic order of the lowercase tokens, so the derived
/// `Ord` is also the order the algorithms appear in on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

/// The pair every legacy consumer expects. SHA-256 shows up in newer
/// archives and can be requested through `XPIFile::new_with_algorithms`.
pub const DEFAULT_ALGORITHMS: &[DigestAlgorithm] = &[DigestAlgorithm::Md5, DigestAlgorithm::Sha1];

impl DigestAlgorithm {
    pub fn token(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }

    /// Token as it appears in `Digest-Algorithms` and `*-Digest` header lines.
    pub fn header_token(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA1",
            DigestAlgorithm::Sha256 => "SHA256",
        }
    }

    fn digest_data(&self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Md5 => Md5::digest(data).to_vec(),
            DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        }
    }
}

pub type DigestMap = BTreeMap<DigestAlgorithm, Vec<u8>>;

pub fn digest(data: &[u8], algorithms: &[DigestAlgorithm]) -> DigestMap {
    algorithms
        .iter()
        .map(|algo| (*algo, algo.digest_data(data)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const DATA: &[u8] = b"The quick brown fox jumps over the lazy dog";

    #[test]
    fn known_digests() {
        let digests = digest(DATA, &[DigestAlgorithm::Md5, DigestAlgorithm::Sha1, DigestAlgorithm::Sha256]);
        assert_eq!(hex(&digests[&DigestAlgorithm::Md5]), "9e107d9d372bb6826bd81d3542a419d6");
        assert_eq!(hex(&digests[&DigestAlgorithm::Sha1]), "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12");
        assert_eq!(
            hex(&digests[&DigestAlgorithm::Sha256]),
            "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"
        );
    }

    #[test]
    fn only_configured_algorithms() {
        let digests = digest(DATA, DEFAULT_ALGORITHMS);
        assert_eq!(digests.len(), 2);
        assert!(digests.contains_key(&DigestAlgorithm::Md5));
        assert!(digests.contains_key(&DigestAlgorithm::Sha1));
        assert!(!digests.contains_key(&DigestAlgorithm::Sha256));
    }

    #[test]
    fn deterministic() {
        assert_eq!(digest(DATA, DEFAULT_ALGORITHMS), digest(DATA, DEFAULT_ALGORITHMS));
    }

    #[test]
    fn token_order_matches_variant_order() {
        let mut tokens = [
            DigestAlgorithm::Sha256.token(),
            DigestAlgorithm::Md5.token(),
            DigestAlgorithm::Sha1.token(),
        ];
        tokens.sort();
        assert_eq!(tokens, ["md5", "sha1", "sha256"]);
        assert!(DigestAlgorithm::Md5 < DigestAlgorithm::Sha1);
        assert!(DigestAlgorithm::Sha1 < DigestAlgorithm::Sha256);
    }

    fn hex(data: &[u8]) -> String {
        data.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
