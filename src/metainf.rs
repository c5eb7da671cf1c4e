//! Reserved META-INF entry names.
//!
//! The client makes some pretty reasonable assumptions about there being a
//! single signature on any given archive, so every pre-existing manifest or
//! signature file is disposed of, both when building a manifest and when
//! copying entries into a signed archive.

pub const MANIFEST_PATH: &str = "META-INF/manifest.mf";
pub const IDS_PATH: &str = "META-INF/ids.json";
pub const METAINF_DIR: &str = "META-INF";

const RESERVED_PATTERNS: [&str; 5] = [
    "META-INF/MANIFEST.MF",
    "META-INF/*.SF",
    "META-INF/*.RSA",
    "META-INF/*.DSA",
    "META-INF/IDS.JSON",
];

/// True for entry names that must never survive into a manifest or a signed
/// archive. Matching is done upper case against upper case patterns to rule
/// out case sensitivity bugs (see https://bugzil.la/1169574).
pub fn is_reserved_metainf_name(name: &str) -> bool {
    let upper = name.to_uppercase();
    RESERVED_PATTERNS
        .iter()
        .any(|pattern| wildcard_match(pattern.as_bytes(), upper.as_bytes()))
}

/// Minimal fnmatch-style matcher: `*` spans any run of bytes, separators
/// included, everything else matches literally.
fn wildcard_match(pattern: &[u8], name: &[u8]) -> bool {
    let mut p = 0;
    let mut n = 0;
    let mut star: Option<usize> = None;
    let mut mark = 0;
    while n < name.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            star = Some(p);
            mark = n;
            p += 1;
        } else if p < pattern.len() && pattern[p] == name[n] {
            p += 1;
            n += 1;
        } else if let Some(s) = star {
            mark += 1;
            n = mark;
            p = s + 1;
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == b'*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reserved_names_rejected() {
        assert!(is_reserved_metainf_name("META-INF/manifest.mf"));
        assert!(is_reserved_metainf_name("META-INF/mozilla.sf"));
        assert!(is_reserved_metainf_name("META-INF/mozilla.rsa"));
        assert!(is_reserved_metainf_name("META-INF/zigbert.dsa"));
        assert!(is_reserved_metainf_name("META-INF/ids.json"));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(is_reserved_metainf_name("meta-inf/manifest.mf"));
        assert!(is_reserved_metainf_name("Meta-Inf/Mozilla.Rsa"));
        assert!(is_reserved_metainf_name("META-INF/MOZILLA.SF"));
    }

    #[test]
    fn ordinary_names_pass() {
        assert!(!is_reserved_metainf_name("manifest.json"));
        assert!(!is_reserved_metainf_name("content.js"));
        assert!(!is_reserved_metainf_name("META-INF/cose.sig"));
        assert!(!is_reserved_metainf_name("sub/META-INF/manifest.mf"));
    }

    #[test]
    fn wildcard_spans_anything() {
        assert!(wildcard_match(b"META-INF/*.SF", b"META-INF/A.B.SF"));
        assert!(wildcard_match(b"META-INF/*.SF", b"META-INF/DEEP/NESTED.SF"));
        assert!(!wildcard_match(b"META-INF/*.SF", b"META-INF/NESTED.SF.BAK"));
        assert!(!wildcard_match(b"*.SF", b""));
        assert!(wildcard_match(b"*", b""));
    }
}
