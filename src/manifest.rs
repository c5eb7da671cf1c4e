use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::digest::DigestMap;

const VERSION: &str = "1.0";

// A JAR manifest header line is folded at 72 bytes of its UTF-8 encoding,
// with a single continuation space on the next line. Consumers that do not
// unfold silently corrupt longer names, so the width is mandatory.
// See https://bugzilla.mozilla.org/show_bug.cgi?id=841569#c35
const NAME_LINE_WIDTH: usize = 72;

/// One named digest record inside a [`Manifest`] or [`Signature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    digests: DigestMap,
}

impl Section {
    pub fn new<S: Into<String>>(name: S, digests: DigestMap) -> Self {
        Self { name: name.into(), digests }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn digests(&self) -> &DigestMap {
        &self.digests
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_into(&mut buf);
        buf
    }

    // Placement of the line breaks here is sensitive and should not be
    // changed without reading through the JAR manifest format notes:
    // http://docs.oracle.com/javase/7/docs/technotes/guides/jar/jar.html
    pub(crate) fn write_into(&self, buf: &mut Vec<u8>) {
        let name_line = format!("Name: {}", self.name);
        let mut rest = name_line.as_bytes();
        while rest.len() > NAME_LINE_WIDTH {
            buf.extend_from_slice(&rest[..NAME_LINE_WIDTH]);
            buf.extend_from_slice(b"\n ");
            rest = &rest[NAME_LINE_WIDTH..];
        }
        buf.extend_from_slice(rest);
        buf.push(b'\n');
        let tokens: Vec<&str> = self.digests.keys().map(|algo| algo.header_token()).collect();
        buf.extend_from_slice(b"Digest-Algorithms: ");
        buf.extend_from_slice(tokens.join(" ").as_bytes());
        buf.push(b'\n');
        for (algo, value) in &self.digests {
            buf.extend_from_slice(algo.header_token().as_bytes());
            buf.extend_from_slice(b"-Digest: ");
            buf.extend_from_slice(BASE64.encode(value).as_bytes());
            buf.push(b'\n');
        }
    }
}

/// Digest records of every qualifying archive entry, in manifest order.
///
/// Older versions of Firefox crash if a JAR manifest style file does not end
/// in a blank line ("\n\n"), see
/// https://bugzilla.mozilla.org/show_bug.cgi?id=1158467 — `to_bytes` always
/// terminates the text that way, even with no sections at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    sections: Vec<Section>,
}

impl Manifest {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn header(&self) -> Vec<u8> {
        format!("Manifest-Version: {}", VERSION).into_bytes()
    }

    pub fn body(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut first = true;
        for section in &self.sections {
            if !first {
                buf.push(b'\n');
            }
            first = false;
            section.write_into(&mut buf);
        }
        buf
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.header();
        buf.extend_from_slice(b"\n\n");
        buf.extend_from_slice(&self.body());
        buf.push(b'\n');
        buf
    }
}

/// Digests-of-digests over a [`Manifest`]: one section per manifest section,
/// plus digests of the whole serialized manifest text. Only the aggregate
/// `*-Digest-Manifest` header is ever emitted — multiple signatures on one
/// archive are not supported, so the per-section records stay internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    sections: Vec<Section>,
    digest_manifests: DigestMap,
}

impl Signature {
    pub fn new(sections: Vec<Section>, digest_manifests: DigestMap) -> Self {
        Self { sections, digest_manifests }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn digest_manifests(&self) -> &DigestMap {
        &self.digest_manifests
    }

    pub fn header(&self) -> Vec<u8> {
        let mut buf = format!("Signature-Version: {}\n", VERSION).into_bytes();
        for (algo, value) in &self.digest_manifests {
            buf.extend_from_slice(algo.header_token().as_bytes());
            buf.extend_from_slice(b"-Digest-Manifest: ");
            buf.extend_from_slice(BASE64.encode(value).as_bytes());
            buf.push(b'\n');
        }
        buf
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.header();
        buf.push(b'\n');
        buf
    }
}
