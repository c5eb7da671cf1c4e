//! Manifest and signature generation for XPI (ZIP) extension archives.
//!
//! [`XPIFile`] reads an archive, derives the `META-INF/manifest.mf` and
//! signature-file texts an external signer consumes, and reassembles a signed
//! archive around the signature blob the signer hands back. The signing
//! itself is out of scope here; this crate only produces and places bytes.

extern crate md5;
extern crate sha1;
extern crate sha2;
extern crate base64;

use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::{Read, Write};
use std::path::Path;

use zip::{write::FileOptions, ZipArchive, ZipWriter};

pub mod digest;
pub mod entry_order;
pub mod error;
pub mod manifest;
pub mod metainf;

use digest::{digest, DigestAlgorithm, DEFAULT_ALGORITHMS};
use entry_order::{entry_key, is_directory_entry};
use error::{XPIFileError, XPIFileResult};
use manifest::{Manifest, Section, Signature};
use metainf::is_reserved_metainf_name;

/// An XPI file read from disk.
///
/// Represents the archive and its derived manifests, such as would be found
/// in a META-INF directory. The manifest and signature are computed once at
/// construction and never change afterwards; `make_signed` combines them
/// with an externally produced signature into a new archive.
pub struct XPIFile {
    path: Box<Path>,
    ids: Option<Vec<u8>>,
    algorithms: Vec<DigestAlgorithm>,
    manifest: Manifest,
    signatures: Signature,
}

impl XPIFile {
    pub fn new<P: AsRef<Path>>(path: P) -> XPIFileResult<Self> {
        Self::new_with_algorithms(path, None, DEFAULT_ALGORITHMS)
    }

    /// `ids` is an opaque identity-mapping document embedded verbatim as
    /// `META-INF/ids.json` and digested like any other entry.
    pub fn new_with_ids<P: AsRef<Path>>(path: P, ids: Vec<u8>) -> XPIFileResult<Self> {
        Self::new_with_algorithms(path, Some(ids), DEFAULT_ALGORITHMS)
    }

    pub fn new_with_algorithms<P: AsRef<Path>>(
        path: P,
        ids: Option<Vec<u8>>,
        algorithms: &[DigestAlgorithm],
    ) -> XPIFileResult<Self> {
        let path = path.as_ref();
        let mut zin = ZipArchive::new(File::open(path)?)?;

        // Directories and pre-existing signature files never get a section.
        let mut names: Vec<String> = zin
            .file_names()
            .filter(|name| !is_directory_entry(name) && !is_reserved_metainf_name(name))
            .map(str::to_owned)
            .collect();
        names.sort_by_key(|name| entry_key(name));

        let mut sections = Vec::with_capacity(names.len() + 1);
        for name in names {
            let mut entry = zin.by_name(&name)?;
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            sections.push(Section::new(name, digest(&data, algorithms)));
        }
        if let Some(ids) = &ids {
            // Appended after the ordered entries, never sorted into place.
            sections.push(Section::new(metainf::IDS_PATH, digest(ids, algorithms)));
        }
        let manifest = Manifest::new(sections);

        // The signature file carries digests of the individual manifest
        // sections and of the whole serialized manifest text.
        let digest_manifests = digest(&manifest.to_bytes(), algorithms);
        let signature_sections = manifest
            .sections()
            .iter()
            .map(|section| Section::new(section.name(), digest(&section.to_bytes(), algorithms)))
            .collect();
        let signatures = Signature::new(signature_sections, digest_manifests);

        Ok(Self {
            path: Box::from(path),
            ids,
            algorithms: algorithms.to_vec(),
            manifest,
            signatures,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ids(&self) -> Option<&[u8]> {
        self.ids.as_deref()
    }

    pub fn algorithms(&self) -> &[DigestAlgorithm] {
        &self.algorithms
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Serialized `META-INF/manifest.mf` text.
    pub fn manifest_bytes(&self) -> Vec<u8> {
        self.manifest.to_bytes()
    }

    /// The full per-section signature structure.
    pub fn signatures(&self) -> &Signature {
        &self.signatures
    }

    /// The text an external signer signs: only the `*-Digest-Manifest`
    /// header block, without the individual section records.
    pub fn signature(&self) -> Vec<u8> {
        self.signatures.to_bytes()
    }

    /// Write a signed copy of the archive to `outpath`.
    ///
    /// `sigpath` names the signature file pair; any directory component and
    /// extension are stripped, so `"mozilla.rsa"` yields
    /// `META-INF/mozilla.rsa` and `META-INF/mozilla.sf`. `signed_manifest`
    /// is the externally signed form of [`XPIFile::signature`] and
    /// `signature` the detached PKCS7 blob over it. Never overwrites an
    /// existing file.
    pub fn make_signed<P: AsRef<Path>>(
        &self,
        outpath: P,
        sigpath: &str,
        signed_manifest: &[u8],
        signature: &[u8],
    ) -> XPIFileResult<()> {
        let outpath = outpath.as_ref();
        if outpath.as_os_str().is_empty() {
            return Err(XPIFileError::NoOutputPath);
        }
        if outpath.exists() {
            return Err(XPIFileError::FileAlreadyExists);
        }
        let sigbase = Path::new(sigpath)
            .file_stem()
            .and_then(OsStr::to_str)
            .filter(|stem| !stem.is_empty())
            .map(|stem| format!("{}/{}", metainf::METAINF_DIR, stem))
            .ok_or(XPIFileError::InvalidSignatureName)?;

        let mut zin = ZipArchive::new(File::open(self.path.as_ref())?)?;
        // create_new keeps the existence check above race free.
        let out = File::options().write(true).create_new(true).open(outpath)?;
        let mut zout = ZipWriter::new(out);

        // The PKCS7 file ("foo.rsa") must be the first entry in the archive
        // so the client can validate it before streaming the rest.
        zout.start_file(format!("{}.rsa", sigbase), FileOptions::default())?;
        zout.write_all(signature)?;
        for i in 0..zin.len() {
            let entry = zin.by_index_raw(i)?;
            // Superseded signature and manifest files are dropped.
            if is_reserved_metainf_name(entry.name()) {
                continue;
            }
            zout.raw_copy_file(entry)?;
        }
        zout.start_file(metainf::MANIFEST_PATH, FileOptions::default())?;
        zout.write_all(&self.manifest.to_bytes())?;
        zout.start_file(format!("{}.sf", sigbase), FileOptions::default())?;
        zout.write_all(signed_manifest)?;
        if let Some(ids) = &self.ids {
            zout.start_file(metainf::IDS_PATH, FileOptions::default())?;
            zout.write_all(ids)?;
        }
        zout.finish()?;
        Ok(())
    }
}
