//! Package loading
//!
//! A DOCX file is a ZIP archive of parts. The loader reads every entry
//! into memory in archive order and keeps the raw bytes untouched; only
//! the main document part is ever parsed or edited. Archive order is
//! recorded so the rebuilt package lists its parts the same way.

use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use crate::error::FillError;

/// The part every fillable package must contain
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Relationship table for the main document part
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

/// One archive entry, bytes verbatim
#[derive(Debug, Clone)]
pub struct PackagePart {
    /// Full path within the archive
    pub name: String,
    /// Raw stored bytes
    pub data: Vec<u8>,
    /// True for a directory entry (kept so the rebuild can re-emit it)
    pub is_dir: bool,
}

/// An in-memory DOCX package, parts in archive order
#[derive(Debug)]
pub struct DocxPackage {
    parts: Vec<PackagePart>,
}

impl DocxPackage {
    /// Read every entry of the archive, in order
    ///
    /// Fails if the bytes are not a readable ZIP archive or if the main
    /// document part is missing.
    pub fn open(bytes: &[u8]) -> Result<Self, FillError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let name = entry.name().to_string();
            let is_dir = entry.is_dir();
            let mut data = Vec::with_capacity(entry.size() as usize);
            if !is_dir {
                entry.read_to_end(&mut data)?;
            }
            parts.push(PackagePart { name, data, is_dir });
        }

        let package = DocxPackage { parts };
        if package.part(DOCUMENT_PART).is_none() {
            return Err(FillError::Package(format!(
                "package has no {DOCUMENT_PART} part"
            )));
        }
        debug!(parts = package.parts.len(), "opened package");
        Ok(package)
    }

    /// Bytes of a part, or None if the package has no part by that name
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| !p.is_dir && p.name == name)
            .map(|p| p.data.as_slice())
    }

    /// All parts, in archive order
    pub fn parts(&self) -> &[PackagePart] {
        &self.parts
    }
}
