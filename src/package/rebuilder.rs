//! Package rebuilding
//!
//! Writes a fresh archive containing every loaded part in its original
//! order. The edited document part is swapped in; every other part is
//! emitted byte for byte as it was read. Parts are recompressed with
//! deflate, so the container bytes may differ while the part contents do
//! not.

use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::FillError;
use crate::package::loader::{DocxPackage, DOCUMENT_PART};

/// Rebuild the package with `document_xml` as the main document part
pub fn rebuild_package(
    package: &DocxPackage,
    document_xml: &[u8],
) -> Result<Vec<u8>, FillError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for part in package.parts() {
        if part.is_dir {
            writer.add_directory(part.name.trim_end_matches('/'), options)?;
            continue;
        }
        writer.start_file(&part.name, options)?;
        if part.name == DOCUMENT_PART {
            writer.write_all(document_xml)?;
        } else {
            writer.write_all(&part.data)?;
        }
    }

    let bytes = writer.finish()?.into_inner();
    debug!(bytes = bytes.len(), "rebuilt package");
    Ok(bytes)
}
