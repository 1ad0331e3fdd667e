//! DOCX container handling: ZIP in, ZIP out, parts untouched in between

pub mod loader;
pub mod rebuilder;

pub use loader::{DocxPackage, PackagePart, DOCUMENT_PART, DOCUMENT_RELS_PART};
pub use rebuilder::rebuild_package;
