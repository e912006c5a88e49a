use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// One archive entry as extracted, before any interpretation.
#[derive(Clone, Debug)]
pub struct RawDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Open a snapshot archive and buffer every entry into memory, preserving
/// the container's internal listing order.
///
/// Entries are bzip2-compressed; the matching decoder comes from the `zip`
/// crate's bzip2 feature. A missing file or corrupt container is not
/// recoverable here and propagates.
pub fn read_archive(path: impl AsRef<Path>) -> Result<Vec<RawDocument>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open archive {:?}", path))?;
    let mut archive =
        ZipArchive::new(file).with_context(|| format!("failed to read archive {:?}", path))?;

    let mut docs = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("failed to access entry #{} in {:?}", i, path))?;
        if !entry.is_file() {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .with_context(|| format!("failed to read {} from {:?}", name, path))?;
        docs.push(RawDocument { name, bytes });
    }
    Ok(docs)
}
