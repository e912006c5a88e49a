use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Capture archives are named `archive_{D}_{M}_{YYYY}_{H}_{M}.zip` with
/// unpadded fields; zero-padded fields are accepted too.
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^archive_(\d{1,2})_(\d{1,2})_(\d{4})_(\d{1,2})_(\d{1,2})\.zip$")
        .expect("archive name regex should be valid")
});

/// A filename that does not follow the capture naming convention. Fatal for
/// the whole run: the archive directory is assumed homogeneous.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("archive name {0:?} does not match archive_{{D}}_{{M}}_{{YYYY}}_{{H}}_{{M}}.zip")]
pub struct BadArchiveName(pub String);

/// One snapshot archive with the timestamp decoded from its filename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveFile {
    pub path: PathBuf,
    pub captured_at: NaiveDateTime,
}

/// Decode the capture timestamp embedded in an archive filename.
pub fn parse_archive_name(name: &str) -> Result<NaiveDateTime, BadArchiveName> {
    let decode = || {
        let caps = NAME_RE.captures(name)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        let hour: u32 = caps[4].parse().ok()?;
        let minute: u32 = caps[5].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
    };
    decode().ok_or_else(|| BadArchiveName(name.to_string()))
}

/// List `dir` and return its archives in ascending capture order.
///
/// The order depends only on the decoded timestamps (ties broken by
/// filename), never on the directory listing order. Any filename that does
/// not match the naming convention aborts the run.
pub fn sorted_archives(dir: impl AsRef<Path>) -> Result<Vec<ArchiveFile>> {
    let dir = dir.as_ref();
    let mut archives = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing archive dir {:?}", dir))? {
        let entry = entry.with_context(|| format!("listing archive dir {:?}", dir))?;
        let name = entry.file_name().to_string_lossy().to_string();
        let captured_at = parse_archive_name(&name)?;
        archives.push(ArchiveFile {
            path: entry.path(),
            captured_at,
        });
    }
    archives.sort_by(|a, b| {
        a.captured_at
            .cmp(&b.captured_at)
            .then_with(|| a.path.cmp(&b.path))
    });
    debug!(count = archives.len(), dir = %dir.display(), "sorted archives");
    Ok(archives)
}
