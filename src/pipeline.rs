use crate::archive;
use crate::parse::{self, SnapshotSet};
use crate::sort::ArchiveFile;
use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::instrument;

/// Read one archive and parse its entries. Pure function of the path; the
/// unit of work the pool fans out.
#[instrument(level = "info", skip(archive), fields(archive = %archive.path.display()))]
fn parse_one(archive: &ArchiveFile) -> Result<SnapshotSet> {
    let docs = archive::read_archive(&archive.path)?;
    Ok(parse::parse_snapshot(&docs))
}

/// Parse every archive on a dedicated pool of `workers` threads.
///
/// Results are collected index-addressed: `result[i]` always corresponds to
/// `archives[i]` no matter which worker finishes first. Archive-level I/O
/// errors are not absorbed; the first one aborts the run.
pub fn parse_archives(archives: &[ArchiveFile], workers: usize) -> Result<Vec<SnapshotSet>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("building parse worker pool")?;
    pool.install(|| archives.par_iter().map(parse_one).collect())
}
