use crate::parse::SnapshotSet;
use crate::sort::ArchiveFile;
use std::path::PathBuf;
use tracing::info;

/// Scan the chronologically ordered snapshots once and collect the paths of
/// archives whose content is structurally identical to their immediate
/// predecessor.
///
/// Each snapshot is compared only to the one directly before it, so a run
/// of k identical snapshots flags entries 2..k. The first archive has no
/// predecessor and can never be flagged.
pub fn find_duplicates(archives: &[ArchiveFile], snapshots: &[SnapshotSet]) -> Vec<PathBuf> {
    debug_assert_eq!(archives.len(), snapshots.len());
    let mut duplicates = Vec::new();
    let mut previous: Option<&SnapshotSet> = None;
    for (archive, snapshot) in archives.iter().zip(snapshots) {
        if previous == Some(snapshot) {
            info!(archive = %archive.path.display(), "duplicate of predecessor");
            duplicates.push(archive.path.clone());
        }
        previous = Some(snapshot);
    }
    duplicates
}
