use std::env;
use std::path::PathBuf;

/// Process-wide settings, built once at startup and threaded through the
/// pipeline rather than read ambiently.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding the snapshot archives.
    pub archive_dir: PathBuf,
    /// File the duplicate path list is written to (overwritten if present).
    pub output_path: PathBuf,
    /// Upper bound on concurrently parsed archives.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_dir: PathBuf::from("archives"),
            output_path: PathBuf::from("archives_to_remove.json"),
            workers: 6,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            archive_dir: env::var("SNAPDUP_ARCHIVE_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.archive_dir),
            output_path: env::var("SNAPDUP_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(default.output_path),
            workers: env::var("SNAPDUP_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.workers),
        }
    }
}
