use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Write the ordered duplicate path list as a pretty-printed JSON array of
/// strings, overwriting any existing file at `path`.
pub fn write_duplicates(path: impl AsRef<Path>, duplicates: &[PathBuf]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {:?}", parent))?;
        }
    }
    let strings: Vec<String> = duplicates
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect();
    let file = File::create(path).with_context(|| format!("creating report file {:?}", path))?;
    serde_json::to_writer_pretty(file, &strings)
        .with_context(|| format!("writing report file {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_the_path_list() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("report").join("dups.json");
        let dups = vec![
            PathBuf::from("archives/archive_2_1_2021_0_0.zip"),
            PathBuf::from("archives/archive_3_1_2021_0_0.zip"),
        ];
        write_duplicates(&out, &dups)?;
        let read: Vec<String> = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(
            read,
            vec![
                "archives/archive_2_1_2021_0_0.zip",
                "archives/archive_3_1_2021_0_0.zip",
            ]
        );
        Ok(())
    }

    #[test]
    fn overwrites_existing_file() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("dups.json");
        fs::write(&out, "stale contents")?;
        write_duplicates(&out, &[])?;
        let read: Vec<String> = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert!(read.is_empty());
        Ok(())
    }
}
