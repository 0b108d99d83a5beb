//! Part-file lifecycle for a single download.
//!
//! The body streams sequentially into `<name>.part` inside the output
//! directory; a successful, validated download is fsynced and atomically
//! renamed to its final name, while a failed one is discarded so no partial
//! or empty file is left behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffix for in-progress downloads.
pub const PART_SUFFIX: &str = ".part";

/// Sequential writer for an in-progress download.
pub struct PartWriter {
    file: File,
    part_path: PathBuf,
    dir: PathBuf,
    bytes: u64,
}

impl PartWriter {
    /// Create `<dir>/<stem>.part`, truncating any leftover from a previous
    /// run. The output directory is created if absent.
    pub fn create(dir: &Path, stem: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let part_path = dir.join(format!("{stem}{PART_SUFFIX}"));
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&part_path)?;
        Ok(Self {
            file,
            part_path,
            dir: dir.to_path_buf(),
            bytes: 0,
        })
    }

    /// Append a chunk of the response body.
    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.bytes += data.len() as u64;
        Ok(())
    }

    /// Bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    /// Sync to disk and atomically rename the part file to `filename` inside
    /// the output directory. Returns the final path.
    pub fn finalize(self, filename: &str) -> io::Result<PathBuf> {
        self.file.sync_all()?;
        let final_path = self.dir.join(filename);
        drop(self.file);
        fs::rename(&self.part_path, &final_path)?;
        Ok(final_path)
    }

    /// Remove the part file. Used when validation fails so nothing is left
    /// in the output directory for this URL.
    pub fn discard(self) {
        drop(self.file);
        if let Err(e) = fs::remove_file(&self.part_path) {
            tracing::warn!("failed to remove {}: {}", self.part_path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_write_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = PartWriter::create(dir.path(), "out.bin").unwrap();
        w.write(b"hello ").unwrap();
        w.write(b"world").unwrap();
        assert_eq!(w.bytes_written(), 11);

        let final_path = w.finalize("out.bin").unwrap();
        assert_eq!(final_path, dir.path().join("out.bin"));
        assert!(!dir.path().join("out.bin.part").exists());
        assert_eq!(fs::read(&final_path).unwrap(), b"hello world");
    }

    #[test]
    fn finalize_under_a_different_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = PartWriter::create(dir.path(), "guessed").unwrap();
        w.write(b"data").unwrap();
        let final_path = w.finalize("from-content-disposition.zip").unwrap();
        assert!(final_path.ends_with("from-content-disposition.zip"));
        assert!(final_path.exists());
        assert!(!dir.path().join("guessed.part").exists());
    }

    #[test]
    fn discard_removes_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = PartWriter::create(dir.path(), "doomed.bin").unwrap();
        w.write(b"partial").unwrap();
        let part = dir.path().join("doomed.bin.part");
        assert!(part.exists());
        w.discard();
        assert!(!part.exists());
    }

    #[test]
    fn create_makes_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let w = PartWriter::create(&nested, "x").unwrap();
        assert!(nested.join("x.part").exists());
        w.discard();
    }
}
