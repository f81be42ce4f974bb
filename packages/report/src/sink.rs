//! Destinations for finished report files.

use std::path::{Path, PathBuf};

use crate::ReportError;

/// Somewhere a finished report can be written.
pub trait FileSink {
    /// Stores `bytes` under `file_name` and returns where it ended up.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the file cannot be written.
    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError>;
}

/// Writes reports into a directory.
///
/// The file is first written next to its destination with a `.part` suffix
/// and renamed into place once complete, so readers never observe a
/// half-written report.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `dir` (created on first write if needed).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
        }

        let target = self.dir.join(file_name);
        let partial = self.dir.join(format!("{file_name}.part"));

        if let Err(e) = std::fs::write(&partial, bytes) {
            let _ = std::fs::remove_file(&partial);
            return Err(e.into());
        }
        if let Err(e) = std::fs::rename(&partial, &target) {
            let _ = std::fs::remove_file(&partial);
            return Err(e.into());
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_and_leaves_no_partial() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("reportes"));

        let path = sink.write("reporte.pdf", b"%PDF-1.3").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3");
        let names: Vec<_> = std::fs::read_dir(sink.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("reporte.pdf")]);
    }

    #[test]
    fn failed_rename_leaves_no_partial() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("reporte.pdf");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();
        let sink = DirectorySink::new(dir.path());

        let result = sink.write("reporte.pdf", b"%PDF-1.3");

        assert!(matches!(result, Err(ReportError::Io(_))));
        assert!(!dir.path().join("reporte.pdf.part").exists());
        assert!(blocker.join("keep").exists());
    }
}
