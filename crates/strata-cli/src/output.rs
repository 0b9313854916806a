//! Output directory handling.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;

/// Extensions of the files a run produces and may later clear.
const DIAGRAM_EXTENSIONS: [&str; 3] = ["dot", "svg", "png"];

/// A directory that diagrams are written into.
#[derive(Debug)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Creates the directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes diagrams left behind by an earlier run.
    ///
    /// Only files with a diagram extension are removed; anything else in the
    /// directory is left alone. Returns the number of files removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed or a file cannot be removed.
    pub fn clear_stale(&self) -> io::Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.path)? {
            let path = entry?.path();
            let is_diagram = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| DIAGRAM_EXTENSIONS.contains(&ext));
            if path.is_file() && is_diagram {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        debug!(dir = self.path.display().to_string(), removed; "Cleared stale diagrams");
        Ok(removed)
    }

    /// Writes `contents` to `file_name` inside the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, file_name: &str, contents: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        let path = self.path.join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

/// Turns an application name into a file stem.
///
/// Path separators and characters that are invalid on common file systems
/// become `_`; an empty result becomes `unnamed`.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "unnamed".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Payroll"), "Payroll");
        assert_eq!(file_stem("HR / Payroll"), "HR _ Payroll");
        assert_eq!(file_stem(" Web:Front? "), "Web_Front_");
        assert_eq!(file_stem(""), "unnamed");
        assert_eq!(file_stem(".."), "unnamed");
    }

    #[test]
    fn test_clear_stale_keeps_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputDir::create(dir.path().join("nested")).unwrap();
        output.write("Old.dot", "digraph {}").unwrap();
        output.write("Old.svg", "<svg/>").unwrap();
        output.write("notes.txt", "keep").unwrap();

        let removed = output.clear_stale().unwrap();

        assert_eq!(removed, 2);
        assert!(!output.path().join("Old.dot").exists());
        assert!(output.path().join("notes.txt").exists());
    }

    #[test]
    fn test_write_returns_path() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputDir::create(dir.path()).unwrap();

        let path = output.write("unique_names.csv", "AppName\n").unwrap();

        assert_eq!(path, dir.path().join("unique_names.csv"));
        assert_eq!(fs::read_to_string(path).unwrap(), "AppName\n");
    }
}
