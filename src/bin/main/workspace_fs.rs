//! Filesystem-backed workspace service for the simulator.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::info;
use unfold_core::workspace::WorkspaceService;

/// Empty notebook body, matching what workspace shells create for new
/// notebooks.
const EMPTY_NOTEBOOK_JSON: &str = "{\n  \"cells\": [],\n  \"metadata\": {},\n  \"nbformat\": 4,\n  \"nbformat_minor\": 5\n}\n";

pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    fn write_new(&self, path: &str, content: &str) -> io::Result<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, content)
    }
}

impl WorkspaceService for FsWorkspace {
    type Error = io::Error;

    fn file_exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.resolve(path).exists())
    }

    fn create_file(&mut self, path: &str, initial_content: &str) -> Result<(), Self::Error> {
        self.write_new(path, initial_content)
    }

    fn create_notebook(&mut self, path: &str) -> Result<(), Self::Error> {
        self.write_new(path, EMPTY_NOTEBOOK_JSON)
    }

    fn open_file(&mut self, path: &str) -> Result<(), Self::Error> {
        let target = self.resolve(path);
        if !target.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", target.display()),
            ));
        }
        // The simulator has no editor pane; opening is just an acknowledged
        // request.
        info!("workspace: opened {}", target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unfold_core::workspace::WorkspaceLinks;

    #[test]
    fn open_or_create_builds_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut links = WorkspaceLinks::new(Some(FsWorkspace::new(dir.path().to_path_buf())));

        assert!(links.open_or_create("labs/day-1/notes.txt"));
        assert!(dir.path().join("labs/day-1/notes.txt").is_file());
    }

    #[test]
    fn notebook_targets_get_a_notebook_body() {
        let dir = tempfile::tempdir().unwrap();
        let mut links = WorkspaceLinks::new(Some(FsWorkspace::new(dir.path().to_path_buf())));

        assert!(links.open_or_create("labs/exercise.ipynb"));
        let body = fs::read_to_string(dir.path().join("labs/exercise.ipynb")).unwrap();
        assert!(body.contains("\"nbformat\": 4"));
    }

    #[test]
    fn existing_files_are_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();
        let mut links = WorkspaceLinks::new(Some(FsWorkspace::new(dir.path().to_path_buf())));

        assert!(links.open_or_create("notes.txt"));
        let body = fs::read_to_string(dir.path().join("notes.txt")).unwrap();
        assert_eq!(body, "keep me");
    }
}
