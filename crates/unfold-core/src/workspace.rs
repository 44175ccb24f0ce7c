//! Companion file/workspace links into the embedding host.
//!
//! The viewer often runs next to a workspace shell that can open and create
//! files; authored content links into it ("open this notebook"). The host
//! service may also be entirely absent (the viewer runs standalone), in
//! which case every request fails soft with a logged diagnostic and nothing
//! propagates to the caller.

use log::{debug, warn};

/// Host-provided file/workspace operations, keyed by path strings.
pub trait WorkspaceService {
    type Error: core::fmt::Debug;

    fn file_exists(&mut self, path: &str) -> Result<bool, Self::Error>;

    fn create_file(&mut self, path: &str, initial_content: &str) -> Result<(), Self::Error>;

    fn create_notebook(&mut self, path: &str) -> Result<(), Self::Error>;

    fn open_file(&mut self, path: &str) -> Result<(), Self::Error>;
}

/// Fail-soft front door over an optional [`WorkspaceService`].
pub struct WorkspaceLinks<W: WorkspaceService> {
    service: Option<W>,
}

impl<W: WorkspaceService> WorkspaceLinks<W> {
    pub const fn new(service: Option<W>) -> Self {
        Self { service }
    }

    pub fn is_attached(&self) -> bool {
        self.service.is_some()
    }

    /// Open `path`, creating it first when missing (a notebook for `.ipynb`
    /// targets, an empty text file otherwise). Returns whether the open
    /// request reached the host.
    pub fn open_or_create(&mut self, path: &str) -> bool {
        let Some(service) = self.service.as_mut() else {
            warn!("workspace: host service unavailable, dropping request path={}", path);
            return false;
        };

        let exists = match service.file_exists(path) {
            Ok(exists) => exists,
            Err(err) => {
                warn!("workspace: existence check failed path={} err={:?}", path, err);
                return false;
            }
        };

        if !exists {
            let created = if is_notebook_path(path) {
                service.create_notebook(path)
            } else {
                service.create_file(path, "")
            };
            if let Err(err) = created {
                warn!("workspace: create failed path={} err={:?}", path, err);
                return false;
            }
            debug!("workspace: created path={}", path);
        }

        match service.open_file(path) {
            Ok(()) => true,
            Err(err) => {
                warn!("workspace: open failed path={} err={:?}", path, err);
                false
            }
        }
    }
}

fn is_notebook_path(path: &str) -> bool {
    let suffix = ".ipynb";
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeWorkspace {
        files: Vec<String>,
        notebooks: Vec<String>,
        opened: Vec<String>,
        broken: bool,
    }

    impl WorkspaceService for FakeWorkspace {
        type Error = &'static str;

        fn file_exists(&mut self, path: &str) -> Result<bool, Self::Error> {
            if self.broken {
                return Err("backend offline");
            }
            Ok(self.files.iter().any(|p| p == path))
        }

        fn create_file(&mut self, path: &str, _initial_content: &str) -> Result<(), Self::Error> {
            self.files.push(path.to_string());
            Ok(())
        }

        fn create_notebook(&mut self, path: &str) -> Result<(), Self::Error> {
            self.files.push(path.to_string());
            self.notebooks.push(path.to_string());
            Ok(())
        }

        fn open_file(&mut self, path: &str) -> Result<(), Self::Error> {
            self.opened.push(path.to_string());
            Ok(())
        }
    }

    #[test]
    fn absent_service_fails_soft() {
        let mut links: WorkspaceLinks<FakeWorkspace> = WorkspaceLinks::new(None);
        assert!(!links.open_or_create("labs/setup.md"));
    }

    #[test]
    fn missing_files_are_created_then_opened() {
        let mut links = WorkspaceLinks::new(Some(FakeWorkspace::default()));
        assert!(links.open_or_create("labs/notes.txt"));

        let service = links.service.as_ref().unwrap();
        assert_eq!(service.files, ["labs/notes.txt"]);
        assert!(service.notebooks.is_empty());
        assert_eq!(service.opened, ["labs/notes.txt"]);
    }

    #[test]
    fn notebook_targets_are_created_as_notebooks() {
        let mut links = WorkspaceLinks::new(Some(FakeWorkspace::default()));
        assert!(links.open_or_create("labs/Exercise.IPYNB"));
        assert_eq!(
            links.service.as_ref().unwrap().notebooks,
            ["labs/Exercise.IPYNB"]
        );
    }

    #[test]
    fn existing_files_are_opened_without_create() {
        let mut workspace = FakeWorkspace::default();
        workspace.files.push("labs/notes.txt".to_string());
        let mut links = WorkspaceLinks::new(Some(workspace));

        assert!(links.open_or_create("labs/notes.txt"));
        let service = links.service.as_ref().unwrap();
        assert_eq!(service.files.len(), 1);
    }

    #[test]
    fn backend_errors_abandon_the_request() {
        let mut workspace = FakeWorkspace::default();
        workspace.broken = true;
        let mut links = WorkspaceLinks::new(Some(workspace));

        assert!(!links.open_or_create("labs/notes.txt"));
        assert!(links.service.as_ref().unwrap().opened.is_empty());
    }
}
