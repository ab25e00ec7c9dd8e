use crate::config::BootstrapConfig;
use crate::error::{ResolveError, Result};
use crate::logger;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only filesystem probes used by the bootstrap search
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        path.canonicalize()
    }
}

/// Ordered list of places the bootstrap file may live
///
/// The first candidate is the primary one and is the path reported when
/// nothing is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    candidates: Vec<PathBuf>,
}

impl SearchPolicy {
    pub fn new(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }

    /// `<cwd>/<relative_path>`, then `<install_dir>` walked up
    /// `install_depth` levels joined with the same relative path
    ///
    /// The fallback covers processes started from somewhere other than the
    /// application root while the executable sits nested below it.
    /// `install_dir` defaults to the running executable's directory; without
    /// one there is no fallback.
    pub fn from_config(config: &BootstrapConfig, cwd: &Path) -> Self {
        let mut candidates = vec![cwd.join(&config.relative_path)];

        let install_dir = config.install_dir.clone().or_else(executable_dir);
        if let Some(root) = install_dir
            .as_deref()
            .and_then(|dir| dir.ancestors().nth(config.install_depth))
        {
            candidates.push(root.join(&config.relative_path));
        }

        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Return the first existing candidate as a canonical path
    pub fn locate(&self, fs: &dyn FileSystem) -> Result<PathBuf> {
        if let Some(found) = self.candidates.iter().find(|c| fs.exists(c)) {
            return Ok(fs.canonicalize(found).unwrap_or_else(|e| {
                logger::log_warning(&format!(
                    "Could not canonicalize {}: {e}",
                    found.display()
                ));
                found.clone()
            }));
        }

        Err(ResolveError::BootstrapNotFound {
            attempted: self.candidates.first().cloned().unwrap_or_default(),
        })
    }
}

/// Directory of the running executable
fn executable_dir() -> Option<PathBuf> {
    match std::env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf),
        Err(e) => {
            logger::log_warning(&format!(
                "Cannot determine executable location, skipping install-dir fallback: {e}"
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// In-memory filesystem; canonical form strips `..` textually
    struct FakeFs {
        files: HashSet<PathBuf>,
    }

    impl FakeFs {
        fn with(paths: &[&str]) -> Self {
            Self {
                files: paths.iter().map(PathBuf::from).collect(),
            }
        }
    }

    fn normalize(path: &Path) -> PathBuf {
        let mut out = PathBuf::new();
        for part in path.components() {
            if part == std::path::Component::ParentDir {
                out.pop();
            } else {
                out.push(part);
            }
        }
        out
    }

    impl FileSystem for FakeFs {
        fn exists(&self, path: &Path) -> bool {
            self.files.contains(&normalize(path))
        }

        fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
            Ok(normalize(path))
        }
    }

    fn config(install_dir: &str, depth: usize) -> BootstrapConfig {
        BootstrapConfig {
            relative_path: PathBuf::from("bootstrap/app.toml"),
            install_dir: Some(PathBuf::from(install_dir)),
            install_depth: depth,
        }
    }

    #[test]
    fn test_candidates_order() {
        let policy = SearchPolicy::from_config(
            &config("/srv/app/vendor/acme/resolver", 3),
            Path::new("/var/task"),
        );
        assert_eq!(
            policy.candidates(),
            &[
                PathBuf::from("/var/task/bootstrap/app.toml"),
                PathBuf::from("/srv/app/bootstrap/app.toml"),
            ]
        );
    }

    #[test]
    fn test_default_install_dir_is_executable_dir() {
        let cfg = BootstrapConfig {
            relative_path: PathBuf::from("bootstrap/app.toml"),
            install_dir: None,
            install_depth: 0,
        };
        let policy = SearchPolicy::from_config(&cfg, Path::new("/var/task"));
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();

        assert_eq!(policy.candidates().len(), 2);
        assert_eq!(policy.candidates()[1], exe_dir.join("bootstrap/app.toml"));
    }

    #[test]
    fn test_depth_beyond_root_drops_fallback() {
        let policy = SearchPolicy::from_config(&config("/a", 5), Path::new("/var/task"));
        assert_eq!(policy.candidates().len(), 1);
    }

    #[test]
    fn test_primary_wins() {
        let fs = FakeFs::with(&["/var/task/bootstrap/app.toml", "/srv/app/bootstrap/app.toml"]);
        let policy = SearchPolicy::from_config(
            &config("/srv/app/vendor/acme/resolver", 3),
            Path::new("/var/task"),
        );
        assert_eq!(
            policy.locate(&fs).unwrap(),
            PathBuf::from("/var/task/bootstrap/app.toml")
        );
    }

    #[test]
    fn test_fallback_is_canonical() {
        let fs = FakeFs::with(&["/srv/app/bootstrap/app.toml"]);
        let policy = SearchPolicy::new([
            PathBuf::from("/var/task/bootstrap/app.toml"),
            PathBuf::from("/srv/app/vendor/acme/../../bootstrap/app.toml"),
        ]);
        assert_eq!(
            policy.locate(&fs).unwrap(),
            PathBuf::from("/srv/app/bootstrap/app.toml")
        );
    }

    #[test]
    fn test_not_found_reports_primary() {
        let fs = FakeFs::with(&[]);
        let policy = SearchPolicy::from_config(
            &config("/srv/app/vendor/acme/resolver", 3),
            Path::new("/var/task"),
        );
        match policy.locate(&fs) {
            Err(ResolveError::BootstrapNotFound { attempted }) => {
                assert_eq!(attempted, PathBuf::from("/var/task/bootstrap/app.toml"));
            }
            other => panic!("expected BootstrapNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_real_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("bootstrap")).unwrap();
        std::fs::write(dir.path().join("bootstrap").join("app.toml"), "").unwrap();

        let policy = SearchPolicy::new([dir.path().join("bootstrap/app.toml")]);
        let found = policy.locate(&OsFileSystem).unwrap();
        assert!(found.is_absolute());
        assert!(found.ends_with("bootstrap/app.toml"));
    }
}
