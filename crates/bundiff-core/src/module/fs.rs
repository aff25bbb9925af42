//! Exploded-directory module.

use super::{BundleModule, Manifest};
use crate::errors::{BundiffError, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Manifest location inside a module.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// A module laid out as a directory tree.
///
/// Every regular file under the root is a resource. Paths are relative to
/// the root, `/`-separated, and listed in sorted order. The file list is
/// taken once at open time.
#[derive(Debug, Clone)]
pub struct DirModule {
    name: String,
    root: PathBuf,
    paths: Vec<String>,
}

impl DirModule {
    /// Open a directory. The module name defaults to the directory name.
    ///
    /// # Errors
    ///
    /// `ModuleUnreadable` if `root` is not a readable directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let unreadable = |reason: String| BundiffError::ModuleUnreadable {
            location: root.display().to_string(),
            reason,
        };

        if !root.is_dir() {
            return Err(unreadable("not a directory".to_string()));
        }

        let mut paths = Vec::new();
        collect(&root, "", &mut paths).map_err(|e| unreadable(e.to_string()))?;
        paths.sort();

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        Ok(Self { name, root, paths })
    }

    /// Override the module name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn file_path(&self, path: &str) -> PathBuf {
        path.split('/').fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

fn collect(dir: &Path, prefix: &str, out: &mut Vec<String>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let relative = format!("{}{}", prefix, file_name.to_string_lossy());
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect(&entry.path(), &format!("{}/", relative), out)?;
        } else if entry.path().is_file() {
            out.push(relative);
        }
    }
    Ok(())
}

impl BundleModule for DirModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_paths(&self) -> Vec<String> {
        self.paths.clone()
    }

    fn contains(&self, path: &str) -> bool {
        self.paths.binary_search_by(|p| p.as_str().cmp(path)).is_ok()
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>> {
        let file = fs::File::open(self.file_path(path)).map_err(|e| {
            BundiffError::ResourceUnreadable {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Box::new(file))
    }

    fn manifest(&self) -> Result<Option<Manifest>> {
        if !self.contains(MANIFEST_PATH) {
            return Ok(None);
        }
        let bytes = fs::read(self.file_path(MANIFEST_PATH)).map_err(|e| {
            BundiffError::MissingManifest {
                module: self.name.clone(),
                reason: e.to_string(),
            }
        })?;
        Manifest::parse_bytes(&bytes).map(Some)
    }
}
