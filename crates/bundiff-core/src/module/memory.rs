//! In-memory module built up programmatically.

use super::{BundleModule, Manifest};
use crate::errors::{BundiffError, Result};
use std::collections::BTreeMap;
use std::io::{self, Read};

#[derive(Debug, Clone)]
enum Entry {
    Bytes(Vec<u8>),
    Unreadable(String),
}

/// A module whose resources and manifest live in memory.
///
/// Resources are kept sorted by path. A module has a manifest as soon as one
/// header has been added.
#[derive(Debug, Clone, Default)]
pub struct MemoryModule {
    name: String,
    resources: BTreeMap<String, Entry>,
    manifest: Option<Manifest>,
}

impl MemoryModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_resource(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(path.into(), Entry::Bytes(bytes.into()));
        self
    }

    /// Add a resource whose reads fail with `reason`.
    pub fn with_unreadable_resource(
        mut self,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.resources
            .insert(path.into(), Entry::Unreadable(reason.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.manifest
            .get_or_insert_with(Manifest::new)
            .insert(name, value);
        self
    }

    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = Some(manifest);
        self
    }
}

/// Reader that fails on first use.
struct FailingReader(String);

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other(self.0.clone()))
    }
}

impl BundleModule for MemoryModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_paths(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    fn contains(&self, path: &str) -> bool {
        self.resources.contains_key(path)
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>> {
        match self.resources.get(path) {
            Some(Entry::Bytes(bytes)) => Ok(Box::new(bytes.as_slice())),
            Some(Entry::Unreadable(reason)) => Ok(Box::new(FailingReader(reason.clone()))),
            None => Err(BundiffError::ResourceUnreadable {
                path: path.to_string(),
                reason: "no such resource".to_string(),
            }),
        }
    }

    fn manifest(&self) -> Result<Option<Manifest>> {
        Ok(self.manifest.clone())
    }
}
