//! Resource content hashing.
//!
//! Every resource is reduced to a SHA-256 digest of its bytes. Compiled
//! classes are special: when the module carries the class's own source under
//! `OSGI-OPT/src/`, the source bytes are hashed instead. Recompiling the same
//! source with a different compiler then yields no difference.
//!
//! ## Determinism Guarantees
//!
//! - Same bytes → same digest, independent of how the stream is chunked
//! - Different bytes → different digest
//! - A stream is read once and dropped on every exit path

use crate::errors::{BundiffError, Result};
use crate::module::{ApiResolver, BundleModule, ClassInfo};
use sha2::{Digest, Sha256};
use std::io::{self, Read};

/// Name of the digest algorithm, used as the `CONTENT_HASH` node name.
pub const DIGEST_ALGORITHM: &str = "SHA-256";

/// Root of companion sources inside a module.
pub const SOURCE_ROOT: &str = "OSGI-OPT/src/";

const CLASS_SUFFIX: &str = ".class";

/// Hash a stream to its hex-encoded SHA-256 digest.
///
/// # Errors
///
/// `ResourceUnreadable` naming `path` if the stream fails mid-read.
pub fn hash_reader(path: &str, mut reader: impl Read) -> Result<String> {
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).map_err(|e| BundiffError::ResourceUnreadable {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    Ok(hex::encode(hasher.finalize()))
}

/// Hash an in-memory byte slice.
pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Where the source for a compiled class would live, with its file name.
///
/// Returns `None` for non-class paths and for classes that declare no source
/// file.
pub fn companion_source_path(class_path: &str, info: &ClassInfo) -> Option<(String, String)> {
    if !class_path.ends_with(CLASS_SUFFIX) {
        return None;
    }
    let source_file = info.source_file.as_deref().filter(|s| !s.is_empty())?;
    let package_dir = info.package.replace('.', "/");
    let path = if package_dir.is_empty() {
        format!("{}{}", SOURCE_ROOT, source_file)
    } else {
        format!("{}{}/{}", SOURCE_ROOT, package_dir, source_file)
    };
    Some((path, source_file.to_string()))
}

/// Digest of one resource plus an optional provenance note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub digest: String,
    /// `Σ<source file>` when companion source was hashed instead
    pub annotation: Option<String>,
}

/// Hashes resources of one module.
pub struct ResourceHasher<'a> {
    module: &'a dyn BundleModule,
    resolver: &'a dyn ApiResolver,
    substitute_sources: bool,
}

impl<'a> ResourceHasher<'a> {
    pub fn new(
        module: &'a dyn BundleModule,
        resolver: &'a dyn ApiResolver,
        substitute_sources: bool,
    ) -> Self {
        Self {
            module,
            resolver,
            substitute_sources,
        }
    }

    /// Fingerprint the resource at `path`.
    ///
    /// # Errors
    ///
    /// - `ResourceUnreadable` if the resource (or its companion) cannot be read
    /// - `ClassInfoUnavailable` if class metadata lookup fails
    pub fn fingerprint(&self, path: &str) -> Result<Fingerprint> {
        if self.substitute_sources && path.ends_with(CLASS_SUFFIX) {
            if let Some((source_path, source_file)) = self.companion(path)? {
                tracing::debug!(
                    resource_path = path,
                    source_path = source_path.as_str(),
                    "hashing companion source"
                );
                let digest = hash_reader(&source_path, self.module.open(&source_path)?)?;
                return Ok(Fingerprint {
                    digest,
                    annotation: Some(format!("Σ{}", source_file)),
                });
            }
        }

        let digest = hash_reader(path, self.module.open(path)?)?;
        Ok(Fingerprint {
            digest,
            annotation: None,
        })
    }

    fn companion(&self, path: &str) -> Result<Option<(String, String)>> {
        let Some(info) = self.resolver.class_info(self.module, path)? else {
            return Ok(None);
        };
        Ok(companion_source_path(path, &info).filter(|(p, _)| self.module.contains(p)))
    }
}
