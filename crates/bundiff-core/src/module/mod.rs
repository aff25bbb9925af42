//! Collaborator seams: module access and API resolution.
//!
//! The extractor never opens archives or decodes class files itself. It reads
//! through [`BundleModule`] and asks an [`ApiResolver`] for the exported API
//! and per-class metadata. Two module implementations ship with the crate:
//! [`DirModule`] for exploded directories and [`MemoryModule`] for
//! programmatic construction.

pub mod api;
pub mod fs;
pub mod manifest;
pub mod memory;

pub use api::{ApiMember, ApiPackage, ApiSurface, ApiType, ClassInfo, StaticApiResolver};
pub use fs::DirModule;
pub use manifest::Manifest;
pub use memory::MemoryModule;

use crate::errors::Result;
use std::io::Read;

/// Read access to one packaged module.
pub trait BundleModule: Sync {
    /// Module name, used as the root label.
    fn name(&self) -> &str;

    /// Every resource path, `/`-separated, in a stable order.
    fn resource_paths(&self) -> Vec<String>;

    fn contains(&self, path: &str) -> bool;

    /// Open a resource for reading.
    ///
    /// # Errors
    ///
    /// `ResourceUnreadable` if the path is absent or cannot be opened.
    fn open(&self, path: &str) -> Result<Box<dyn Read + '_>>;

    /// The main manifest section, if the module has one.
    ///
    /// # Errors
    ///
    /// `MalformedManifest` or `MissingManifest` if a manifest is present but
    /// cannot be read.
    fn manifest(&self) -> Result<Option<Manifest>>;
}

/// Resolves API structure and class metadata for a module.
pub trait ApiResolver: Sync {
    /// The exported API surface.
    ///
    /// # Errors
    ///
    /// `MissingApi` if the surface cannot be computed.
    fn api(&self, module: &dyn BundleModule) -> Result<ApiSurface>;

    /// Metadata for the compiled-code resource at `path`, or `None` when the
    /// resolver knows nothing about it.
    ///
    /// # Errors
    ///
    /// `ClassInfoUnavailable` if the lookup itself fails.
    fn class_info(&self, module: &dyn BundleModule, path: &str) -> Result<Option<ClassInfo>>;
}
