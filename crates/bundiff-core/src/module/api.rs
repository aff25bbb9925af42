//! API surface description and a data-driven resolver.

use super::{ApiResolver, BundleModule};
use crate::errors::{BundiffError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exported API of a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSurface {
    #[serde(default)]
    pub packages: Vec<ApiPackage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPackage {
    /// Dotted package name
    pub name: String,
    #[serde(default)]
    pub types: Vec<ApiType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiType {
    /// Fully qualified type name
    pub name: String,
    #[serde(default)]
    pub members: Vec<ApiMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMember {
    /// Member signature, e.g. `method:run(java.lang.String)`
    pub signature: String,
    /// Optional detail compared alongside the signature (return type, modifiers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
}

/// Metadata of one compiled-code resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Dotted package name
    pub package: String,
    /// Declared source file name, e.g. `Foo.java`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// Resolver answering from a fixed description, usually loaded from JSON.
///
/// ```json
/// {
///   "packages": [{"name": "p", "types": [{"name": "p.A", "members": []}]}],
///   "classes": {"p/A.class": {"package": "p", "source_file": "A.java"}}
/// }
/// ```
///
/// Classes absent from `classes` fall back to a package derived from the
/// resource path and no source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticApiResolver {
    #[serde(flatten)]
    surface: ApiSurface,
    #[serde(default)]
    classes: BTreeMap<String, ClassInfo>,
}

impl StaticApiResolver {
    pub fn new(surface: ApiSurface) -> Self {
        Self {
            surface,
            classes: BTreeMap::new(),
        }
    }

    pub fn with_class(mut self, path: impl Into<String>, info: ClassInfo) -> Self {
        self.classes.insert(path.into(), info);
        self
    }

    /// Load from the JSON form shown above.
    ///
    /// # Errors
    ///
    /// `Serialization` if the text is not a valid description.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn surface(&self) -> &ApiSurface {
        &self.surface
    }
}

impl ApiResolver for StaticApiResolver {
    fn api(&self, _module: &dyn BundleModule) -> Result<ApiSurface> {
        Ok(self.surface.clone())
    }

    fn class_info(&self, module: &dyn BundleModule, path: &str) -> Result<Option<ClassInfo>> {
        if let Some(info) = self.classes.get(path) {
            return Ok(Some(info.clone()));
        }
        if !module.contains(path) {
            return Err(BundiffError::ClassInfoUnavailable {
                path: path.to_string(),
                reason: "resource not in module".to_string(),
            });
        }
        let package = path
            .rsplit_once('/')
            .map(|(dir, _)| dir.replace('/', "."))
            .unwrap_or_default();
        Ok(Some(ClassInfo {
            package,
            source_file: None,
        }))
    }
}
