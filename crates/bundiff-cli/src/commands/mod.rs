pub mod diff;
pub mod tree;

use bundiff_core::config::{Capabilities, EngineConfig};
use bundiff_core::module::StaticApiResolver;
use bundiff_core::tree::StructureTree;
use bundiff_core::{Differ, Version};
use clap::Args;
use std::path::{Path, PathBuf};

/// Engine options shared by every command
#[derive(Debug, Args)]
pub struct EngineArgs {
    /// Ignore patterns for header names and resource paths (`;` or `,` separated)
    #[arg(long)]
    pub ignore: Option<String>,

    /// Behave like the engine at this compatibility version
    #[arg(long)]
    pub compat: Option<Version>,

    /// Hash compiled classes even when their source is bundled
    #[arg(long)]
    pub no_source_substitution: bool,
}

impl EngineArgs {
    pub fn differ(&self) -> Result<Differ, Box<dyn std::error::Error>> {
        let mut capabilities = match &self.compat {
            Some(version) => Capabilities::since(version),
            None => Capabilities::default(),
        };
        if self.no_source_substitution {
            capabilities.source_substitution = false;
        }

        let mut config = EngineConfig::default().with_capabilities(capabilities);
        config.ignore = self.ignore.clone();
        Ok(Differ::new(config)?)
    }
}

/// Load an API description file, or an empty resolver when none is given.
pub fn load_resolver(path: Option<&Path>) -> Result<StaticApiResolver, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read API file {}: {}", path.display(), e))?;
            Ok(StaticApiResolver::from_json(&text)?)
        }
        None => Ok(StaticApiResolver::default()),
    }
}

/// Where one side of a comparison comes from
#[derive(Debug, Clone)]
pub enum Input {
    /// Exploded module directory
    Dir(PathBuf),
    /// Previously saved structure tree
    SavedTree(PathBuf),
}

impl Input {
    pub fn classify(path: &Path) -> Self {
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json && path.is_file() {
            Input::SavedTree(path.to_path_buf())
        } else {
            Input::Dir(path.to_path_buf())
        }
    }

    pub fn load(
        &self,
        differ: &Differ,
        resolver: &StaticApiResolver,
    ) -> Result<StructureTree, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            Input::Dir(dir) => Ok(differ.tree_from_dir(dir, resolver)?),
            Input::SavedTree(file) => {
                let text = std::fs::read_to_string(file)
                    .map_err(|e| format!("cannot read tree {}: {}", file.display(), e))?;
                let data = serde_json::from_str(&text)?;
                Ok(differ.deserialize(data)?)
            }
        }
    }
}
