//! Structure extraction: module in, structure tree out.
//!
//! ## Entry point
//!
//! ```
//! use bundiff_core::config::EngineConfig;
//! use bundiff_core::extract::Extractor;
//! use bundiff_core::module::{MemoryModule, StaticApiResolver};
//! use bundiff_core_types::RunContext;
//!
//! let module = MemoryModule::new("acme").with_resource("x.txt", "hi");
//! let extractor = Extractor::new(EngineConfig::default()).unwrap();
//! let tree = extractor
//!     .extract(&module, &StaticApiResolver::default(), &RunContext::new())
//!     .unwrap();
//! assert!(tree.resources().is_some());
//! ```
//!
//! ## Guarantees
//!
//! - **All or nothing**: any failure aborts; partial trees are never returned.
//! - **Determinism**: resources follow module path order, headers follow
//!   manifest order, API entries are sorted.
//! - **No shared state**: an extractor only borrows its inputs, so both sides
//!   of a comparison may be extracted on separate threads.

pub mod api;
pub mod resources;

pub use resources::is_reserved_metadata;

use crate::config::EngineConfig;
use crate::errors::{BundiffError, Result};
use crate::hash::ResourceHasher;
use crate::header::normalize_manifest;
use crate::ignore::IgnoreSet;
use crate::module::{ApiResolver, BundleModule};
use crate::tree::{Node, NodeKind, StructureTree};
use crate::{log_op_end, log_op_error, log_op_start};
use bundiff_core_types::RunContext;
use std::time::Instant;

const OP_EXTRACT: &str = "extract_tree";

/// Builds structure trees under one configuration.
#[derive(Debug, Clone)]
pub struct Extractor {
    ignore: Option<IgnoreSet>,
    config: EngineConfig,
}

impl Extractor {
    /// # Errors
    ///
    /// `InvalidPattern` if the configured ignore string is not a valid pattern list.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let ignore = compile_ignore(config.ignore.as_deref())?;
        Ok(Self { ignore, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the ignore patterns. `None` or a blank string clears them.
    ///
    /// # Errors
    ///
    /// `InvalidPattern`; the previous patterns stay in force.
    pub fn set_ignore(&mut self, ignore: Option<&str>) -> Result<()> {
        self.ignore = compile_ignore(ignore)?;
        self.config.ignore = ignore.map(str::to_string);
        Ok(())
    }

    /// Extract the structure tree of `module`.
    ///
    /// # Errors
    ///
    /// - `ResourceUnreadable` for any resource that cannot be read
    /// - `MalformedHeader` / `InvalidVersion` from header normalization
    /// - `MalformedManifest` / `MissingManifest` from the module
    /// - `MissingApi` / `ClassInfoUnavailable` from the resolver
    pub fn extract(
        &self,
        module: &dyn BundleModule,
        resolver: &dyn ApiResolver,
        ctx: &RunContext,
    ) -> Result<StructureTree> {
        let start = Instant::now();
        log_op_start!(
            OP_EXTRACT,
            run_id = ctx.run_id.as_str(),
            module = module.name()
        );

        match self.build(module, resolver) {
            Ok(tree) => {
                let resource_count = tree.resources().map_or(0, |r| r.children().len());
                let header_count = tree.manifest().map_or(0, |m| m.children().len());
                log_op_end!(
                    OP_EXTRACT,
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = ctx.run_id.as_str(),
                    module = module.name(),
                    resource_count = resource_count as u64,
                    header_count = header_count as u64
                );
                Ok(tree)
            }
            Err(err) => {
                log_op_error!(
                    OP_EXTRACT,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = ctx.run_id.as_str(),
                    module = module.name()
                );
                Err(err)
            }
        }
    }

    fn build(&self, module: &dyn BundleModule, resolver: &dyn ApiResolver) -> Result<StructureTree> {
        let ignore = self.ignore.as_ref();
        let hasher = ResourceHasher::new(
            module,
            resolver,
            self.config.capabilities.source_substitution,
        );

        let mut children = Vec::with_capacity(3);
        if let Some(manifest) = module.manifest()? {
            let surface = resolver.api(module).map_err(|e| match e {
                BundiffError::MissingApi { .. } => e,
                other => BundiffError::MissingApi {
                    module: module.name().to_string(),
                    reason: other.to_string(),
                },
            })?;
            children.push(api::api_node(&surface)?);
            children.push(normalize_manifest(&manifest, ignore)?);
        }
        children.push(resources::resource_set_node(module, &hasher, ignore)?);

        StructureTree::new(Node::branch(NodeKind::Module, module.name(), children)?)
    }
}

fn compile_ignore(patterns: Option<&str>) -> Result<Option<IgnoreSet>> {
    match patterns {
        Some(text) if !text.trim().is_empty() => Ok(Some(IgnoreSet::parse(text)?)),
        _ => Ok(None),
    }
}
