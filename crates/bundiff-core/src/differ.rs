//! Engine facade.
//!
//! [`Differ`] bundles an [`Extractor`] with the tree differ and reports every
//! failure as a canonical [`ExError`] carrying the operation, run id and
//! module name.

use crate::config::EngineConfig;
use crate::diff::{compute_delta, DeltaTree};
use crate::errors::{BundiffError, ExError};
use crate::extract::Extractor;
use crate::module::{ApiResolver, BundleModule, DirModule};
use crate::tree::StructureTree;
use crate::{log_op_end, log_op_start};
use bundiff_core_types::RunContext;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

const OP_SET_IGNORE: &str = "set_ignore";
const OP_TREE: &str = "tree";
const OP_DIFF: &str = "diff_trees";
const OP_DESERIALIZE: &str = "deserialize";

/// Extracts structure trees and compares them.
#[derive(Debug, Clone)]
pub struct Differ {
    extractor: Extractor,
}

impl Differ {
    /// # Errors
    ///
    /// `ERR_INVALID_PATTERN` if the configured ignore string is not a valid pattern list.
    pub fn new(config: EngineConfig) -> Result<Self, ExError> {
        let extractor = Extractor::new(config).map_err(|e| ExError::from(e).with_op("new"))?;
        Ok(Self { extractor })
    }

    pub fn config(&self) -> &EngineConfig {
        self.extractor.config()
    }

    /// Replace the ignore patterns used by later extractions.
    ///
    /// # Errors
    ///
    /// `ERR_INVALID_PATTERN`; the previous patterns stay in force.
    pub fn set_ignore(&mut self, ignore: Option<&str>) -> Result<(), ExError> {
        self.extractor
            .set_ignore(ignore)
            .map_err(|e| ExError::from(e).with_op(OP_SET_IGNORE))
    }

    /// Extract the structure tree of one module.
    ///
    /// # Errors
    ///
    /// The extraction failure, with operation, run id and module attached.
    pub fn tree(
        &self,
        module: &dyn BundleModule,
        resolver: &dyn ApiResolver,
    ) -> Result<StructureTree, ExError> {
        let ctx = RunContext::new().with_module(module.name());
        self.extractor
            .extract(module, resolver, &ctx)
            .map_err(|e| contextualize(e, OP_TREE, &ctx))
    }

    /// Extract the structure tree of an exploded module directory.
    ///
    /// # Errors
    ///
    /// `ERR_IO` if the directory cannot be opened, otherwise as [`Differ::tree`].
    pub fn tree_from_dir(
        &self,
        path: impl AsRef<Path>,
        resolver: &dyn ApiResolver,
    ) -> Result<StructureTree, ExError> {
        let module = DirModule::open(path.as_ref()).map_err(|e| {
            ExError::from(e)
                .with_op(OP_TREE)
                .with_path(path.as_ref().display().to_string())
        })?;
        self.tree(&module, resolver)
    }

    /// Compare two trees. Never fails.
    pub fn diff(&self, older: &StructureTree, newer: &StructureTree) -> DeltaTree {
        let ctx = RunContext::new().with_module(newer.module_name());
        let start = Instant::now();
        log_op_start!(
            OP_DIFF,
            run_id = ctx.run_id.as_str(),
            module = newer.module_name()
        );

        let delta = compute_delta(older, newer);

        let counts = delta.counts();
        log_op_end!(
            OP_DIFF,
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = ctx.run_id.as_str(),
            module = newer.module_name(),
            changed_count = (counts.changed + counts.added + counts.removed) as u64
        );
        delta
    }

    /// Rebuild a structure tree from its serialized data form.
    ///
    /// # Errors
    ///
    /// `ERR_INVALID_TREE` or `ERR_DUPLICATE_IDENTITY` if the data is not a
    /// valid structure tree.
    pub fn deserialize(&self, data: Value) -> Result<StructureTree, ExError> {
        StructureTree::from_data(data).map_err(|e| ExError::from(e).with_op(OP_DESERIALIZE))
    }
}

fn contextualize(err: BundiffError, op: &str, ctx: &RunContext) -> ExError {
    let mut ex = ExError::from(err)
        .with_op(op)
        .with_run_id(ctx.run_id.clone());
    if ex.module().is_none() {
        if let Some(module) = &ctx.module {
            ex = ex.with_module(module.clone());
        }
    }
    ex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::module::{MemoryModule, StaticApiResolver};

    #[test]
    fn test_invalid_ignore_rejected_at_construction() {
        let err = Differ::new(EngineConfig::default().with_ignore("[bad")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidPattern);
    }

    #[test]
    fn test_set_ignore_keeps_previous_on_error() {
        let mut differ = Differ::new(EngineConfig::default().with_ignore("*.txt")).unwrap();
        assert!(differ.set_ignore(Some("[bad")).is_err());
        assert_eq!(differ.config().ignore.as_deref(), Some("*.txt"));
    }

    #[test]
    fn test_tree_error_carries_context() {
        let module = MemoryModule::new("acme").with_unreadable_resource("x.bin", "gone");
        let differ = Differ::new(EngineConfig::default()).unwrap();
        let err = differ
            .tree(&module, &StaticApiResolver::default())
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("tree"));
        assert_eq!(err.module(), Some("acme"));
        assert_eq!(err.path(), Some("x.bin"));
        assert!(err.run_id().is_some());
    }
}
