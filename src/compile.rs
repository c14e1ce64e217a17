//! Whole-mod pipeline.
//!
//! Phase 1 compiles every item in order, collecting the shared-function hook
//! requests each one makes. Phase 2 runs once, after every item is done, and
//! synthesizes one override per hook kind for the whole mod.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::config::ExportConfig;
use crate::emit::{emit_item, AtlasAllocator, EmittedItem};
use crate::error::JokercError;
use crate::passive::{synthesize, HookRequest};
use crate::types::{ExportError, Item};

/// Compiles a list of items into one mod source file.
#[derive(Debug, Clone, Default)]
pub struct ModCompiler {
    config: ExportConfig,
}

/// Output of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledMod {
    /// One override block per hook kind in use.
    pub hooks: Vec<String>,
    pub items: Vec<EmittedItem>,
    /// Atlas cells consumed, overlays included.
    pub atlas_cells: u32,
}

impl ModCompiler {
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Compile every item. Either all items compile or nothing is returned.
    ///
    /// # Errors
    ///
    /// The first structural [`ExportError`] found, including
    /// [`ExportError::DuplicateKey`] when two items share a definition key.
    #[instrument(skip_all, fields(items = items.len()))]
    pub fn compile(&self, items: &[Item]) -> Result<CompiledMod, ExportError> {
        check_duplicates(items)?;

        let mut atlas = AtlasAllocator::new(self.config.atlas_columns);
        let mut requests: Vec<HookRequest> = Vec::new();
        let mut emitted = Vec::with_capacity(items.len());
        for item in items {
            let cell = atlas.allocate(item.has_overlay);
            let out = emit_item(item, cell, &self.config)?;
            requests.extend(out.hooks.iter().cloned());
            emitted.push(out);
        }
        debug!(requests = requests.len(), "item phase done; synthesizing hooks");

        let hooks = synthesize(&requests);
        info!(
            items = emitted.len(),
            hooks = hooks.len(),
            cells = atlas.used(),
            "compiled mod"
        );
        Ok(CompiledMod {
            hooks,
            items: emitted,
            atlas_cells: atlas.used(),
        })
    }
}

/// Convenience for `ModCompiler::new(config.clone()).compile(items)`.
///
/// # Errors
///
/// See [`ModCompiler::compile`].
pub fn compile_mod(items: &[Item], config: &ExportConfig) -> Result<CompiledMod, ExportError> {
    ModCompiler::new(config.clone()).compile(items)
}

fn check_duplicates(items: &[Item]) -> Result<(), ExportError> {
    let mut seen = HashSet::new();
    for item in items {
        let slug = item.slug();
        if slug.is_empty() {
            continue;
        }
        if !seen.insert(slug.clone()) {
            return Err(ExportError::DuplicateKey { key: slug });
        }
    }
    Ok(())
}

impl CompiledMod {
    /// The mod's Lua source: hook overrides first, then item definitions.
    #[must_use]
    pub fn source(&self) -> String {
        self.hooks
            .iter()
            .map(String::as_str)
            .chain(self.items.iter().map(|i| i.source.as_str()))
            .collect::<Vec<_>>()
            .join("\n\n")
            + "\n"
    }

    /// Write [`source`](Self::source) to `path`.
    ///
    /// # Errors
    ///
    /// Any I/O failure writing the file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), JokercError> {
        std::fs::write(path, self.source())?;
        Ok(())
    }
}
