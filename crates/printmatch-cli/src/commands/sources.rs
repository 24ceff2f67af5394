//! Wiring from configuration to adapters.

use std::path::PathBuf;

use tracing::{debug, warn};

use printmatch_adapters::{Catalog, InMemoryVariantStore, JsonVariantStore, LocalFileStore};
use printmatch_core::{
    application::ports::{PrintFileStore, VariantStore},
    domain::HierarchyRegistry,
};

use crate::{
    cli::SourceArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

enum Variants {
    Memory(InMemoryVariantStore),
    Persisted(JsonVariantStore),
}

/// Catalog, print files and variant store for one invocation.
pub(crate) struct Sources {
    registry: HierarchyRegistry,
    variants: Variants,
    files: LocalFileStore,
}

impl Sources {
    /// Resolve paths (flag beats config) and load everything.
    pub(crate) fn open(args: &SourceArgs, config: &AppConfig) -> CliResult<Self> {
        let catalog_path = args
            .catalog
            .clone()
            .unwrap_or_else(|| config.catalog.path.clone());
        if !catalog_path.is_file() {
            return Err(CliError::PathNotFound {
                what: "Catalog",
                path: catalog_path,
            });
        }

        let files_root: PathBuf = args
            .files_root
            .clone()
            .unwrap_or_else(|| config.files.root.clone());
        if !files_root.is_dir() {
            return Err(CliError::PathNotFound {
                what: "Print-file directory",
                path: files_root,
            });
        }

        let catalog = Catalog::load(&catalog_path)?;
        debug!(catalog = %catalog_path.display(), files = %files_root.display(), "Sources resolved");

        let variants = match &config.store.assignments {
            Some(path) => Variants::Persisted(JsonVariantStore::open(path, catalog.variants)?),
            None => {
                warn!("store.assignments is unset; applied assignments are not saved");
                Variants::Memory(catalog.variants)
            }
        };

        Ok(Self {
            registry: catalog.registry,
            variants,
            files: LocalFileStore::new(files_root),
        })
    }

    pub(crate) fn registry(&self) -> HierarchyRegistry {
        self.registry.clone()
    }

    pub(crate) fn variant_store(&self) -> Box<dyn VariantStore> {
        match &self.variants {
            Variants::Memory(store) => Box::new(store.clone()),
            Variants::Persisted(store) => Box::new(store.clone()),
        }
    }

    pub(crate) fn file_store(&self) -> Box<dyn PrintFileStore> {
        Box::new(self.files.clone())
    }
}
