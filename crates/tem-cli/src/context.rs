//! Shared command context: the snapshot-backed store and the engine
//! bundle wired over it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use tem_engine::{ComplianceEngine, EngineStores};
use tem_store::{MemoryStore, StoreSnapshot};

/// The four engine ports, all backed by clones of one in-memory store.
pub fn stores_over(store: &MemoryStore) -> EngineStores {
    EngineStores {
        vessels: Arc::new(store.clone()),
        landings: Arc::new(store.clone()),
        calculations: Arc::new(store.clone()),
        penalties: Arc::new(store.clone()),
    }
}

/// State loaded for one CLI invocation.
pub struct CliContext {
    pub store: MemoryStore,
    pub engine: ComplianceEngine,
    state_path: PathBuf,
}

impl CliContext {
    /// Load the snapshot at `state_path` (missing file means empty state)
    /// and wire the engine over it.
    pub fn load(state_path: &Path) -> anyhow::Result<Self> {
        let store = StoreSnapshot::load_or_default(state_path)
            .with_context(|| format!("loading state from {}", state_path.display()))?;
        let engine = ComplianceEngine::with_defaults(stores_over(&store));
        Ok(Self {
            store,
            engine,
            state_path: state_path.to_path_buf(),
        })
    }

    /// Write the store back to the snapshot file. Called after every
    /// mutating command; read-only commands skip it.
    pub fn save(&self) -> anyhow::Result<()> {
        StoreSnapshot::save(&self.store, &self.state_path)
            .with_context(|| format!("saving state to {}", self.state_path.display()))
    }
}
