//! # tem-store — In-Memory Record Store
//!
//! The reference backend for the engine's store ports: DashMap-backed
//! maps behind an `Arc`, cheaply cloneable, safe for concurrent access.
//! The same `MemoryStore` value implements all four ports, so a process
//! wires the engine with four clones of one store.
//!
//! [`snapshot`] adds whole-store JSON save/load, which is how the CLI
//! persists state between invocations.

pub mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::{SnapshotError, StoreSnapshot};
