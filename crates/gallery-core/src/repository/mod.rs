//! Repository Layer
//!
//! Contracts for the external collaborators the gallery talks to.

mod traits;

#[cfg(test)]
pub(crate) mod memory;

pub use traits::{DocumentStore, ObjectStorage, PreviewHandle, PreviewRegistry, SnapshotListener, Subscription};
