//! Cut sequencing.
//!
//! Walks the jig through a cut plan one move per trigger, with progress kept
//! in a [`ProgressStore`] so it survives restarts.

mod machine;
mod state;
mod store;

pub use machine::{CutSequencer, Outcome};
pub use state::{SequenceState, Status};
pub use store::{MemoryStore, ProgressStore, StoreResult};

#[cfg(feature = "std")]
pub use store::FileStore;
