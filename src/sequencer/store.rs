//! Progress persistence.
//!
//! The cut plan and progress index live outside the sequencer so a restart
//! resumes where the jig stopped.

use crate::error::StoreError;
use crate::planner::CutPlan;

/// Result type for store operations.
pub type StoreResult<T> = core::result::Result<T, StoreError>;

/// Durable home of the cut plan and progress index.
///
/// Reads return what the last successful write stored. A store that has
/// never been written reports an empty plan and index 0.
pub trait ProgressStore {
    /// Read the current plan.
    fn plan(&mut self) -> StoreResult<CutPlan>;

    /// Replace the plan.
    fn set_plan(&mut self, plan: &CutPlan) -> StoreResult<()>;

    /// Read the number of moves already executed.
    fn index(&mut self) -> StoreResult<usize>;

    /// Replace the progress index.
    fn set_index(&mut self, index: usize) -> StoreResult<()>;
}

impl<S: ProgressStore + ?Sized> ProgressStore for &mut S {
    fn plan(&mut self) -> StoreResult<CutPlan> {
        (**self).plan()
    }

    fn set_plan(&mut self, plan: &CutPlan) -> StoreResult<()> {
        (**self).set_plan(plan)
    }

    fn index(&mut self) -> StoreResult<usize> {
        (**self).index()
    }

    fn set_index(&mut self, index: usize) -> StoreResult<()> {
        (**self).set_index(index)
    }
}

/// Volatile store kept in RAM.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    plan: CutPlan,
    index: usize,
}

impl MemoryStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self {
            plan: CutPlan::new(),
            index: 0,
        }
    }

    /// A store already holding `plan` at `index`.
    pub fn with(plan: CutPlan, index: usize) -> Self {
        Self { plan, index }
    }
}

impl ProgressStore for MemoryStore {
    fn plan(&mut self) -> StoreResult<CutPlan> {
        Ok(self.plan.clone())
    }

    fn set_plan(&mut self, plan: &CutPlan) -> StoreResult<()> {
        self.plan = plan.clone();
        Ok(())
    }

    fn index(&mut self) -> StoreResult<usize> {
        Ok(self.index)
    }

    fn set_index(&mut self, index: usize) -> StoreResult<()> {
        self.index = index;
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use file::FileStore;

#[cfg(feature = "std")]
mod file {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use serde::{Deserialize, Serialize};

    use super::{ProgressStore, StoreResult};
    use crate::config::truncated;
    use crate::error::StoreError;
    use crate::planner::CutPlan;

    /// On-disk layout: `index = N` and `moves = [...]`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    struct ProgressDocument {
        #[serde(default)]
        index: usize,
        #[serde(default)]
        moves: CutPlan,
    }

    /// Store backed by a TOML file.
    ///
    /// Every write replaces the whole document through a temporary file and
    /// a rename, so a crash leaves either the old or the new progress.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        /// Store progress at `path`. The file is created on first write.
        pub fn new<P: AsRef<Path>>(path: P) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// Location of the progress document.
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> StoreResult<ProgressDocument> {
            let content = match fs::read_to_string(&self.path) {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProgressDocument::default()),
                Err(e) => return Err(StoreError::Unavailable(truncated(&e.to_string()))),
            };

            toml::from_str(&content).map_err(|e| StoreError::Corrupt(truncated(e.message())))
        }

        fn save(&self, doc: &ProgressDocument) -> StoreResult<()> {
            let content =
                toml::to_string(doc).map_err(|e| StoreError::Corrupt(truncated(&e.to_string())))?;

            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, content)
                .and_then(|()| fs::rename(&tmp, &self.path))
                .map_err(|e| StoreError::Unavailable(truncated(&e.to_string())))?;

            trace!("progress saved to {}", self.path.display());
            Ok(())
        }
    }

    impl ProgressStore for FileStore {
        fn plan(&mut self) -> StoreResult<CutPlan> {
            Ok(self.load()?.moves)
        }

        fn set_plan(&mut self, plan: &CutPlan) -> StoreResult<()> {
            let mut doc = self.load()?;
            doc.moves = plan.clone();
            self.save(&doc)
        }

        fn index(&mut self) -> StoreResult<usize> {
            Ok(self.load()?.index)
        }

        fn set_index(&mut self, index: usize) -> StoreResult<()> {
            let mut doc = self.load()?;
            doc.index = index;
            self.save(&doc)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Steps;

    #[test]
    fn test_memory_store_starts_empty() {
        let mut store = MemoryStore::new();

        assert!(store.plan().unwrap().is_empty());
        assert_eq!(store.index().unwrap(), 0);
    }

    #[test]
    fn test_memory_store_keeps_writes() {
        let plan = CutPlan::from_moves(&[Steps(10), Steps(20), Steps(30)]).unwrap();
        let mut store = MemoryStore::new();

        store.set_plan(&plan).unwrap();
        store.set_index(2).unwrap();

        assert_eq!(store.plan().unwrap(), plan);
        assert_eq!(store.index().unwrap(), 2);
    }

    #[test]
    fn test_store_through_reference() {
        fn bump<S: ProgressStore>(mut store: S) {
            let index = store.index().unwrap();
            store.set_index(index + 1).unwrap();
        }
        let mut store = MemoryStore::with(CutPlan::new(), 4);

        bump(&mut store);

        assert_eq!(store.index().unwrap(), 5);
    }
}
