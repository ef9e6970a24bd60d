use std::cell::RefCell;

use log::debug;

use crate::error::ImportError;
use crate::store::EntityStore;

/// An in-memory entity store.
///
/// Staged entities become visible through [`committed`](MemoryStore::committed)
/// only after [`commit`](EntityStore::commit), mirroring the add-batch /
/// commit contract of a real backing store. Useful for demos and tests.
pub struct MemoryStore<E> {
    staged: RefCell<Vec<E>>,
    committed: RefCell<Vec<E>>,
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            staged: RefCell::new(Vec::new()),
            committed: RefCell::new(Vec::new()),
        }
    }

    /// Number of durably persisted entities.
    pub fn committed_len(&self) -> usize {
        self.committed.borrow().len()
    }

    /// Empties the store, staged and committed alike.
    pub fn clear(&self) {
        self.staged.borrow_mut().clear();
        self.committed.borrow_mut().clear();
    }
}

impl<E: Clone> MemoryStore<E> {
    /// Snapshot of the durably persisted entities, in insertion order.
    pub fn committed(&self) -> Vec<E> {
        self.committed.borrow().clone()
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EntityStore<E> for MemoryStore<E> {
    fn add_batch(&self, entities: Vec<E>) -> Result<(), ImportError> {
        debug!("Staging batch of {} entities", entities.len());
        self.staged.borrow_mut().extend(entities);
        Ok(())
    }

    fn commit(&self) -> Result<(), ImportError> {
        let mut staged = self.staged.borrow_mut();
        debug!("Committing {} staged entities", staged.len());
        self.committed.borrow_mut().append(&mut staged);
        Ok(())
    }
}
