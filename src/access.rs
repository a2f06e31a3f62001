//! Mutual-exclusion gate over the state store.
//!
//! Every read-modify-write sequence in the system runs inside
//! [`AccessSerializer::with_exclusive`]: the gate is taken, the collection
//! is loaded fresh, the closure runs against it, and the collection is
//! persisted only if the closure asks for it. Reads go through the same
//! mutex ([`AccessSerializer::with_read`]) rather than a reader-writer
//! split, because the store replaces the whole file on save and a reader
//! racing a writer could otherwise observe a torn collection.

use crate::error::Result;
use crate::store::StateStore;
use crate::types::StreakState;
use parking_lot::Mutex;

/// Whether a closure mutated the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commit {
    /// Persist the (possibly mutated) collection before releasing.
    Persist,
    /// Release without writing anything.
    Discard,
}

/// Serializes all access to the shared state collection.
pub struct AccessSerializer {
    store: StateStore,
    gate: Mutex<()>,
}

impl AccessSerializer {
    pub fn new(store: StateStore) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
        }
    }

    /// Run one exclusive read-modify-write sequence.
    ///
    /// Loads the collection, invokes `f`, and saves the collection iff `f`
    /// returned [`Commit::Persist`]. At most one such sequence is in
    /// flight at any time, across message handlers and the inactivity
    /// sweep alike.
    ///
    /// Callers must not perform network sends inside `f`; compute and
    /// persist first, deliver after the gate is released.
    pub fn with_exclusive<T>(
        &self,
        f: impl FnOnce(&mut StreakState) -> (Commit, T),
    ) -> Result<T> {
        let _guard = self.gate.lock();

        let mut state = self.store.load()?;
        let (commit, value) = f(&mut state);
        if commit == Commit::Persist {
            self.store.save(&state)?;
        }

        Ok(value)
    }

    /// Run a read-only operation under the same gate.
    pub fn with_read<T>(&self, f: impl FnOnce(&StreakState) -> T) -> Result<T> {
        self.with_exclusive(|state| (Commit::Discard, f(state)))
    }
}
