//! Stamped memoization cells
//!
//! A `Memo<T>` holds a value together with the document version it was
//! computed at. Reads compare the stored stamp against the current version
//! and recompute on mismatch. There is no explicit invalidation call; the
//! version counter is the single coherency signal.

use parking_lot::Mutex;
use std::sync::Arc;

pub struct Memo<T> {
    cell: Mutex<Option<(u64, Arc<T>)>>,
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self {
            cell: Mutex::new(None),
        }
    }

    /// Return the cached value if it was computed at `stamp`, otherwise
    /// run `compute`, store the result under `stamp`, and return it.
    pub fn get_or_compute(&self, stamp: u64, compute: impl FnOnce() -> T) -> Arc<T> {
        let mut guard = self.cell.lock();
        match &*guard {
            Some((cached_stamp, value)) if *cached_stamp == stamp => value.clone(),
            _ => {
                let value = Arc::new(compute());
                *guard = Some((stamp, value.clone()));
                value
            }
        }
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stamp = self.cell.lock().as_ref().map(|(s, _)| *s);
        f.debug_struct("Memo").field("stamp", &stamp).finish()
    }
}
