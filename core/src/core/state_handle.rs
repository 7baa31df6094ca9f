// storefront/src/core/state_handle.rs
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared ownership plus interior mutability for store state,
/// backed by `parking_lot::RwLock`.
///
/// Guards are blocking and MUST be dropped before any `.await`.
#[derive(Debug)]
pub struct StateHandle<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> StateHandle<T> {
  pub fn new(data: T) -> Self {
    StateHandle(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Read guard narrowed to one part of the state, e.g. `handle.map_read(|s| &s.cart)`.
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&T) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Runs `f` under the write lock and returns its result.
  pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = self.write();
    f(&mut guard)
  }
}

impl<T: Send + Sync + 'static> Clone for StateHandle<T> {
  fn clone(&self) -> Self {
    StateHandle(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for StateHandle<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
