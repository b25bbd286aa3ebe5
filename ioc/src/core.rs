//! Core data structures shared by the container, descriptors and injection tables.

use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

thread_local! {
  // The identifiers currently being built on this thread, tagged with the
  // address of the container doing the building.
  static RESOLVING_STACK: RefCell<HashSet<ResolutionKey>> = RefCell::new(HashSet::new());
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct ResolutionKey {
  container: usize,
  id: String,
}

/// An RAII guard to detect circular dependencies.
///
/// Entering pushes the identifier onto the thread-local resolution stack and
/// fails if it is already there. Dropping the guard pops it again.
pub(crate) struct ResolutionGuard {
  key: ResolutionKey,
}

impl ResolutionGuard {
  pub(crate) fn enter(container: usize, id: &str) -> Result<Self> {
    let key = ResolutionKey {
      container,
      id: id.to_owned(),
    };
    let fresh = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert(key.clone()));
    if !fresh {
      return Err(Error::circular(id));
    }
    Ok(Self { key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

/// A shared, type-erased value held by the container.
///
/// Every value is stored as an `Arc<T>` behind `dyn Any`, which lets the same
/// handle carry both concrete types and trait objects (`Arc<dyn Trait>`).
/// Cloning an `Instance` clones the handle, never the value.
#[derive(Clone)]
pub struct Instance {
  value: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl Instance {
  /// Wraps an owned value.
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  /// Wraps an already shared value, including unsized ones such as `Arc<dyn Trait>`.
  pub fn from_arc<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      value: Arc::new(value),
      type_name: type_name::<T>(),
    }
  }

  /// Returns the shared value if it was stored as `T`.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.value.downcast_ref::<Arc<T>>().cloned()
  }

  /// Returns `true` if the value was stored as `T`.
  pub fn is<T: ?Sized + Any + Send + Sync>(&self) -> bool {
    self.value.is::<Arc<T>>()
  }

  /// The name of the type this instance was created from.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Returns `true` if both handles point at the same stored value.
  pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
    Arc::ptr_eq(&a.value, &b.value)
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Instance({})", self.type_name)
  }
}
