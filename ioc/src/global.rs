//! The global IoC container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

// The process-wide container, created on first access in a thread-safe manner.
static GLOBAL_CONTAINER: Lazy<RwLock<Arc<Container>>> =
  Lazy::new(|| RwLock::new(Arc::new(Container::new())));

/// Returns the process-wide container.
///
/// The container is created on first use. Callers that want isolation (tests
/// in particular) can build their own `Container` or swap this one out with
/// [`set_global`].
///
/// # Examples
///
/// ```
/// use autowire::global;
///
/// fn register_services() {
///   global().put("greeting", String::from("Hello from global!"));
/// }
/// # register_services();
/// # assert!(global().has("greeting"));
/// ```
pub fn global() -> Arc<Container> {
  Arc::clone(&GLOBAL_CONTAINER.read())
}

/// Replaces the process-wide container and returns the previous one.
///
/// Handles already obtained from [`global`] keep pointing at the old container.
pub fn set_global(container: Container) -> Arc<Container> {
  std::mem::replace(&mut *GLOBAL_CONTAINER.write(), Arc::new(container))
}
