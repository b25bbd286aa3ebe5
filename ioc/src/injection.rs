//! Method injection: named callables attached to a host type at runtime.
//!
//! A host type owns an [`Injections`] table (usually declared with the
//! [`injectable!`](crate::injectable) macro). Callables registered under a
//! method name are dispatched through [`Container::call`], so their
//! parameters are resolved exactly like constructor parameters.

use crate::container::Container;
use crate::core::Instance;
use crate::descriptor::{Callable, Overrides};
use crate::error::{Error, Result};
use crate::global::global;
use dashmap::DashMap;
use std::any::type_name;
use std::sync::Arc;
use tracing::debug;

/// The method table of one host type.
#[derive(Default)]
pub struct Injections {
  methods: DashMap<String, Arc<Callable>>,
}

impl Injections {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `callable` under `method`, replacing any previous one.
  pub fn insert(&self, method: &str, callable: Callable) {
    self.methods.insert(method.to_owned(), Arc::new(callable));
  }

  pub fn get(&self, method: &str) -> Option<Arc<Callable>> {
    self.methods.get(method).map(|entry| Arc::clone(entry.value()))
  }

  pub fn contains(&self, method: &str) -> bool {
    self.methods.contains_key(method)
  }
}

/// A host type whose methods can be registered and dispatched by name.
///
/// Only [`injections`](Injectable::injections) must be provided; the
/// [`injectable!`](crate::injectable) macro does that with a per-type static.
pub trait Injectable: 'static {
  /// The method table shared by every instance of the host type.
  fn injections() -> &'static Injections;

  /// Registers `callable` as the method `method` of this host type.
  fn register_injectable(method: &str, callable: Callable) {
    debug!(host = type_name::<Self>(), method, "method injected");
    Self::injections().insert(method, callable);
  }

  /// Dispatches `method` on an instance through the global container.
  fn invoke(&self, method: &str, overrides: &Overrides) -> Result<Instance> {
    Self::invoke_static(method, overrides)
  }

  /// Dispatches `method` through the global container.
  fn invoke_static(method: &str, overrides: &Overrides) -> Result<Instance> {
    Self::invoke_in(&global(), method, overrides)
  }

  /// Dispatches `method` through an explicit container.
  fn invoke_in(container: &Container, method: &str, overrides: &Overrides) -> Result<Instance> {
    let callable = Self::injections()
      .get(method)
      .ok_or_else(|| Error::method_not_found(type_name::<Self>(), method))?;
    container.call(&callable, overrides)
  }
}
