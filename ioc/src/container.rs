//! The main `Container` struct and its associated methods.

use crate::core::{Instance, ResolutionGuard};
use crate::descriptor::{Args, Callable, Describe, Overrides, Param, ParamKind, TypeDescriptor};
use crate::error::{Error, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::any::{type_name, Any};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// The Inversion of Control (IoC) container.
///
/// Services are keyed by abstract identifiers. Every lookup first resolves
/// the identifier through one hop of binding or alias indirection, then
/// serves the cached singleton or builds one from the registered
/// [`TypeDescriptor`], recursively making its dependencies.
///
/// The container is thread-safe. Construction of any one identifier happens at
/// most once, even under concurrent `make` calls. Builds of different
/// identifiers never wait on each other.
#[derive(Default)]
pub struct Container {
  instances: DashMap<String, Instance>,
  bindings: DashMap<String, String>,
  aliases: DashMap<String, String>,
  descriptors: DashMap<String, Arc<dyn TypeDescriptor>>,
  build_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn address(&self) -> usize {
    self as *const Container as usize
  }

  // Cloned out so the map shard is not held while building.
  fn build_lock(&self, id: &str) -> Arc<Mutex<()>> {
    Arc::clone(self.build_locks.entry(id.to_owned()).or_default().value())
  }

  fn cached(&self, id: &str) -> Option<Instance> {
    self.instances.get(id).map(|entry| entry.value().clone())
  }

  // Stores under an already canonical identifier, keeping any existing entry.
  fn store(&self, id: &str, instance: Instance) -> Instance {
    match self.instances.entry(id.to_owned()) {
      Entry::Occupied(existing) => {
        warn!(abstract_id = id, "instance already cached, discarding the new one");
        existing.get().clone()
      }
      Entry::Vacant(slot) => {
        debug!(abstract_id = id, type_name = instance.type_name(), "instance cached");
        slot.insert(instance).value().clone()
      }
    }
  }

  fn build(&self, id: &str, overrides: &Overrides) -> Result<Instance> {
    let descriptor = self
      .descriptors
      .get(id)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| Error::unknown_type(id))?;

    debug!(abstract_id = id, "building instance");
    match descriptor.parameters() {
      None => descriptor
        .instantiate(Args::default())
        .map_err(|cause| Error::building(id, cause)),
      Some(params) => self
        .dependencies(params, overrides)
        .and_then(|args| descriptor.instantiate(args))
        .map_err(|cause| Error::building(id, cause)),
    }
  }

  fn dependencies(&self, params: &[Param], overrides: &Overrides) -> Result<Args> {
    let mut args = Args::with_capacity(params.len());

    for param in params {
      let value = if let Some(value) = overrides.get(param.name()) {
        trace!(param = param.name(), "using override");
        value.clone()
      } else {
        match param.kind() {
          ParamKind::Object(dependency) => match self.make(dependency) {
            Ok(value) => value,
            Err(cause) => {
              trace!(param = param.name(), %cause, "dependency failed, trying default");
              param.default_value().cloned().ok_or(cause)?
            }
          },
          _ => param
            .default_value()
            .cloned()
            .ok_or_else(|| Error::unresolvable(param.name()))?,
        }
      };
      args.push(param.name(), value);
    }

    Ok(args)
  }

  // --- PUBLIC API ---

  // --- Type Registration ---

  /// Registers the constructor metadata for `id`.
  ///
  /// This is the container's substitute for runtime reflection: only
  /// identifiers with a descriptor can be built.
  pub fn register_type(&self, id: &str, descriptor: impl TypeDescriptor + 'static) {
    debug!(abstract_id = id, "type registered");
    self.descriptors.insert(id.to_owned(), Arc::new(descriptor));
  }

  /// Registers `T` under the identifier it describes itself with.
  pub fn register<T: Describe>(&self) {
    self.register_type(T::NAME, T::descriptor());
  }

  /// Returns `true` if `id` itself (not its resolution) has a descriptor.
  pub fn is_registered(&self, id: &str) -> bool {
    self.descriptors.contains_key(id)
  }

  // --- Bindings & Aliases ---

  /// Records that requests for `id` construct `target` instead.
  pub fn set_binding(&self, id: &str, target: &str) {
    self.bindings.insert(id.to_owned(), target.to_owned());
  }

  /// Returns the explicit binding for `id`, falling back to [`get_alias`](Self::get_alias).
  pub fn get_binding(&self, id: &str) -> String {
    match self.bindings.get(id) {
      Some(target) => target.value().clone(),
      None => self.get_alias(id),
    }
  }

  /// Records that `id` is another name for `target`.
  pub fn set_alias(&self, id: &str, target: &str) {
    self.aliases.insert(id.to_owned(), target.to_owned());
  }

  /// Returns the alias target of `id`, or `id` itself.
  pub fn get_alias(&self, id: &str) -> String {
    self
      .aliases
      .get(id)
      .map(|target| target.value().clone())
      .unwrap_or_else(|| id.to_owned())
  }

  /// Binds `id` to the concrete identifier `target`. The last binding wins.
  pub fn bind(&self, id: &str, target: &str) -> &Self {
    self.set_binding(id, target);
    self
  }

  /// Aliases `id` to `target`. The last alias wins.
  pub fn alias(&self, id: &str, target: &str) -> &Self {
    self.set_alias(id, target);
    self
  }

  /// Resolves `id` to its canonical identifier.
  ///
  /// This is a single hop: the binding if one exists, otherwise the alias,
  /// otherwise `id` unchanged. Targets are never chased further.
  pub fn resolve(&self, id: &str) -> String {
    self.get_binding(id)
  }

  // --- Instances ---

  /// Returns `true` if the canonical identifier of `id` is cached.
  pub fn has(&self, id: &str) -> bool {
    self.instances.contains_key(&self.resolve(id))
  }

  /// Caches `instance` under the canonical identifier of `id`.
  ///
  /// Entries are never overwritten: if one already exists, the supplied
  /// instance is dropped and the existing one is returned. Call
  /// [`remove`](Self::remove) first to replace a cached instance.
  pub fn put_instance(&self, id: &str, instance: Instance) -> Instance {
    self.store(&self.resolve(id), instance)
  }

  /// Caches an owned value, with the same rules as [`put_instance`](Self::put_instance).
  pub fn put<T: Any + Send + Sync>(&self, id: &str, value: T) -> Instance {
    self.put_instance(id, Instance::new(value))
  }

  /// Evicts the cached instance of `id`, if any.
  pub fn remove(&self, id: &str) -> &Self {
    let id = self.resolve(id);
    if self.instances.remove(&id).is_some() {
      debug!(abstract_id = %id, "instance removed");
    }
    self
  }

  // --- Resolution ---

  /// Makes `id` with no overrides.
  pub fn make(&self, id: &str) -> Result<Instance> {
    self.make_with(id, &Overrides::default())
  }

  /// Returns the cached instance of `id`, building and caching it first if needed.
  ///
  /// `overrides` only apply when a build actually happens; a cached instance
  /// is always returned as is.
  pub fn make_with(&self, id: &str, overrides: &Overrides) -> Result<Instance> {
    let id = self.resolve(id);
    if let Some(found) = self.cached(&id) {
      trace!(abstract_id = %id, "cache hit");
      return Ok(found);
    }

    // The guard must come before the lock: a cycle would otherwise block
    // this thread on a lock it already holds.
    let _guard = ResolutionGuard::enter(self.address(), &id)?;
    let lock = self.build_lock(&id);
    let _build = lock.lock();

    if let Some(found) = self.cached(&id) {
      return Ok(found);
    }

    let built = self.build(&id, overrides)?;
    Ok(self.store(&id, built))
  }

  /// Makes `id` and downcasts it to `T`.
  pub fn make_as<T: ?Sized + Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
    self.make_as_with(id, &Overrides::default())
  }

  /// Makes `id` with `overrides` and downcasts it to `T`.
  pub fn make_as_with<T: ?Sized + Any + Send + Sync>(
    &self,
    id: &str,
    overrides: &Overrides,
  ) -> Result<Arc<T>> {
    let instance = self.make_with(id, overrides)?;
    instance.downcast::<T>().ok_or_else(|| {
      Error::binding(format!(
        "Instance [{}] is a {}, expected {}",
        id,
        instance.type_name(),
        type_name::<T>()
      ))
    })
  }

  /// Makes the identifier `T` describes itself with.
  pub fn get<T: Describe>(&self) -> Result<Arc<T>> {
    self.make_as::<T>(T::NAME)
  }

  // --- Invocation ---

  /// Resolves the parameters of `callable` the way constructor parameters
  /// are resolved, then invokes it.
  pub fn call(&self, callable: &Callable, overrides: &Overrides) -> Result<Instance> {
    let args = self.dependencies(callable.params(), overrides)?;
    callable.invoke(&args)
  }
}
