use thiserror::Error;

/// The error type for container operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// An identifier, parameter or argument could not be resolved into a value.
  ///
  /// The message carries the whole chain of nested failures, e.g.
  /// `Unable to build class [A], Unable to resolve dependency [b]`.
  #[error("{0}")]
  BindingResolution(String),

  /// A dynamically dispatched method has no registered callable.
  #[error("Method {host}::{method} does not exist.")]
  MethodNotFound { host: String, method: String },
}

impl Error {
  pub(crate) fn binding(message: impl Into<String>) -> Self {
    Error::BindingResolution(message.into())
  }

  pub(crate) fn unknown_type(id: &str) -> Self {
    Error::binding(format!("Class \"{}\" does not exist", id))
  }

  pub(crate) fn unresolvable(param: &str) -> Self {
    Error::binding(format!("Unable to resolve dependency [{}]", param))
  }

  pub(crate) fn circular(id: &str) -> Self {
    Error::binding(format!("Circular dependency detected while resolving [{}]", id))
  }

  /// Wraps a failure that happened while building `id`.
  pub(crate) fn building(id: &str, cause: Error) -> Self {
    Error::binding(format!("Unable to build class [{}], {}", id, cause))
  }

  pub(crate) fn method_not_found(host: &str, method: &str) -> Self {
    Error::MethodNotFound {
      host: host.to_owned(),
      method: method.to_owned(),
    }
  }

  /// Returns `true` for `BindingResolution` errors.
  pub fn is_binding_resolution(&self) -> bool {
    matches!(self, Error::BindingResolution(_))
  }
}

/// A specialized `Result` type for `autowire` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
