//! # Autowire
//!
//! A name-keyed, thread-safe Inversion of Control (IoC) container for Rust.
//!
//! Services are requested by abstract identifier. The container resolves the
//! identifier through a binding or an alias, returns the cached singleton if
//! there is one, and otherwise builds it from the registered constructor
//! metadata, making every object-typed dependency recursively.
//!
//! ## Core Concepts
//!
//! - **Container**: owns the instance cache, bindings, aliases and type descriptors.
//! - **Binding**: "when asked for X, construct Y instead". Always wins over an alias.
//! - **Alias**: "X is another name for Y". Consulted only without a binding.
//! - **Descriptor**: a type's constructor parameters and factory, registered up front
//!   in place of runtime reflection.
//! - **Overrides**: named arguments that bypass automatic resolution for one build.
//! - **Global Container**: a lazily created process-wide container, see [`global()`].
//!
//! Parameters resolve with this precedence: an override of the same name, then
//! (for object-typed parameters) the container, then the declared default.
//! Primitive parameters never come from the container.
//!
//! ## Quick Start
//!
//! ```
//! use autowire::{overrides, Args, Container, Descriptor, Param, Result};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!   fn prefix(&self) -> String;
//! }
//!
//! struct StdoutLogger {
//!   prefix: String,
//! }
//!
//! impl Logger for StdoutLogger {
//!   fn prefix(&self) -> String {
//!     self.prefix.clone()
//!   }
//! }
//!
//! struct Mailer {
//!   logger: Arc<dyn Logger>,
//!   retries: i64,
//! }
//!
//! let container = Container::new();
//!
//! // Constructor metadata stands in for reflection.
//! container.register_type(
//!   "StdoutLogger",
//!   Descriptor::shared(
//!     vec![Param::string("prefix").with_default(String::from("[app]"))],
//!     |args: &Args| -> Result<Arc<dyn Logger>> {
//!       Ok(Arc::new(StdoutLogger { prefix: args.value("prefix")? }))
//!     },
//!   ),
//! );
//! container.register_type(
//!   "Mailer",
//!   Descriptor::new(
//!     vec![Param::object("logger", "Logger"), Param::int("retries")],
//!     |args: &Args| -> Result<Mailer> {
//!       Ok(Mailer {
//!         logger: args.get::<dyn Logger>("logger")?,
//!         retries: args.value("retries")?,
//!       })
//!     },
//!   ),
//! );
//!
//! // The interface is bound to its implementation.
//! container.bind("Logger", "StdoutLogger");
//!
//! let mailer = container
//!   .make_as_with::<Mailer>("Mailer", &overrides! { "retries" => 3_i64 })
//!   .unwrap();
//!
//! assert_eq!(mailer.logger.prefix(), "[app]");
//! assert_eq!(mailer.retries, 3);
//! assert!(container.has("Logger"));
//! ```

mod container;
mod core;
mod descriptor;
mod error;
mod global;
mod injection;
mod macros;

pub use crate::core::Instance;
pub use container::Container;
pub use descriptor::{Args, Callable, Describe, Descriptor, Overrides, Param, ParamKind, TypeDescriptor};
pub use error::{Error, Result};
pub use global::{global, set_global};
pub use injection::{Injectable, Injections};

#[doc(hidden)]
pub mod __private {
  pub use once_cell::sync::Lazy;
}
