//! Constructor metadata: the registration-time stand-in for runtime reflection.
//!
//! A [`TypeDescriptor`] tells the container which parameters a type's
//! constructor takes and how to instantiate it from the resolved arguments.
//! [`Callable`] carries the same metadata for plain functions invoked through
//! [`Container::call`](crate::Container::call).

use crate::core::Instance;
use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The declared type of a constructor or callable parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
  String,
  Array,
  Int,
  Float,
  Bool,
  /// A constructible type or interface, named by its abstract identifier.
  Object(String),
}

impl ParamKind {
  /// Primitive parameters are never resolved from the container.
  pub fn is_primitive(&self) -> bool {
    !matches!(self, ParamKind::Object(_))
  }
}

/// A single declared parameter: name, kind and optional default value.
#[derive(Debug, Clone)]
pub struct Param {
  name: String,
  kind: ParamKind,
  default: Option<Instance>,
}

impl Param {
  pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
    Self {
      name: name.into(),
      kind,
      default: None,
    }
  }

  pub fn string(name: impl Into<String>) -> Self {
    Self::new(name, ParamKind::String)
  }

  pub fn array(name: impl Into<String>) -> Self {
    Self::new(name, ParamKind::Array)
  }

  pub fn int(name: impl Into<String>) -> Self {
    Self::new(name, ParamKind::Int)
  }

  pub fn float(name: impl Into<String>) -> Self {
    Self::new(name, ParamKind::Float)
  }

  pub fn bool(name: impl Into<String>) -> Self {
    Self::new(name, ParamKind::Bool)
  }

  /// A parameter resolved by making `abstract_id` from the container.
  pub fn object(name: impl Into<String>, abstract_id: impl Into<String>) -> Self {
    Self::new(name, ParamKind::Object(abstract_id.into()))
  }

  /// A parameter resolved by making the identifier `T` describes itself with.
  pub fn of<T: Describe>(name: impl Into<String>) -> Self {
    Self::object(name, T::NAME)
  }

  /// Sets the declared default value.
  pub fn with_default<T: Any + Send + Sync>(self, value: T) -> Self {
    self.with_default_instance(Instance::new(value))
  }

  pub fn with_default_instance(mut self, value: Instance) -> Self {
    self.default = Some(value);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> &ParamKind {
    &self.kind
  }

  /// The declared default, used when no override or container value applies.
  pub fn default_value(&self) -> Option<&Instance> {
    self.default.as_ref()
  }

  /// Returns `true` if a default can stand in when resolution fails.
  pub fn has_default(&self) -> bool {
    self.default.is_some()
  }
}

/// Caller-supplied named arguments that bypass automatic resolution.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  values: HashMap<String, Instance>,
}

impl Overrides {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds an override, consuming and returning `self` for chaining.
  ///
  /// `value` is wrapped as-is; pass values that are already shared, such as
  /// `Arc<dyn Trait>`, through [`with_instance`](Self::with_instance) and
  /// [`Instance::from_arc`] instead.
  pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
    self.insert(name, Instance::new(value));
    self
  }

  pub fn with_instance(mut self, name: impl Into<String>, value: Instance) -> Self {
    self.insert(name, value);
    self
  }

  /// Sets the override for parameter `name`, replacing any previous one.
  pub fn insert(&mut self, name: impl Into<String>, value: Instance) {
    self.values.insert(name.into(), value);
  }

  /// Returns the override for parameter `name`, if one was supplied.
  pub fn get(&self, name: &str) -> Option<&Instance> {
    self.values.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.values.contains_key(name)
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

/// The resolved arguments handed to a factory or callable, in parameter order.
#[derive(Debug, Clone, Default)]
pub struct Args {
  values: Vec<(String, Instance)>,
}

impl Args {
  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      values: Vec::with_capacity(capacity),
    }
  }

  pub(crate) fn push(&mut self, name: &str, value: Instance) {
    self.values.push((name.to_owned(), value));
  }

  /// Returns the raw argument bound to parameter `name`.
  pub fn instance(&self, name: &str) -> Result<&Instance> {
    self
      .values
      .iter()
      .find(|(param, _)| param == name)
      .map(|(_, value)| value)
      .ok_or_else(|| Error::binding(format!("Missing argument [{}]", name)))
  }

  /// Returns the argument bound to parameter `name` as a shared `T`.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    let value = self.instance(name)?;
    value.downcast::<T>().ok_or_else(|| {
      Error::binding(format!(
        "Argument [{}] is a {}, expected {}",
        name,
        value.type_name(),
        type_name::<T>()
      ))
    })
  }

  /// Returns a clone of the argument bound to parameter `name`.
  pub fn value<T: Any + Send + Sync + Clone>(&self, name: &str) -> Result<T> {
    self.get::<T>(name).map(|shared| (*shared).clone())
  }

  /// Returns the argument at `index`, in parameter declaration order.
  pub fn at(&self, index: usize) -> Option<&Instance> {
    self.values.get(index).map(|(_, value)| value)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

/// Introspection capability for one constructible type.
pub trait TypeDescriptor: Send + Sync {
  /// The constructor parameters, or `None` if the type has no constructor.
  fn parameters(&self) -> Option<&[Param]>;

  /// Creates a new instance from arguments assembled in parameter order.
  fn instantiate(&self, args: Args) -> Result<Instance>;
}

type Factory = Arc<dyn Fn(&Args) -> Result<Instance> + Send + Sync>;

/// A [`TypeDescriptor`] built from a parameter list and a factory closure.
#[derive(Clone)]
pub struct Descriptor {
  params: Option<Vec<Param>>,
  factory: Factory,
}

impl Descriptor {
  /// A type whose constructor takes `params`.
  pub fn new<T, F>(params: Vec<Param>, factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Args) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      params: Some(params),
      factory: Arc::new(move |args: &Args| factory(args).map(Instance::new)),
    }
  }

  /// A type without a constructor, instantiated with no arguments.
  pub fn without_constructor<T, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Self {
      params: None,
      factory: Arc::new(move |_: &Args| Ok(Instance::new(factory()))),
    }
  }

  /// A type whose instances are exposed as a shared, possibly unsized `I`,
  /// typically a trait object such as `dyn Logger`.
  pub fn shared<I, F>(params: Vec<Param>, factory: F) -> Self
  where
    I: ?Sized + Any + Send + Sync,
    F: Fn(&Args) -> Result<Arc<I>> + Send + Sync + 'static,
  {
    Self {
      params: Some(params),
      factory: Arc::new(move |args: &Args| factory(args).map(Instance::from_arc)),
    }
  }
}

impl TypeDescriptor for Descriptor {
  fn parameters(&self) -> Option<&[Param]> {
    self.params.as_deref()
  }

  fn instantiate(&self, args: Args) -> Result<Instance> {
    (self.factory)(&args)
  }
}

impl fmt::Debug for Descriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Descriptor").field("params", &self.params).finish()
  }
}

/// A type that knows its own abstract identifier and constructor metadata.
///
/// ```
/// use autowire::{Args, Container, Describe, Descriptor, Param, Result};
///
/// struct Greeting {
///   text: String,
/// }
///
/// impl Describe for Greeting {
///   const NAME: &'static str = "Greeting";
///
///   fn descriptor() -> Descriptor {
///     Descriptor::new(
///       vec![Param::string("text").with_default(String::from("hello"))],
///       |args: &Args| -> Result<Greeting> {
///         Ok(Greeting { text: args.value("text")? })
///       },
///     )
///   }
/// }
///
/// let container = Container::new();
/// container.register::<Greeting>();
/// assert_eq!(container.get::<Greeting>().unwrap().text, "hello");
/// ```
pub trait Describe: Any + Send + Sync + Sized {
  const NAME: &'static str;

  fn descriptor() -> Descriptor;
}

/// A function whose parameters are resolved by the container before it runs.
#[derive(Clone)]
pub struct Callable {
  params: Vec<Param>,
  body: Factory,
}

impl Callable {
  pub fn new<T, F>(params: Vec<Param>, body: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Args) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      params,
      body: Arc::new(move |args: &Args| body(args).map(Instance::new)),
    }
  }

  pub fn params(&self) -> &[Param] {
    &self.params
  }

  pub(crate) fn invoke(&self, args: &Args) -> Result<Instance> {
    (self.body)(args)
  }
}

impl fmt::Debug for Callable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Callable").field("params", &self.params).finish()
  }
}
