//! Public macros for ergonomic resolution and injection.

/// Resolves a service from the global container.
///
/// It panics if the service cannot be made, which suits wiring code where
/// a missing dependency is a programming error. For a non-panicking version,
/// use `global().get::<T>()` or `global().make_as::<T>(id)` directly.
///
/// # Panics
///
/// Panics if the service cannot be built or is not of the requested type.
///
/// # Examples
///
/// ```
/// use autowire::{global, resolve, Descriptor};
///
/// struct Clock;
///
/// global().register_type("Clock", Descriptor::without_constructor(|| Clock));
///
/// // Resolve it by identifier and type.
/// let clock = resolve!(Clock, "Clock");
/// ```
///
/// ```
/// use autowire::{global, resolve, Describe, Descriptor};
///
/// struct Clock;
/// impl Describe for Clock {
///   const NAME: &'static str = "DescribedClock";
///   fn descriptor() -> Descriptor {
///     Descriptor::without_constructor(|| Clock)
///   }
/// }
///
/// global().register::<Clock>();
/// let clock = resolve!(Clock);
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for a type that describes itself: resolve!(MyService)
  ($type:ty) => {
    $crate::global().get::<$type>().unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service {}: {}",
        std::any::type_name::<$type>(),
        err
      )
    })
  };

  // Arm for an explicit identifier: resolve!(MyService, "id")
  ($type:ty, $id:expr) => {
    $crate::global()
      .make_as::<$type>($id)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service '{}' as {}: {}",
          $id,
          std::any::type_name::<$type>(),
          err
        )
      })
  };
}

/// Builds an [`Overrides`](crate::Overrides) map from `name => value` pairs.
///
/// ```
/// use autowire::overrides;
///
/// let overrides = overrides! { "name" => String::from("custom"), "retries" => 3_i64 };
/// assert!(overrides.contains("retries"));
/// ```
#[macro_export]
macro_rules! overrides {
  () => {
    $crate::Overrides::new()
  };
  ($($name:expr => $value:expr),+ $(,)?) => {
    $crate::Overrides::new()$(.with($name, $value))+
  };
}

/// Implements [`Injectable`](crate::Injectable) for a host type, giving it
/// its own method table.
///
/// ```
/// use autowire::{injectable, Callable, Container, Injectable, Overrides};
///
/// struct Report;
/// injectable!(Report);
///
/// Report::register_injectable("title", Callable::new(vec![], |_| Ok(String::from("Q3"))));
///
/// let title = Report::invoke_in(&Container::new(), "title", &Overrides::new()).unwrap();
/// assert_eq!(*title.downcast::<String>().unwrap(), "Q3");
/// ```
#[macro_export]
macro_rules! injectable {
  ($host:ty) => {
    impl $crate::Injectable for $host {
      fn injections() -> &'static $crate::Injections {
        static INJECTIONS: $crate::__private::Lazy<$crate::Injections> =
          $crate::__private::Lazy::new($crate::Injections::new);
        &INJECTIONS
      }
    }
  };
}
