use autowire::{
  injectable, overrides, Args, Callable, Container, Descriptor, Error, Injectable, Overrides, Param,
  Result,
};
use pretty_assertions::assert_eq;

// --- Test Fixtures ---

struct Mailer {
  from: String,
}

struct Invoice;
injectable!(Invoice);

struct Receipt;
injectable!(Receipt);

fn mail_container() -> Container {
  let container = Container::new();
  container.register_type(
    "Mailer",
    Descriptor::new(
      vec![Param::string("from").with_default(String::from("billing@example.com"))],
      |args: &Args| -> Result<Mailer> {
        Ok(Mailer {
          from: args.value("from")?,
        })
      },
    ),
  );
  container
}

fn send_callable() -> Callable {
  Callable::new(
    vec![Param::object("mailer", "Mailer"), Param::string("to")],
    |args: &Args| -> Result<String> {
      let mailer = args.get::<Mailer>("mailer")?;
      Ok(format!("{} -> {}", mailer.from, args.value::<String>("to")?))
    },
  )
}

// --- Invocation Tests ---

#[test]
fn test_call_resolves_parameters_like_constructors() {
  let container = mail_container();

  let result = container
    .call(&send_callable(), &overrides! { "to" => String::from("ada@example.com") })
    .unwrap();

  assert_eq!(
    *result.downcast::<String>().unwrap(),
    "billing@example.com -> ada@example.com"
  );
  // The object dependency went through the singleton cache.
  assert!(container.has("Mailer"));
}

#[test]
fn test_call_fails_for_unresolvable_primitive() {
  let container = mail_container();

  let err = container.call(&send_callable(), &Overrides::new()).unwrap_err();

  assert_eq!(
    err,
    Error::BindingResolution("Unable to resolve dependency [to]".to_string())
  );
}

// --- Injection Tests ---

#[test]
fn test_registered_method_is_dispatched() {
  let container = mail_container();
  Invoice::register_injectable("send", send_callable());

  let result = Invoice::invoke_in(
    &container,
    "send",
    &overrides! { "to" => String::from("grace@example.com") },
  )
  .unwrap();

  assert_eq!(
    *result.downcast::<String>().unwrap(),
    "billing@example.com -> grace@example.com"
  );
}

#[test]
fn test_unregistered_method_fails() {
  let err = Receipt::invoke_in(&Container::new(), "refund", &Overrides::new()).unwrap_err();

  match &err {
    Error::MethodNotFound { host, method } => {
      assert!(host.ends_with("Receipt"));
      assert_eq!(method, "refund");
    }
    other => panic!("unexpected error: {:?}", other),
  }
  assert!(err.to_string().ends_with("Receipt::refund does not exist."));
}

#[test]
fn test_method_tables_are_per_host_type() {
  Invoice::register_injectable("total", Callable::new(vec![], |_: &Args| Ok(100_i64)));

  assert!(Invoice::injections().contains("total"));
  assert!(!Receipt::injections().contains("total"));
}

#[test]
fn test_instance_dispatch_uses_the_global_container() {
  Invoice::register_injectable(
    "label",
    Callable::new(
      vec![Param::string("prefix").with_default(String::from("INV"))],
      |args: &Args| -> Result<String> { Ok(format!("{}-001", args.value::<String>("prefix")?)) },
    ),
  );

  let label = Invoice.invoke("label", &Overrides::new()).unwrap();
  let static_label = Invoice::invoke_static("label", &overrides! { "prefix" => String::from("CR") })
    .unwrap();

  assert_eq!(*label.downcast::<String>().unwrap(), "INV-001");
  assert_eq!(*static_label.downcast::<String>().unwrap(), "CR-001");
}

#[test]
fn test_last_registered_method_wins() {
  Receipt::register_injectable("kind", Callable::new(vec![], |_: &Args| Ok("first")));
  Receipt::register_injectable("kind", Callable::new(vec![], |_: &Args| Ok("second")));

  let kind = Receipt::invoke_in(&Container::new(), "kind", &Overrides::new()).unwrap();

  assert_eq!(*kind.downcast::<&'static str>().unwrap(), "second");
}
