use autowire::{global, resolve, Args, Descriptor, Param, Result};
use std::panic;

struct Widget {
  _name: String,
}

fn main() {
  // `name` has no default and nobody supplies an override.
  global().register_type(
    "Widget",
    Descriptor::new(vec![Param::string("name")], |args: &Args| -> Result<Widget> {
      Ok(Widget {
        _name: args.value("name")?,
      })
    }),
  );

  // --- Using the fallible `make()` method ---
  match global().make("Widget") {
    Ok(_) => panic!("Should not have built the widget!"),
    Err(err) => println!("Correctly received an error: {}", err),
  }

  match global().make("NeverRegistered") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err) => println!("Correctly received an error: {}", err),
  }

  // --- Using the panicking `resolve!` macro ---
  let result = panic::catch_unwind(|| {
    let _widget = resolve!(Widget, "Widget");
  });
  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");
}
