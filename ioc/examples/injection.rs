use autowire::{global, injectable, overrides, Args, Callable, Injectable, Param, Result};

struct Invoice {
  number: u32,
}
injectable!(Invoice);

fn main() {
  global().put("Currency", String::from("EUR"));

  // Attach a method to `Invoice` at runtime. Its parameters are resolved by the container.
  Invoice::register_injectable(
    "format_total",
    Callable::new(
      vec![Param::object("currency", "Currency"), Param::float("amount")],
      |args: &Args| -> Result<String> {
        Ok(format!(
          "{:.2} {}",
          args.value::<f64>("amount")?,
          args.value::<String>("currency")?
        ))
      },
    ),
  );

  let invoice = Invoice { number: 17 };
  let total = invoice
    .invoke("format_total", &overrides! { "amount" => 99.5_f64 })
    .unwrap();
  println!("Invoice #{}: {}", invoice.number, total.downcast::<String>().unwrap());

  match invoice.invoke("refund", &overrides! {}) {
    Ok(_) => panic!("`refund` was never registered"),
    Err(err) => println!("Correctly received an error: {}", err),
  }
}
