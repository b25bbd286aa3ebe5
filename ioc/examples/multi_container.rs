use autowire::{global, Container};

// A function that configures dependencies and runs some logic.
// By accepting a `&Container`, it can be tested with a controlled environment.
fn process_data(container: &Container) -> String {
  container.put("Data", "test data".to_string());

  let data = container
    .make_as::<String>("Data")
    .expect("Data not found in container");
  format!("Processed: {}", data.to_uppercase())
}

fn main() {
  println!("--- Running with a local container ---");
  let test_container = Container::new();
  let result = process_data(&test_container);

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // The instance cached in `test_container` must not exist in the global container.
  assert!(
    !global().has("Data"),
    "Dependency should not have leaked into the global container!"
  );

  println!("\nVerified that the local container is isolated from the global one.");
}
