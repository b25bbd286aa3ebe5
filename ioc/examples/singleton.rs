use autowire::{Container, Descriptor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let container = Container::new();

  // The factory runs once per cached instance.
  container.register_type(
    "RequestTracker",
    Descriptor::without_constructor(|| {
      println!("Creating RequestTracker...");
      RequestTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      }
    }),
  );

  println!("--- Resolving twice ---");
  let t1 = container.make_as::<RequestTracker>("RequestTracker").unwrap();
  let t2 = container.make_as::<RequestTracker>("RequestTracker").unwrap();
  println!("Tracker 1 ID: {}, Tracker 2 ID: {}", t1.id, t2.id);
  assert!(Arc::ptr_eq(&t1, &t2), "Cached instances should be identical");

  println!("\n--- Removing and resolving again ---");
  container.remove("RequestTracker");
  let t3 = container.make_as::<RequestTracker>("RequestTracker").unwrap();
  println!("Tracker 3 ID: {}", t3.id);
  assert_eq!(t3.id, 1);
  assert!(!Arc::ptr_eq(&t1, &t3), "A removed instance is rebuilt");
}
