use autowire::{Args, Container, Describe, Descriptor, Param, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define concrete implementations
struct ConsoleLogger {
  prefix: String,
}
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("{} {}", self.prefix, message);
  }
}

struct SilentLogger;
impl Logger for SilentLogger {
  fn log(&self, _message: &str) {}
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
  title: String,
}

impl Describe for ReportService {
  const NAME: &'static str = "ReportService";

  fn descriptor() -> Descriptor {
    Descriptor::new(
      vec![
        Param::object("logger", "Logger"),
        Param::string("title").with_default(String::from("Monthly report")),
      ],
      |args: &Args| -> Result<ReportService> {
        Ok(ReportService {
          logger: args.get::<dyn Logger>("logger")?,
          title: args.value("title")?,
        })
      },
    )
  }
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log(&format!("Starting {}.", self.title));
    self.logger.log(&format!("Finished {}.", self.title));
  }
}

fn main() {
  // RUST_LOG=autowire=trace shows every resolution step.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let container = Container::new();

  // --- Registration ---
  container.register_type(
    "ConsoleLogger",
    Descriptor::shared(
      vec![Param::string("prefix").with_default(String::from("[CONSOLE LOG]:"))],
      |args: &Args| -> Result<Arc<dyn Logger>> {
        Ok(Arc::new(ConsoleLogger {
          prefix: args.value("prefix")?,
        }))
      },
    ),
  );
  container.register_type(
    "SilentLogger",
    Descriptor::shared(vec![], |_: &Args| -> Result<Arc<dyn Logger>> {
      Ok(Arc::new(SilentLogger))
    }),
  );
  container.register::<ReportService>();

  // The alias is a fallback; the binding takes precedence over it.
  container.alias("Logger", "SilentLogger");
  container.bind("Logger", "ConsoleLogger");

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = container.get::<ReportService>().unwrap();
  report_service.generate_report();
}
