//! Example demonstrating logging capabilities
//!
//! Run with JSON logging (production):
//! ```bash
//! cargo run --example logging --features logging-json
//! ```
//!
//! Run with pretty logging (development):
//! ```bash
//! cargo run --example logging --features logging-pretty
//! ```

use scoped_injector::{
    Arguments, Construct, Container, FixedParams, Lifetime, Parameter, Result, Strategy,
};
use std::sync::Arc;

#[allow(dead_code)]
struct Database {
    url: String,
}

#[allow(dead_code)]
struct RequestContext {
    request_id: u64,
}

#[allow(dead_code)]
struct UserService {
    db: Arc<Database>,
    ctx: Arc<RequestContext>,
}

impl Construct for UserService {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::inject::<Database>("db"),
            Parameter::inject::<RequestContext>("ctx"),
        ]
    }

    fn construct(args: &Arguments) -> Result<Self> {
        Ok(UserService {
            db: args.get("db")?,
            ctx: args.get("ctx")?,
        })
    }
}

fn main() {
    // JSON if logging-json is enabled, pretty if logging-pretty
    scoped_injector::logging::builder()
        .trace()
        .injector_only()
        .with_thread_ids()
        .init();

    println!("=== Scoped Injector Logging Demo ===\n");

    // logs: "Creating new DI container"
    let container = Container::new();

    // logs: "Registering prebuilt instance"
    container.instance(Database {
        url: "postgres://localhost/mydb".into(),
    });

    // logs: "Registering capability"
    let next_id = std::sync::atomic::AtomicU64::new(1);
    container.register::<RequestContext>(
        Strategy::factory(move || {
            Arc::new(RequestContext {
                request_id: next_id.fetch_add(1, std::sync::atomic::Ordering::Relaxed),
            })
        }),
        Lifetime::Scoped,
    );

    // logs: "Fixed parameter matches no declared constructor parameter"
    container.register_with::<UserService>(
        Strategy::constructor::<UserService>(),
        Lifetime::Transient,
        FixedParams::new().value("timeout_ms", 500u64),
    );

    // logs: "Resolution failed" (scoped capability outside any scope)
    let outside = container.resolve::<UserService>();
    assert!(outside.is_err());

    // logs: "Entered scope", "Built scoped instance", "Resolved scoped instance from cache"
    {
        let scope = container.enter_scope();
        let _first = scope.resolve::<UserService>().unwrap();
        let _second = scope.resolve::<UserService>().unwrap();

        // Nested scope (logs: "Entered scope" with depth = 2)
        let nested = container.enter_scope();
        let _inner = nested.resolve::<RequestContext>().unwrap();
    } // logs: "Exited scope" twice

    // logs: "Replaced existing registration"
    container.instance(Database {
        url: "postgres://replica/mydb".into(),
    });

    // logs: "Container locked"
    container.lock();

    println!("\n=== Demo Complete ===");
    println!("Check the log output above to see structured logging in action!");
    println!("\nTip: Use --features logging-json for production (JSON output)");
    println!("     Use --features logging-pretty for development (colorful output)");
}
