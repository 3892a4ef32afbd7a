//! Example demonstrating the #[derive(Construct)] macro
//!
//! Run with:
//!   cargo run --example derive --features derive

use scoped_injector::{Construct, Container, FixedParams, Lifetime, Strategy};
use std::sync::Arc;

trait Database: Send + Sync {
    fn url(&self) -> &str;
}

trait Cache: Send + Sync {
    fn size(&self) -> usize;
}

#[allow(dead_code)]
struct Logger {
    level: String,
}

#[derive(Construct)]
#[provides(dyn Database)]
struct Postgres {
    #[param]
    url: String,
}

impl Database for Postgres {
    fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Construct)]
#[provides(dyn Cache)]
struct LruCache {
    #[param(default)]
    size: usize,
}

impl Cache for LruCache {
    fn size(&self) -> usize {
        self.size
    }
}

// Service with auto-wired dependencies
#[derive(Construct)]
struct UserService {
    db: Arc<dyn Database>,
    cache: Arc<dyn Cache>,
    logger: Option<Arc<Logger>>,
    // Not a parameter; uses Default
    request_count: u64,
}

impl UserService {
    fn describe(&self) -> String {
        let logger_status = if self.logger.is_some() {
            "with logging"
        } else {
            "without logging"
        };
        format!(
            "UserService connected to {} with cache size {} ({}, requests: {})",
            self.db.url(),
            self.cache.size(),
            logger_status,
            self.request_count
        )
    }
}

// Nested auto-wiring
#[derive(Construct)]
struct ApiController {
    users: Arc<UserService>,
}

fn main() -> scoped_injector::Result<()> {
    println!("=== Scoped Injector Derive Macro Demo ===\n");

    let container = Container::new();
    container.register_with::<dyn Database>(
        Strategy::constructor::<Postgres>(),
        Lifetime::Singleton,
        FixedParams::new().value("url", String::from("postgres://localhost:5432/myapp")),
    );
    container.register_with::<dyn Cache>(
        Strategy::constructor::<LruCache>(),
        Lifetime::Singleton,
        FixedParams::new().value("size", 1024usize),
    );
    // Logger is NOT registered, so it will be None
    container.register::<UserService>(Strategy::constructor::<UserService>(), Lifetime::Scoped);
    container.register::<ApiController>(
        Strategy::constructor::<ApiController>(),
        Lifetime::Transient,
    );

    println!("Declared parameters of UserService:");
    for parameter in UserService::parameters() {
        println!(
            "  {} : {}{}",
            parameter.name(),
            parameter.type_name(),
            if parameter.is_required() { "" } else { " (optional)" }
        );
    }

    container.with_scope(|scope| -> scoped_injector::Result<()> {
        let controller = scope.resolve::<ApiController>()?;
        let users = scope.resolve::<UserService>()?;

        println!("\n{}", controller.users.describe());
        println!(
            "Controller shares the scoped UserService: {}",
            Arc::ptr_eq(&controller.users, &users)
        );
        Ok(())
    })?;

    // Register a logger and resolve in a fresh scope
    container.instance(Logger {
        level: "debug".into(),
    });
    let users = container.with_scope(|scope| scope.resolve::<UserService>())?;
    println!("{}", users.describe());

    println!("\n=== Demo Complete ===");
    Ok(())
}
