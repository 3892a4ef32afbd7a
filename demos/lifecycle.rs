//! Two configurations of the same three capabilities, driven through a scope
//!
//! ```bash
//! cargo run --example lifecycle
//! ```
//!
//! Config 1 wires debug services by constructor: A transient, B scoped,
//! C singleton. Config 2 wires release services: A singleton, B transient,
//! and C from a factory that resolves B itself.

use scoped_injector::{
    implements, Arguments, Construct, Container, Lifetime, Parameter, Result, Strategy,
};
use std::sync::Arc;

trait ServiceA: Send + Sync {
    fn do_a(&self) -> String;
}

trait ServiceB: Send + Sync {
    fn do_b(&self) -> String;
}

trait ServiceC: Send + Sync {
    fn do_c(&self) -> String;
}

// =============================================================================
// Debug services
// =============================================================================

struct ServiceADebug;

impl ServiceA for ServiceADebug {
    fn do_a(&self) -> String {
        "A debug".into()
    }
}

impl Construct for ServiceADebug {
    fn parameters() -> Vec<Parameter> {
        Vec::new()
    }

    fn construct(_args: &Arguments) -> Result<Self> {
        Ok(ServiceADebug)
    }
}

struct ServiceBDebug {
    a: Arc<dyn ServiceA>,
}

impl ServiceB for ServiceBDebug {
    fn do_b(&self) -> String {
        format!("B debug uses {}", self.a.do_a())
    }
}

impl Construct for ServiceBDebug {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::inject::<dyn ServiceA>("a_service")]
    }

    fn construct(args: &Arguments) -> Result<Self> {
        Ok(ServiceBDebug {
            a: args.get("a_service")?,
        })
    }
}

struct ServiceCDebug {
    b: Arc<dyn ServiceB>,
}

impl ServiceC for ServiceCDebug {
    fn do_c(&self) -> String {
        format!("C debug uses {}", self.b.do_b())
    }
}

impl Construct for ServiceCDebug {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::inject::<dyn ServiceB>("b_service")]
    }

    fn construct(args: &Arguments) -> Result<Self> {
        Ok(ServiceCDebug {
            b: args.get("b_service")?,
        })
    }
}

implements!(ServiceADebug => dyn ServiceA);
implements!(ServiceBDebug => dyn ServiceB);
implements!(ServiceCDebug => dyn ServiceC);

// =============================================================================
// Release services
// =============================================================================

struct ServiceARelease;

impl ServiceA for ServiceARelease {
    fn do_a(&self) -> String {
        "A release".into()
    }
}

struct ServiceBRelease {
    a: Arc<dyn ServiceA>,
}

impl ServiceB for ServiceBRelease {
    fn do_b(&self) -> String {
        format!("B release uses {}", self.a.do_a())
    }
}

impl Construct for ServiceBRelease {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::inject::<dyn ServiceA>("a_service")]
    }

    fn construct(args: &Arguments) -> Result<Self> {
        Ok(ServiceBRelease {
            a: args.get("a_service")?,
        })
    }
}

struct ServiceCRelease {
    b: Arc<dyn ServiceB>,
}

impl ServiceC for ServiceCRelease {
    fn do_c(&self) -> String {
        format!("C release uses {}", self.b.do_b())
    }
}

implements!(ServiceBRelease => dyn ServiceB);

// =============================================================================
// Configurations
// =============================================================================

fn config1() -> Container {
    let container = Container::new();
    container.register::<dyn ServiceA>(
        Strategy::constructor::<ServiceADebug>(),
        Lifetime::Transient,
    );
    container.register::<dyn ServiceB>(Strategy::constructor::<ServiceBDebug>(), Lifetime::Scoped);
    container.register::<dyn ServiceC>(
        Strategy::constructor::<ServiceCDebug>(),
        Lifetime::Singleton,
    );
    container
}

fn config2() -> Container {
    let container = Container::new();
    container.register::<dyn ServiceA>(
        Strategy::factory(|| Arc::new(ServiceARelease) as Arc<dyn ServiceA>),
        Lifetime::Singleton,
    );
    container.register::<dyn ServiceB>(
        Strategy::constructor::<ServiceBRelease>(),
        Lifetime::Transient,
    );
    container.register::<dyn ServiceC>(
        Strategy::with_resolver(|resolver| {
            let b = resolver.resolve::<dyn ServiceB>()?;
            Ok(Arc::new(ServiceCRelease { b }) as Arc<dyn ServiceC>)
        }),
        Lifetime::Transient,
    );
    container
}

fn demo(container: &Container) -> Result<()> {
    println!("---- New Request ----");
    let a1 = container.resolve::<dyn ServiceA>()?;
    let a2 = container.resolve::<dyn ServiceA>()?;
    println!("A? {}", Arc::ptr_eq(&a1, &a2));

    let scope = container.enter_scope();

    let b1 = scope.resolve::<dyn ServiceB>()?;
    let b2 = scope.resolve::<dyn ServiceB>()?;
    println!("B in scope? {}", Arc::ptr_eq(&b1, &b2));

    let c1 = scope.resolve::<dyn ServiceC>()?;
    let c2 = scope.resolve::<dyn ServiceC>()?;
    println!("C? {}", Arc::ptr_eq(&c1, &c2));

    println!("{} | {} | {}", a1.do_a(), b1.do_b(), c1.do_c());
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    scoped_injector::logging::init();

    println!("== Config 1 ==");
    demo(&config1())?;

    println!("\n== Config 2 ==");
    demo(&config2())?;

    Ok(())
}
