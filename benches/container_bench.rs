//! Benchmarks for the DI container

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use scoped_injector::{
    implements, Arguments, Construct, Container, FixedParams, Lifetime, Parameter, Result,
    Strategy,
};
use std::hint::black_box;
use std::sync::Arc;

#[allow(dead_code)]
struct SmallService {
    value: i32,
}

#[allow(dead_code)]
struct MediumService {
    name: String,
    values: Vec<i32>,
}

trait Repository: Send + Sync {
    fn id(&self) -> u32;
}

struct InMemory;

impl Repository for InMemory {
    fn id(&self) -> u32 {
        1
    }
}

implements!(InMemory => dyn Repository);

// Three-level constructor graph: Handler -> Service -> dyn Repository
#[allow(dead_code)]
struct Service {
    repo: Arc<dyn Repository>,
    retries: u32,
}

impl Construct for Service {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::inject::<dyn Repository>("repo"),
            Parameter::value::<u32>("retries"),
        ]
    }

    fn construct(args: &Arguments) -> Result<Self> {
        Ok(Service {
            repo: args.get("repo")?,
            retries: args.value("retries")?,
        })
    }
}

#[allow(dead_code)]
struct Handler {
    service: Arc<Service>,
}

impl Construct for Handler {
    fn parameters() -> Vec<Parameter> {
        vec![Parameter::inject::<Service>("service")]
    }

    fn construct(args: &Arguments) -> Result<Self> {
        Ok(Handler {
            service: args.get("service")?,
        })
    }
}

fn graph(service: Lifetime) -> Container {
    let container = Container::new();
    container.register::<dyn Repository>(
        Strategy::factory(|| Arc::new(InMemory) as Arc<dyn Repository>),
        Lifetime::Singleton,
    );
    container.register_with::<Service>(
        Strategy::constructor::<Service>(),
        service,
        FixedParams::new().value("retries", 3u32),
    );
    container.register::<Handler>(Strategy::constructor::<Handler>(), Lifetime::Transient);
    container
}

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    group.bench_function("instance_small", |b| {
        b.iter(|| {
            let container = Container::new();
            container.instance(SmallService { value: 42 });
            black_box(container)
        })
    });

    group.bench_function("singleton_medium", |b| {
        b.iter(|| {
            let container = Container::new();
            container.singleton(|| MediumService {
                name: "test".to_string(),
                values: vec![1, 2, 3, 4, 5],
            });
            black_box(container)
        })
    });

    group.bench_function("transient", |b| {
        b.iter(|| {
            let container = Container::new();
            container.transient(|| SmallService { value: 42 });
            black_box(container)
        })
    });

    group.bench_function("constructor_graph_3", |b| {
        b.iter(|| black_box(graph(Lifetime::Transient)))
    });

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    group.throughput(Throughput::Elements(1));

    let container = Container::new();
    container.instance(SmallService { value: 42 });
    container.register::<dyn Repository>(
        Strategy::factory(|| Arc::new(InMemory) as Arc<dyn Repository>),
        Lifetime::Singleton,
    );
    let _ = container.resolve::<dyn Repository>();

    group.bench_function("get_singleton", |b| {
        b.iter(|| {
            let service = container.get::<SmallService>().unwrap();
            black_box(service)
        })
    });

    group.bench_function("get_trait_object_singleton", |b| {
        b.iter(|| {
            let service = container.get::<dyn Repository>().unwrap();
            black_box(service)
        })
    });

    group.bench_function("contains_check", |b| {
        b.iter(|| {
            let exists = container.contains::<SmallService>();
            black_box(exists)
        })
    });

    group.bench_function("try_resolve_not_found", |b| {
        b.iter(|| {
            let service = container.try_resolve::<MediumService>();
            black_box(service)
        })
    });

    group.finish();
}

fn bench_transient_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("transient");
    group.throughput(Throughput::Elements(1));

    let container = Container::new();
    container.transient(|| SmallService { value: 42 });

    group.bench_function("get_transient", |b| {
        b.iter(|| {
            let service = container.get::<SmallService>().unwrap();
            black_box(service)
        })
    });

    let wired = graph(Lifetime::Transient);
    group.bench_function("auto_wire_graph_3", |b| {
        b.iter(|| {
            let handler = wired.get::<Handler>().unwrap();
            black_box(handler)
        })
    });

    group.finish();
}

fn bench_scoped(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoped");

    group.bench_function("enter_exit_scope", |b| {
        let root = Container::new();
        root.instance(SmallService { value: 42 });

        b.iter(|| {
            let scope = root.enter_scope();
            black_box(scope.id())
        })
    });

    group.bench_function("resolve_cached_scoped", |b| {
        let root = Container::new();
        root.scoped(|| SmallService { value: 42 });
        let scope = root.enter_scope();
        let _ = scope.resolve::<SmallService>();

        b.iter(|| {
            let service = scope.resolve::<SmallService>().unwrap();
            black_box(service)
        })
    });

    group.bench_function("scope_per_request_graph_3", |b| {
        let root = graph(Lifetime::Scoped);

        b.iter(|| {
            // Typical request: enter a scope, build the handler twice
            root.with_scope(|scope| {
                let first = scope.resolve::<Handler>().unwrap();
                let second = scope.resolve::<Handler>().unwrap();
                black_box((first, second))
            })
        })
    });

    group.finish();
}

fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");

    group.bench_function("concurrent_reads_4", |b| {
        let container = Container::new();
        container.instance(SmallService { value: 42 });
        container.lock();

        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..4 {
                    s.spawn(|| {
                        for _ in 0..100 {
                            let _ = container.get::<SmallService>().unwrap();
                        }
                    });
                }
            })
        })
    });

    group.bench_function("concurrent_scopes_4", |b| {
        let container = graph(Lifetime::Scoped);
        container.lock();

        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..4 {
                    s.spawn(|| {
                        for _ in 0..25 {
                            let scope = container.enter_scope();
                            let _ = scope.resolve::<Handler>().unwrap();
                        }
                    });
                }
            })
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_registration,
    bench_resolution,
    bench_transient_resolution,
    bench_scoped,
    bench_concurrent,
);

criterion_main!(benches);
