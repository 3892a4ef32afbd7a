#![no_main]

//! Fuzz target for concurrent resolution
//!
//! Threads resolve singleton, scoped and transient capabilities at once;
//! every singleton must be built exactly once and scopes must never leak
//! between threads.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scoped_injector::{Container, DiError, Lifetime, ScopeGuard, Strategy};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

#[derive(Debug)]
struct Config {
    id: usize,
}

#[derive(Debug, Default)]
struct Request;

#[derive(Debug, Default)]
struct Command;

/// Thread operation
#[derive(Debug, Clone, Arbitrary)]
enum ThreadOp {
    ResolveSingleton,
    ResolveScoped,
    ResolveTransient,
    EnterScope,
    ExitScope,
}

#[derive(Debug, Arbitrary)]
struct ConcurrentScenario {
    // Clamped to 1-8
    thread_count: u8,
    ops_per_thread: Vec<ThreadOp>,
}

fuzz_target!(|scenario: ConcurrentScenario| {
    let builds = Arc::new(AtomicUsize::new(0));
    let container = Container::new();

    container.register::<Config>(
        Strategy::factory({
            let builds = Arc::clone(&builds);
            move || {
                Arc::new(Config {
                    id: builds.fetch_add(1, Ordering::SeqCst),
                })
            }
        }),
        Lifetime::Singleton,
    );
    container.scoped(Request::default);
    container.transient(Command::default);
    container.lock();

    let thread_count = (scenario.thread_count % 8).max(1) as usize;
    let ops = scenario.ops_per_thread;

    let configs: Vec<Arc<Config>> = thread::scope(|s| {
        let handles: Vec<_> = (0..thread_count)
            .map(|_| {
                let ops = ops.clone();
                let container = &container;
                s.spawn(move || {
                    let mut guards: Vec<ScopeGuard<'_>> = Vec::new();
                    let mut seen = None;

                    for op in ops.into_iter().take(50) {
                        match op {
                            ThreadOp::ResolveSingleton => {
                                seen = Some(container.resolve::<Config>().unwrap());
                            }
                            ThreadOp::ResolveScoped => match container.resolve::<Request>() {
                                Ok(_) => assert!(!guards.is_empty()),
                                Err(DiError::NoActiveScope { .. }) => assert!(guards.is_empty()),
                                Err(other) => panic!("unexpected error: {other}"),
                            },
                            ThreadOp::ResolveTransient => {
                                let _ = container.resolve::<Command>().unwrap();
                            }
                            ThreadOp::EnterScope => guards.push(container.enter_scope()),
                            ThreadOp::ExitScope => drop(guards.pop()),
                        }
                        assert_eq!(container.scope_depth(), guards.len());
                    }

                    seen
                })
            })
            .collect();

        handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect()
    });

    assert!(builds.load(Ordering::SeqCst) <= 1);
    assert!(configs.iter().all(|c| c.id == 0 && Arc::ptr_eq(c, &configs[0])));
});
