#![no_main]

//! Fuzz target for scope lifecycle
//!
//! Enters, exits and resolves through scopes in arbitrary order and checks
//! the stack against a model: depth, active scope, scoped identity within a
//! scope and `NoActiveScope` outside of any.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scoped_injector::{Container, DiError, ScopeGuard, ScopeId};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Unit;

#[derive(Debug, Default)]
struct Shared;

#[derive(Debug, Default)]
struct Fresh;

#[derive(Debug, Arbitrary)]
enum ScopeOp {
    Enter,
    // Drop the guard at this index (mod live guards)
    DropGuard(u8),
    ExitInnermost,
    ResolveScoped,
    ResolveThroughGuard(u8),
    ResolveSingleton,
    ResolveTransient,
}

fuzz_target!(|ops: Vec<ScopeOp>| {
    let container = Container::new();
    container.scoped(Unit::default);
    container.singleton(Shared::default);
    container.transient(Fresh::default);

    let mut guards: Vec<ScopeGuard<'_>> = Vec::new();
    // Model of the live stack
    let mut stack: Vec<ScopeId> = Vec::new();
    let mut last_scoped: Option<(ScopeId, Arc<Unit>)> = None;
    let singleton = container.resolve::<Shared>().unwrap();

    for op in ops.into_iter().take(200) {
        match op {
            ScopeOp::Enter => {
                let guard = container.enter_scope();
                assert_eq!(guard.parent(), stack.last().copied());
                stack.push(guard.id());
                guards.push(guard);
            }
            ScopeOp::DropGuard(index) => {
                if guards.is_empty() {
                    continue;
                }
                let guard = guards.remove(index as usize % guards.len());
                // Dropping closes the scope and everything above it
                if let Some(pos) = stack.iter().position(|id| *id == guard.id()) {
                    stack.truncate(pos);
                }
                drop(guard);
            }
            ScopeOp::ExitInnermost => {
                assert_eq!(container.exit_scope(), stack.pop());
            }
            ScopeOp::ResolveScoped => match container.resolve::<Unit>() {
                Ok(unit) => {
                    let active = *stack.last().unwrap();
                    if let Some((scope, ref previous)) = last_scoped {
                        if scope == active {
                            assert!(Arc::ptr_eq(previous, &unit));
                        }
                    }
                    last_scoped = Some((active, unit));
                }
                Err(DiError::NoActiveScope { .. }) => assert!(stack.is_empty()),
                Err(other) => panic!("unexpected error: {other}"),
            },
            ScopeOp::ResolveThroughGuard(index) => {
                if guards.is_empty() {
                    continue;
                }
                let guard = &guards[index as usize % guards.len()];
                match guard.resolve::<Unit>() {
                    Ok(_) => assert!(stack.contains(&guard.id())),
                    Err(DiError::ScopeExited { scope, .. }) => {
                        assert_eq!(scope, guard.id());
                        assert!(!stack.contains(&scope));
                    }
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
            ScopeOp::ResolveSingleton => {
                let again = container.resolve::<Shared>().unwrap();
                assert!(Arc::ptr_eq(&singleton, &again));
            }
            ScopeOp::ResolveTransient => {
                let a = container.resolve::<Fresh>().unwrap();
                let b = container.resolve::<Fresh>().unwrap();
                assert!(!Arc::ptr_eq(&a, &b));
            }
        }

        assert_eq!(container.scope_depth(), stack.len());
        assert_eq!(container.active_scope(), stack.last().copied());
    }

    drop(guards);
    assert_eq!(container.scope_depth(), 0);
});
