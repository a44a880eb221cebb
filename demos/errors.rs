//! Example demonstrating the error cases
//!
//! Run with:
//!   cargo run --example errors

use autowire::{DiError, Instance, Registry, TypeKey};

#[derive(Clone)]
struct IsPrime;

#[derive(Clone)]
struct Assembler;

struct Greeter;

fn main() {
    println!("=== Autowire Errors Demo ===\n");

    let mut registry = Registry::new();

    // Constructor output does not match the target type
    let err = registry
        .bind_constructor::<Greeter, _>(|| String::from("Hello World"), false)
        .unwrap_err();
    println!("wrong output:      {err}");

    // Constructor that produces nothing
    let err = registry
        .bind_constructor::<Greeter, _>(|| {}, false)
        .unwrap_err();
    println!("no output:         {err}");

    // Constructor mode with something that is not callable
    let err = registry
        .register(
            TypeKey::of::<Greeter>(),
            Instance::new(String::from("Hello World")),
            true,
            false,
        )
        .unwrap_err();
    println!("not callable:      {err}");

    // Transitive dependency that was never bound
    registry
        .bind_constructor::<Assembler, _>(|_: IsPrime| Assembler, false)
        .expect("Failed to bind Assembler");
    registry
        .bind_constructor::<Greeter, _>(|_: Assembler| Greeter, false)
        .expect("Failed to bind Greeter");

    match registry.resolve::<Greeter>(false) {
        Err(err @ DiError::BindingNotFound { .. }) => println!("missing dependency: {err}"),
        Err(err) => println!("unexpected error: {err}"),
        Ok(_) => println!("unexpectedly resolved"),
    }

    // try_resolve folds the error into None
    assert!(registry.try_resolve::<Greeter>(false).is_none());

    registry.bind(IsPrime).expect("Failed to bind IsPrime");
    assert!(registry.resolve::<Greeter>(false).is_ok());
    println!("\nresolved once IsPrime was bound");

    println!("\n=== Demo Complete ===");
}
