//! Example demonstrating re-binding and forced rebind
//!
//! Run with:
//!   cargo run --example refresh

use autowire::Registry;
use std::sync::Arc;

#[derive(Clone)]
struct Op(Arc<dyn Fn(i64) -> i64 + Send + Sync>);

struct Calculator {
    op: Op,
}

impl Calculator {
    fn run(&self, x: i64) -> i64 {
        (self.op.0)(x)
    }
}

fn main() {
    println!("=== Autowire Refresh Demo ===\n");

    let mut registry = Registry::new();
    registry
        .bind(Op(Arc::new(|x| x * 2)))
        .expect("Failed to bind Op");
    registry
        .bind_constructor::<Calculator, _>(|op: Op| Calculator { op }, false)
        .expect("Failed to bind Calculator");

    let calc = registry.resolve::<Calculator>(false).unwrap();
    println!("double(2)            = {}", calc.run(2));

    // Swap the operation; the cached Calculator still holds the old one
    registry
        .bind(Op(Arc::new(|x| x * 4)))
        .expect("Failed to re-bind Op");

    let cached = registry.resolve::<Calculator>(false).unwrap();
    println!("cached after re-bind = {}", cached.run(2));

    // A forced rebind rebuilds the whole chain from current bindings
    let fresh = registry.resolve::<Calculator>(true).unwrap();
    println!("forced rebind        = {}", fresh.run(2));

    assert_eq!(cached.run(2), 4);
    assert_eq!(fresh.run(2), 8);

    println!("\n=== Demo Complete ===");
}
