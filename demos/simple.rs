//! Example demonstrating a predicate injected into a greeter
//!
//! Run with:
//!   cargo run --example simple

use autowire::Registry;
use std::sync::Arc;

#[derive(Clone)]
struct IsPrime(fn(u32) -> bool);

struct Greeter(Arc<dyn Fn(&str, u32) -> String + Send + Sync>);

fn is_prime(num: u32) -> bool {
    if num < 2 {
        return false;
    }
    (2..).take_while(|i| i * i <= num).all(|i| num % i != 0)
}

fn main() {
    let mut registry = Registry::new();

    registry
        .bind(IsPrime(is_prime))
        .expect("Failed to bind IsPrime");
    registry
        .bind_constructor::<Greeter, _>(
            |is_prime: IsPrime| {
                Greeter(Arc::new(move |name: &str, age: u32| {
                    let statement = if (is_prime.0)(age) { "is" } else { "is not" };
                    format!("Hello {name}, your age {statement} prime.")
                }))
            },
            false,
        )
        .expect("Failed to bind Greeter");

    let greeter = registry.resolve::<Greeter>(false).unwrap();
    println!("{}", (greeter.0)("Dominik", 33));
}
