//! Example demonstrating logging capabilities
//!
//! Run with JSON logging:
//! ```bash
//! cargo run --example logging --features logging-json
//! ```
//!
//! Run with pretty logging:
//! ```bash
//! cargo run --example logging --features logging-pretty
//! ```

use autowire::Registry;

#[allow(dead_code)]
#[derive(Clone)]
struct Database {
    url: String,
}

#[allow(dead_code)]
struct UserService {
    db: Database,
}

#[allow(dead_code)]
struct RequestId(u64);

fn main() {
    autowire::logging::builder().trace().autowire_only().init();

    println!("=== Autowire Logging Demo ===\n");

    // logs: "Creating new registry", then "Registered binding" per bind
    let mut registry = Registry::new();
    registry
        .bind(Database {
            url: "postgres://localhost/mydb".into(),
        })
        .unwrap();
    registry
        .bind_constructor::<UserService, _>(|db: Database| UserService { db }, false)
        .unwrap();
    registry
        .bind_constructor::<RequestId, _>(|| RequestId(7), true)
        .unwrap();

    // logs: "Constructing binding", then "Binding resolved from cache"
    let _users = registry.resolve::<UserService>(false).unwrap();
    let _users = registry.resolve::<UserService>(false).unwrap();

    // prototypes construct every time
    let _a = registry.resolve::<RequestId>(false).unwrap();
    let _b = registry.resolve::<RequestId>(false).unwrap();

    // logs: "No binding registered for type"
    assert!(registry.try_resolve::<i32>(false).is_none());

    // logs: "Rejected binding"
    let _ = registry.bind_constructor::<UserService, _>(|| 42u8, false);

    // logs: "Setting property"
    registry.set_property("mode", "double");

    println!("\n=== Demo Complete ===");
    println!("\nTip: Use --features logging-json for JSON output");
    println!("     Use --features logging-pretty for human-readable output");
}
