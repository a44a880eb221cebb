//! Example demonstrating live properties
//!
//! Run with:
//!   cargo run --example properties

use autowire::{Properties, Registry};

struct Multiplier {
    factor: i64,
}

/// Keeps the handle itself and reads on every call
struct Banner {
    props: Properties,
}

impl Banner {
    fn render(&self) -> String {
        let name = self.props.get_string("app.name").unwrap_or_default();
        if self.props.get_bool("app.loud").unwrap_or(false) {
            name.to_uppercase()
        } else {
            name
        }
    }
}

fn main() {
    println!("=== Autowire Properties Demo ===\n");

    let mut registry = Registry::new();
    registry.set_property("app.name", "autowire");
    registry.set_property("mode", "double");

    registry
        .bind_constructor::<Multiplier, _>(
            |props: Properties| Multiplier {
                factor: match props.get_string("mode").as_deref() {
                    Some("double") => 2,
                    Some("quad") => 4,
                    _ => 1,
                },
            },
            false,
        )
        .expect("Failed to bind Multiplier");
    registry
        .bind_constructor::<Banner, _>(|props: Properties| Banner { props }, false)
        .expect("Failed to bind Banner");

    let banner = registry.resolve::<Banner>(false).unwrap();
    println!("banner: {}", banner.render());

    // No re-resolution needed: Banner shares the registry's map
    registry.set_property("app.loud", true);
    println!("banner: {}", banner.render());

    let m = registry.resolve::<Multiplier>(false).unwrap();
    println!("mode=double -> factor {}", m.factor);

    registry.set_property("mode", "quad");
    let m = registry.resolve::<Multiplier>(true).unwrap();
    println!("mode=quad   -> factor {}", m.factor);

    println!("\n{} properties set", registry.properties().len());
    println!("\n=== Demo Complete ===");
}
