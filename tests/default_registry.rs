//! Free-function API over the process-wide default registry

use autowire::{DiError, Properties, Registry, global};
use std::sync::{Mutex, MutexGuard, PoisonError};

// tests in this file share one default registry
static SERIAL: Mutex<()> = Mutex::new(());

fn fresh_default() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    global::set_default(Registry::new());
    guard
}

#[derive(Clone, Debug, PartialEq)]
struct Work {
    description: String,
}

struct Employee {
    work: Work,
}

#[test]
fn bind_and_resolve_through_default() {
    let _guard = fresh_default();

    global::bind(Work {
        description: "typing".into(),
    })
    .unwrap();
    global::bind_constructor::<Employee, _>(|work: Work| Employee { work }, false).unwrap();

    let employee = global::resolve::<Employee>(false).unwrap();
    assert_eq!(employee.work.description, "typing");
}

#[test]
fn default_properties_are_live() {
    let _guard = fresh_default();

    struct Mode(Option<String>);

    global::bind_constructor::<Mode, _>(|props: Properties| Mode(props.get_string("mode")), false)
        .unwrap();

    global::set_property("mode", "double");
    assert_eq!(global::resolve::<Mode>(false).unwrap().0.as_deref(), Some("double"));

    let props = global::properties();
    global::set_property("mode", "quad");
    assert_eq!(props.get_string("mode").as_deref(), Some("quad"));
    assert_eq!(global::resolve::<Mode>(true).unwrap().0.as_deref(), Some("quad"));
}

#[test]
fn ad_hoc_resolution_through_default() {
    let _guard = fresh_default();

    global::bind(21i64).unwrap();
    let doubled = global::resolve_with_constructor::<i64, _>(|x: i64| x * 2, false).unwrap();

    assert_eq!(*doubled, 42);
    assert_eq!(*global::resolve::<i64>(false).unwrap(), 21);
}

#[test]
fn set_default_returns_previous_registry() {
    let _guard = fresh_default();

    global::bind(7u8).unwrap();

    let previous = global::set_default(Registry::new());
    assert!(previous.contains::<u8>());
    assert!(matches!(
        global::resolve::<u8>(false),
        Err(DiError::BindingNotFound { .. })
    ));
    assert!(global::with_default(|registry| !registry.contains::<u8>()));
}
