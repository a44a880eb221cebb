#![no_main]

//! Fuzz target for registration and resolution sequences
//!
//! Drives a registry through arbitrary bind / rebind / resolve sequences over
//! a three-level dependency chain and checks the outcome against a simple
//! model of which types are bound.

use arbitrary::Arbitrary;
use autowire::{DiError, Properties, Registry};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Clone, Debug, Arbitrary)]
struct Leaf(u32);

#[derive(Clone, Debug)]
struct Mid {
    leaf: Leaf,
    tag: Option<String>,
}

#[derive(Clone, Debug)]
struct Top {
    mid: Mid,
    leaf: Leaf,
}

#[derive(Debug, Arbitrary)]
enum RegistryOp {
    BindLeaf(Leaf),
    BindMid { prototype: bool },
    BindTop { prototype: bool },
    SetTag(String),
    ResolveLeaf { force: bool },
    ResolveMid { force: bool },
    ResolveTop { force: bool },
    ResolveAdHoc { force: bool },
    BindWrongOutput,
}

fuzz_target!(|ops: Vec<RegistryOp>| {
    let mut registry = Registry::new();

    let mut leaf: Option<u32> = None;
    let mut has_mid = false;
    let mut has_top = false;

    for op in ops {
        match op {
            RegistryOp::BindLeaf(value) => {
                leaf = Some(value.0);
                registry.bind(value).unwrap();
            }
            RegistryOp::BindMid { prototype } => {
                registry
                    .bind_constructor::<Mid, _>(
                        |leaf: Leaf, props: Properties| Mid {
                            leaf,
                            tag: props.get_string("tag"),
                        },
                        prototype,
                    )
                    .unwrap();
                has_mid = true;
            }
            RegistryOp::BindTop { prototype } => {
                registry
                    .bind_constructor::<Top, _>(|mid: Mid, leaf: Leaf| Top { mid, leaf }, prototype)
                    .unwrap();
                has_top = true;
            }
            RegistryOp::SetTag(tag) => registry.set_property("tag", tag),
            RegistryOp::ResolveLeaf { force } => match registry.resolve::<Leaf>(force) {
                Ok(value) => assert_eq!(Some(value.0), leaf),
                Err(err) => {
                    assert!(leaf.is_none());
                    assert_eq!(err, DiError::not_found::<Leaf>());
                }
            },
            RegistryOp::ResolveMid { force } => match registry.resolve::<Mid>(force) {
                Ok(_) => assert!(has_mid && leaf.is_some()),
                Err(err) => assert!(!has_mid || (leaf.is_none() && err == DiError::not_found::<Leaf>())),
            },
            RegistryOp::ResolveTop { force } => match registry.resolve::<Top>(force) {
                Ok(top) => {
                    assert!(has_top && has_mid);
                    if force {
                        // forced walk rebuilds every node from the current leaf
                        assert_eq!(Some(top.leaf.0), leaf);
                        assert_eq!(Some(top.mid.leaf.0), leaf);
                    }
                }
                Err(err) => assert!(!err.is_validation()),
            },
            RegistryOp::ResolveAdHoc { force } => {
                let result =
                    registry.resolve_with_constructor::<u64, _>(|leaf: Leaf| u64::from(leaf.0), force);
                match result {
                    Ok(value) => assert_eq!(Some(*value as u32), leaf),
                    Err(err) => assert!(leaf.is_none() && err == DiError::not_found::<Leaf>()),
                }
                assert!(!registry.contains::<u64>());
            }
            RegistryOp::BindWrongOutput => {
                let before = registry.len();
                let err = registry
                    .bind_constructor::<Top, _>(|leaf: Leaf| Arc::new(leaf), false)
                    .unwrap_err();
                assert!(err.is_validation());
                assert_eq!(registry.len(), before);
            }
        }
    }
});
