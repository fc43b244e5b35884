//! Tests for ancestor-then-global provider resolution

use canopy_application::global::GlobalRegistry;
use canopy_application::resolver::{ResolutionSource, Resolver};
use canopy_domain::entities::Provisions;
use canopy_domain::error::Error;
use canopy_domain::value_objects::TypeKey;

use crate::test_utils::{Config, Consumer, Node, Physics, node};

#[test]
fn test_nearest_ancestor_wins() {
    let outer = Node::providing("Outer", Provisions::named("Outer").with_value(Config::named("outer")));
    let inner = Node::providing("Inner", Provisions::named("Inner").with_value(Config::named("inner")));
    inner.attach_to(&node(&outer));
    let consumer = Consumer::under("Player", &node(&inner));

    let globals = GlobalRegistry::new();
    let resolution = Resolver::new(&globals)
        .resolve(&*consumer, TypeKey::of::<Config>())
        .unwrap();

    assert_eq!(resolution.provider_label, "Inner");
    assert_eq!(resolution.source, ResolutionSource::Ancestor { depth: 1 });
}

#[test]
fn test_walk_skips_nodes_without_the_type() {
    let root = Node::providing("Root", Provisions::named("Root").with::<Config>());
    let physics = Node::providing("World", Provisions::named("World").with::<Physics>());
    let plain = Node::plain("Spacer");
    physics.attach_to(&node(&root));
    plain.attach_to(&node(&physics));
    let consumer = Consumer::under("Player", &node(&plain));

    let globals = GlobalRegistry::new();
    let resolution = Resolver::new(&globals)
        .resolve(&*consumer, TypeKey::of::<Config>())
        .unwrap();

    assert_eq!(resolution.provider_label, "Root");
    assert_eq!(resolution.source, ResolutionSource::Ancestor { depth: 3 });
}

#[test]
fn test_node_is_not_its_own_provider() {
    let parent = Node::plain("Parent");
    let selfish = Node::providing("Selfish", Provisions::named("Selfish").with::<Config>());
    selfish.attach_to(&node(&parent));

    let globals = GlobalRegistry::new();
    let result = Resolver::new(&globals)
        .with_global_fallback(false)
        .resolve(&*selfish, TypeKey::of::<Config>());

    assert!(matches!(result, Err(Error::ProviderNotFound { .. })));
}

#[test]
fn test_global_fallback_uses_registration_order() {
    let first = Node::providing("First", Provisions::named("First").with::<Config>());
    let second = Node::providing("Second", Provisions::named("Second").with::<Config>());
    let globals = GlobalRegistry::new();
    globals.register(node(&first));
    globals.register(node(&second));

    let orphan = Consumer::new("Orphan");
    let resolution = Resolver::new(&globals)
        .resolve(&*orphan, TypeKey::of::<Config>())
        .unwrap();

    assert_eq!(resolution.provider_label, "First");
    assert_eq!(resolution.source, ResolutionSource::Global);
}

#[test]
fn test_ancestor_beats_global() {
    let global = Node::providing("Global", Provisions::named("Global").with::<Config>());
    let local = Node::providing("Local", Provisions::named("Local").with::<Config>());
    let globals = GlobalRegistry::new();
    globals.register(node(&global));

    let consumer = Consumer::under("Player", &node(&local));
    let resolution = Resolver::new(&globals)
        .resolve(&*consumer, TypeKey::of::<Config>())
        .unwrap();

    assert_eq!(resolution.provider_label, "Local");
}

#[test]
fn test_not_found_names_type_and_consumer() {
    let root = Node::plain("Root");
    let consumer = Consumer::under("Player", &node(&root));
    let globals = GlobalRegistry::new();

    let err = Resolver::new(&globals)
        .resolve(&*consumer, TypeKey::of::<Physics>())
        .unwrap_err();

    match &err {
        Error::ProviderNotFound {
            dependency,
            consumer,
        } => {
            assert!(dependency.ends_with("Physics"));
            assert_eq!(consumer, "Player");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_resolution_error());
}

#[test]
fn test_disabled_fallback_ignores_globals() {
    let global = Node::providing("Global", Provisions::named("Global").with::<Config>());
    let globals = GlobalRegistry::new();
    globals.register(node(&global));

    let orphan = Consumer::new("Orphan");
    let result = Resolver::new(&globals)
        .with_global_fallback(false)
        .resolve(&*orphan, TypeKey::of::<Config>());

    assert!(matches!(result, Err(Error::ProviderNotFound { .. })));
}

#[test]
fn test_parent_loop_is_reported_instead_of_walked_forever() {
    let first = Node::plain("First");
    let second = Node::plain("Second");
    first.attach_to(&node(&second));
    second.attach_to(&node(&first));
    let consumer = Consumer::under("Player", &node(&first));

    let globals = GlobalRegistry::new();
    let result = Resolver::new(&globals).resolve(&*consumer, TypeKey::of::<Config>());

    assert!(matches!(result, Err(Error::Internal { .. })));
}
