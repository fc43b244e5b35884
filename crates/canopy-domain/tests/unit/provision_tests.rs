//! Provision and provision table tests

use canopy_domain::Error;
use canopy_domain::entities::{ErasedProvision, Provision, Provisions};
use canopy_domain::value_objects::TypeKey;

#[derive(Debug, Clone, PartialEq)]
struct Config {
    name: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Score(u32);

#[test]
fn test_provision_ready_once() {
    let provision = Provision::holding(Score(1));
    assert!(!provision.is_ready());
    assert!(provision.mark_ready());
    assert!(!provision.mark_ready());
    assert!(provision.is_ready());
}

#[test]
fn test_provision_value_can_be_replaced_after_ready() {
    let provision = Provision::new();
    assert!(!provision.has_value());
    assert!(provision.provide_value(Score(1)));
    provision.set(Score(2));
    assert_eq!(provision.value(), Some(Score(2)));
    assert_eq!(provision.read(|s| s.0 * 10), Some(20));
}

#[test]
fn test_provisions_keep_declaration_order() {
    let provisions = Provisions::named("Root").with::<Config>().with::<Score>();
    let keys: Vec<TypeKey> = provisions.keys().collect();
    assert_eq!(keys, vec![TypeKey::of::<Config>(), TypeKey::of::<Score>()]);
    assert_eq!(provisions.len(), 2);
}

#[test]
fn test_insert_same_type_returns_existing() {
    let mut provisions = Provisions::new();
    let first = provisions.insert::<Score>();
    first.set(Score(3));
    let second = provisions.insert::<Score>();
    assert_eq!(second.value(), Some(Score(3)));
    assert_eq!(provisions.len(), 1);
}

#[test]
fn test_set_on_undeclared_type_fails() {
    let provisions = Provisions::named("Root").with::<Config>();
    provisions
        .set(Config {
            name: "x".to_string(),
        })
        .expect("declared type");

    match provisions.set(Score(1)) {
        Err(Error::ProvisionMissing { node, .. }) => assert_eq!(node, "Root"),
        other => panic!("Expected ProvisionMissing, got {other:?}"),
    }
}

#[test]
fn test_typed_and_erased_handles_share_state() {
    let provisions = Provisions::new().with_value(Score(9));
    let erased = provisions
        .get_erased(TypeKey::of::<Score>())
        .expect("erased provision");
    assert!(erased.has_value());
    erased.mark_ready();

    let typed = provisions.get::<Score>().expect("typed provision");
    assert!(typed.is_ready());
    assert!(provisions.all_ready());
    assert!(provisions.get::<Config>().is_none());
}
